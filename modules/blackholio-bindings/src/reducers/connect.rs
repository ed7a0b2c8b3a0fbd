use blackholio_dispatch::{ContextHandler, ReducerArgs, ReducerEventContext};
use serde::{Deserialize, Serialize};

/// Client-connected lifecycle reducer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectArgs {}

impl ReducerArgs for ConnectArgs {
    const NAME: &'static str = "connect";
    type Handler = ContextHandler;

    fn call(handler: &ContextHandler, ctx: &ReducerEventContext, _args: &Self) {
        handler(ctx)
    }
}
