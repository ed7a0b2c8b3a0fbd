use blackholio_dispatch::{ContextHandler, ReducerArgs, ReducerEventContext};
use serde::{Deserialize, Serialize};

/// Client-disconnected lifecycle reducer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisconnectArgs {}

impl ReducerArgs for DisconnectArgs {
    const NAME: &'static str = "disconnect";
    type Handler = ContextHandler;

    fn call(handler: &ContextHandler, ctx: &ReducerEventContext, _args: &Self) {
        handler(ctx)
    }
}
