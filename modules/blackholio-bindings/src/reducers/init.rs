use blackholio_dispatch::{ContextHandler, ReducerArgs, ReducerEventContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitArgs {}

impl ReducerArgs for InitArgs {
    const NAME: &'static str = "init";
    type Handler = ContextHandler;

    fn call(handler: &ContextHandler, ctx: &ReducerEventContext, _args: &Self) {
        handler(ctx)
    }
}
