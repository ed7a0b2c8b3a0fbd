use blackholio_dispatch::{ContextHandler, ReducerArgs, ReducerEventContext};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugArgs {}

impl ReducerArgs for DebugArgs {
    const NAME: &'static str = "debug";
    type Handler = ContextHandler;

    fn call(handler: &ContextHandler, ctx: &ReducerEventContext, _args: &Self) {
        handler(ctx)
    }
}
