use blackholio_dispatch::{ArgsHandler, FieldShape, ReducerArgs, ReducerEventContext};
use serde::{Deserialize, Serialize};

use crate::types::SpawnFoodTimer;

/// Scheduled reducer, fired by the `spawn_food_timer` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnFoodArgs {
    pub timer: SpawnFoodTimer,
}

impl ReducerArgs for SpawnFoodArgs {
    const NAME: &'static str = "spawn_food";
    type Handler = ArgsHandler<SpawnFoodArgs>;

    fn call(handler: &ArgsHandler<SpawnFoodArgs>, ctx: &ReducerEventContext, args: &Self) {
        handler(ctx, args)
    }

    fn fields() -> Vec<FieldShape> {
        vec![FieldShape::new("timer", "SpawnFoodTimer")]
    }
}
