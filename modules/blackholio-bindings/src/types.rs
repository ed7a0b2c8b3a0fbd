//! Schema types used as reducer arguments.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// When a scheduled reducer fires: repeatedly, or once at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleAt {
    Interval(Duration),
    Time(DateTime<Utc>),
}

/// Row of the `spawn_food_timer` schedule table, passed to `spawn_food`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnFoodTimer {
    pub scheduled_id: u64,
    pub scheduled_at: ScheduleAt,
}
