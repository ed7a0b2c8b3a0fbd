//! Client bindings for the Blackholio module's reducers.
//!
//! Argument records and the `RemoteReducers` facade, wired onto the generic
//! dispatch core in `blackholio-dispatch`.

pub mod reducers;
pub mod remote_reducers;
pub mod types;

pub use reducers::{ConnectArgs, DebugArgs, DisconnectArgs, InitArgs, SpawnFoodArgs};
pub use remote_reducers::RemoteReducers;
pub use types::{ScheduleAt, SpawnFoodTimer};
