//! One argument record per reducer in the Blackholio module.

mod connect;
mod debug;
mod disconnect;
mod init;
mod spawn_food;

pub use connect::ConnectArgs;
pub use debug::DebugArgs;
pub use disconnect::DisconnectArgs;
pub use init::InitArgs;
pub use spawn_food::SpawnFoodArgs;
