//! Typed reducer-event dispatch.
//!
//! The transport hands over `ReducerCall`s (reducer name, context, raw args).
//! The router resolves the name to a bound definition, decodes the arguments
//! into that reducer's typed record and invokes the handlers registered on the
//! reducer's facade slot, reporting whether any handler ran.
//!
//! Schemas plug in by implementing `ReducerArgs` for each argument record and
//! registering one `ReducerSlot` per reducer with a `DispatchRouter`.

pub mod config;
pub mod decode;
pub mod definition;
pub mod engine;
pub mod error;
pub mod facade;
pub mod registry;
pub mod router;
pub mod stats;
pub mod traits;
pub mod types;

pub use config::DispatchConfig;
pub use decode::JsonArgsDecoder;
pub use definition::{FieldShape, ReducerDefinition};
pub use engine::DispatchLoop;
pub use error::{DecodeError, DispatchError, HandlerFault};
pub use facade::ReducerSlot;
pub use registry::{HandlerId, HandlerRegistry, InvocationReport};
pub use router::{DispatchRouter, ErasedSlot};
pub use stats::{DispatchStats, StatsSnapshot};
pub use traits::{ArgsDecoder, ArgsHandler, ContextHandler, ReducerArgs};
pub use types::{
    ConnectionId, ConnectionState, Identity, ReducerCall, ReducerEventContext, ReducerStatus,
};
