//! Core traits for the dispatch core.

use serde::de::DeserializeOwned;

use crate::definition::{FieldShape, ReducerDefinition};
use crate::error::DecodeError;
use crate::types::ReducerEventContext;

/// A typed reducer argument record, one per reducer in a schema.
///
/// `Handler` is the callback shape application code registers for this
/// reducer. Zero-field reducers use [`ContextHandler`]; reducers with fields
/// use [`ArgsHandler`].
pub trait ReducerArgs: DeserializeOwned + Send + Sync + 'static {
    /// Canonical name agreed with the server schema.
    const NAME: &'static str;

    type Handler: ?Sized + Send + Sync + 'static;

    /// Call one handler with this record.
    fn call(handler: &Self::Handler, ctx: &ReducerEventContext, args: &Self);

    /// Argument fields, in declaration order.
    fn fields() -> Vec<FieldShape> {
        Vec::new()
    }

    fn definition() -> ReducerDefinition {
        ReducerDefinition::new(Self::NAME, Self::fields())
    }
}

/// Handler for reducers that carry no arguments.
pub type ContextHandler = dyn Fn(&ReducerEventContext) + Send + Sync;

/// Handler for reducers whose argument record has fields.
pub type ArgsHandler<A> = dyn Fn(&ReducerEventContext, &A) + Send + Sync;

/// Turns raw argument bytes into a typed record.
///
/// The wire format belongs to the transport; implementations only need to
/// agree with whatever encoder the server side uses.
pub trait ArgsDecoder: Send + Sync + 'static {
    fn decode<A: ReducerArgs>(
        &self,
        definition: &ReducerDefinition,
        raw: &[u8],
    ) -> Result<A, DecodeError>;
}
