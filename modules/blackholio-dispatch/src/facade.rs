//! The per-reducer surface application code subscribes through.

use std::any::{type_name, Any};
use std::sync::Arc;

use tracing::error;

use crate::error::DispatchError;
use crate::registry::{HandlerId, HandlerRegistry, InvocationReport};
use crate::traits::ReducerArgs;
use crate::types::ReducerEventContext;

/// One reducer's subscribe/unsubscribe/invoke surface.
///
/// A schema's aggregate facade holds one slot per reducer and exposes them as
/// `on_<name>` / `remove_<name>` methods.
pub struct ReducerSlot<A: ReducerArgs> {
    handlers: HandlerRegistry<A>,
}

impl<A: ReducerArgs> ReducerSlot<A> {
    pub fn new() -> Self {
        Self {
            handlers: HandlerRegistry::new(),
        }
    }

    pub fn on(&self, handler: Arc<A::Handler>) -> HandlerId {
        self.handlers.add(handler)
    }

    /// Unregister the earliest registration of `handler`. Takes effect from
    /// the next dispatch; a pass already running is unaffected.
    pub fn remove(&self, handler: &Arc<A::Handler>) -> bool {
        self.handlers.remove(handler)
    }

    pub fn remove_all(&self, handler: &Arc<A::Handler>) -> usize {
        self.handlers.remove_all(handler)
    }

    pub fn remove_id(&self, id: HandlerId) -> bool {
        self.handlers.remove_id(id)
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Run all handlers. `true` if at least one was registered.
    pub fn invoke(&self, ctx: &ReducerEventContext, args: &A) -> bool {
        self.handlers.invoke_all(ctx, args).handled()
    }

    pub fn invoke_report(&self, ctx: &ReducerEventContext, args: &A) -> InvocationReport {
        self.handlers.invoke_all(ctx, args)
    }

    /// Entry point for the router, which only holds type-erased arguments.
    ///
    /// Receiving anything but `A` is a generation bug: it panics in debug
    /// builds and is reported as [`DispatchError::ArgumentTypeMismatch`]
    /// otherwise.
    pub fn invoke_erased(
        &self,
        ctx: &ReducerEventContext,
        args: &dyn Any,
    ) -> Result<InvocationReport, DispatchError> {
        match args.downcast_ref::<A>() {
            Some(args) => Ok(self.handlers.invoke_all(ctx, args)),
            None => {
                let expected = type_name::<A>();
                error!(reducer = A::NAME, expected, "Argument type mismatch");
                if cfg!(debug_assertions) {
                    panic!(
                        "reducer '{}' invoked with arguments that are not {expected}",
                        A::NAME
                    );
                }
                Err(DispatchError::ArgumentTypeMismatch {
                    reducer: A::NAME.to_string(),
                    expected,
                })
            }
        }
    }
}

impl<A: ReducerArgs> Default for ReducerSlot<A> {
    fn default() -> Self {
        Self::new()
    }
}
