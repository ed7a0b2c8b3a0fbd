//! Name → definition → typed arguments → handlers.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::config::DispatchConfig;
use crate::decode::JsonArgsDecoder;
use crate::definition::ReducerDefinition;
use crate::error::{DecodeError, DispatchError};
use crate::facade::ReducerSlot;
use crate::registry::InvocationReport;
use crate::stats::{DispatchStats, StatsSnapshot};
use crate::traits::{ArgsDecoder, ReducerArgs};
use crate::types::{ReducerCall, ReducerEventContext};

type Constructor = Box<dyn Fn(&[u8]) -> Result<Box<dyn Any + Send>, DecodeError> + Send + Sync>;

/// Type-erased view of a [`ReducerSlot`], so slots for different argument
/// types can live in one table.
pub trait ErasedSlot: Send + Sync {
    fn invoke_erased(
        &self,
        ctx: &ReducerEventContext,
        args: &dyn Any,
    ) -> Result<InvocationReport, DispatchError>;
}

impl<A: ReducerArgs> ErasedSlot for ReducerSlot<A> {
    fn invoke_erased(
        &self,
        ctx: &ReducerEventContext,
        args: &dyn Any,
    ) -> Result<InvocationReport, DispatchError> {
        ReducerSlot::<A>::invoke_erased(self, ctx, args)
    }
}

struct Route {
    definition: ReducerDefinition,
    construct: Constructor,
    slot: Arc<dyn ErasedSlot>,
}

/// Routes transport notifications to the facade slot for their reducer.
///
/// Built once at binding time (`register`), then shared read-only by the
/// connection's dispatch loop. Dispatch is synchronous and keeps arrival order.
pub struct DispatchRouter<D: ArgsDecoder = JsonArgsDecoder> {
    decoder: Arc<D>,
    routes: HashMap<&'static str, Route>,
    stats: Arc<DispatchStats>,
    warn_on_unhandled: bool,
}

impl<D: ArgsDecoder> DispatchRouter<D> {
    pub fn new(decoder: D) -> Self {
        Self {
            decoder: Arc::new(decoder),
            routes: HashMap::new(),
            stats: Arc::new(DispatchStats::new()),
            warn_on_unhandled: DispatchConfig::default().warn_on_unhandled,
        }
    }

    pub fn with_config(mut self, config: &DispatchConfig) -> Self {
        self.warn_on_unhandled = config.warn_on_unhandled;
        self
    }

    /// Bind a reducer's definition and constructor to its facade slot.
    /// A second registration under the same name is rejected.
    pub fn register<A: ReducerArgs>(
        &mut self,
        slot: Arc<ReducerSlot<A>>,
    ) -> Result<(), DispatchError> {
        if self.routes.contains_key(A::NAME) {
            return Err(DispatchError::DuplicateReducer(A::NAME.to_string()));
        }

        let definition = A::definition();
        let decoder = Arc::clone(&self.decoder);
        let for_decode = definition.clone();
        let construct: Constructor = Box::new(move |raw: &[u8]| {
            let args: A = decoder.decode(&for_decode, raw)?;
            Ok(Box::new(args) as Box<dyn Any + Send>)
        });

        self.routes.insert(
            A::NAME,
            Route {
                definition,
                construct,
                slot,
            },
        );
        Ok(())
    }

    pub fn contains(&self, reducer: &str) -> bool {
        self.routes.contains_key(reducer)
    }

    pub fn definition(&self, reducer: &str) -> Option<&ReducerDefinition> {
        self.routes.get(reducer).map(|route| &route.definition)
    }

    /// All bound definitions, sorted by name.
    pub fn definitions(&self) -> Vec<&ReducerDefinition> {
        let mut defs: Vec<&ReducerDefinition> =
            self.routes.values().map(|route| &route.definition).collect();
        defs.sort_by_key(|def| def.name);
        defs
    }

    /// Dispatch one notification. `Ok(true)` if at least one handler ran.
    pub fn dispatch(&self, call: &ReducerCall) -> Result<bool, DispatchError> {
        self.dispatch_report(call).map(|report| report.handled())
    }

    /// Like [`dispatch`](Self::dispatch), with per-handler fault detail.
    pub fn dispatch_report(&self, call: &ReducerCall) -> Result<InvocationReport, DispatchError> {
        self.stats.record_dispatched();

        let Some(route) = self.routes.get(call.reducer()) else {
            self.stats.record_unknown_reducer();
            return Err(DispatchError::UnknownReducer(call.reducer().to_string()));
        };

        let args = (route.construct)(call.args()).inspect_err(|_| {
            self.stats.record_decode_failed();
        })?;

        let report = route
            .slot
            .invoke_erased(call.context(), &*args)
            .inspect_err(|_| {
                self.stats.record_type_mismatch();
            })?;

        self.stats.record_outcome(report.handled(), report.faults.len());
        Ok(report)
    }

    /// Dispatch and recover every error at this boundary. Errors go to the
    /// log and the stats; the caller only learns whether a handler ran.
    pub fn dispatch_logged(&self, call: &ReducerCall) -> bool {
        let reducer = call.reducer();
        match self.dispatch_report(call) {
            Ok(report) => {
                if !report.handled() {
                    if self.warn_on_unhandled {
                        warn!(reducer, "Reducer event not handled");
                    } else {
                        debug!(reducer, "Reducer event not handled");
                    }
                } else {
                    debug!(
                        reducer,
                        handlers = report.invoked,
                        faults = report.faults.len(),
                        "Reducer event dispatched"
                    );
                }
                report.handled()
            }
            Err(DispatchError::UnknownReducer(_)) => {
                warn!(reducer, "Unknown reducer, client and server schemas disagree");
                false
            }
            Err(DispatchError::Decode(e)) => {
                warn!(reducer, error = %e, "Dropping reducer event with undecodable arguments");
                false
            }
            Err(e) => {
                error!(reducer, error = %e, "Reducer dispatch failed");
                false
            }
        }
    }

    /// Dispatch a batch in order, recovering errors per item.
    pub fn dispatch_all(&self, calls: impl IntoIterator<Item = ReducerCall>) -> StatsSnapshot {
        for call in calls {
            self.dispatch_logged(&call);
        }
        self.stats.snapshot()
    }

    pub fn stats(&self) -> &Arc<DispatchStats> {
        &self.stats
    }
}

impl Default for DispatchRouter<JsonArgsDecoder> {
    fn default() -> Self {
        Self::new(JsonArgsDecoder)
    }
}
