//! Per-reducer ordered multicast list of handlers.
//!
//! Handlers run in registration order against a snapshot taken at the start
//! of each pass, so handlers may subscribe or unsubscribe (themselves or
//! others) mid-pass without affecting it. A panicking handler is isolated:
//! the fault is logged and collected and the rest of the pass still runs.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::error;

use crate::error::HandlerFault;
use crate::traits::ReducerArgs;
use crate::types::ReducerEventContext;

/// Handle for one registration, for removing exactly that registration.
///
/// Ids are unique across every registry in the process, so an id handed out
/// by one reducer's registry never matches an entry in another's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

static NEXT_HANDLER_ID: AtomicU64 = AtomicU64::new(1);

impl HandlerId {
    fn next() -> Self {
        Self(NEXT_HANDLER_ID.fetch_add(1, Ordering::Relaxed))
    }
}

struct HandlerEntry<A: ReducerArgs> {
    id: HandlerId,
    handler: Arc<A::Handler>,
}

impl<A: ReducerArgs> Clone for HandlerEntry<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Result of one invocation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvocationReport {
    /// Handlers in the snapshot, faulted ones included.
    pub invoked: usize,
    pub faults: Vec<HandlerFault>,
}

impl InvocationReport {
    /// At least one handler was present for the pass.
    pub fn handled(&self) -> bool {
        self.invoked > 0
    }
}

pub struct HandlerRegistry<A: ReducerArgs> {
    entries: Mutex<Vec<HandlerEntry<A>>>,
}

impl<A: ReducerArgs> HandlerRegistry<A> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Append a handler. The same `Arc` may be added more than once and is
    /// then invoked once per registration.
    pub fn add(&self, handler: Arc<A::Handler>) -> HandlerId {
        let id = HandlerId::next();
        self.lock().push(HandlerEntry { id, handler });
        id
    }

    /// Remove the earliest registration of `handler` (pointer identity).
    /// Removing a handler that is not registered is a no-op.
    pub fn remove(&self, handler: &Arc<A::Handler>) -> bool {
        let mut entries = self.lock();
        match entries
            .iter()
            .position(|entry| Arc::ptr_eq(&entry.handler, handler))
        {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove every registration of `handler`. Returns how many were removed.
    pub fn remove_all(&self, handler: &Arc<A::Handler>) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|entry| !Arc::ptr_eq(&entry.handler, handler));
        before - entries.len()
    }

    /// Remove one registration by id.
    pub fn remove_id(&self, id: HandlerId) -> bool {
        let mut entries = self.lock();
        match entries.iter().position(|entry| entry.id == id) {
            Some(index) => {
                entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Invoke every handler registered when the pass starts.
    pub fn invoke_all(&self, ctx: &ReducerEventContext, args: &A) -> InvocationReport {
        let snapshot: Vec<HandlerEntry<A>> = self.lock().clone();

        let mut report = InvocationReport {
            invoked: snapshot.len(),
            faults: Vec::new(),
        };

        for (position, entry) in snapshot.iter().enumerate() {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| A::call(&entry.handler, ctx, args)));
            if let Err(payload) = outcome {
                let fault = HandlerFault {
                    reducer: A::NAME.to_string(),
                    position,
                    message: panic_message(payload.as_ref()),
                };
                error!(reducer = A::NAME, position, error = %fault.message, "Handler fault");
                report.faults.push(fault);
            }
        }

        report
    }

    // The lock is never held while handlers run, so poisoning can only come
    // from a panic inside Vec bookkeeping; the list is still consistent.
    fn lock(&self) -> MutexGuard<'_, Vec<HandlerEntry<A>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<A: ReducerArgs> Default for HandlerRegistry<A> {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
