//! Dispatch counters for diagnostics. Thread-safe.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct DispatchStats {
    dispatched: AtomicU64,
    handled: AtomicU64,
    unhandled: AtomicU64,
    unknown_reducer: AtomicU64,
    decode_failed: AtomicU64,
    handler_faults: AtomicU64,
    type_mismatches: AtomicU64,
}

/// Point-in-time copy of [`DispatchStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatsSnapshot {
    pub dispatched: u64,
    pub handled: u64,
    pub unhandled: u64,
    pub unknown_reducer: u64,
    pub decode_failed: u64,
    pub handler_faults: u64,
    pub type_mismatches: u64,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_dispatched(&self) {
        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_outcome(&self, handled: bool, faults: usize) {
        if handled {
            self.handled.fetch_add(1, Ordering::Relaxed);
        } else {
            self.unhandled.fetch_add(1, Ordering::Relaxed);
        }
        self.handler_faults.fetch_add(faults as u64, Ordering::Relaxed);
    }

    pub(crate) fn record_unknown_reducer(&self) {
        self.unknown_reducer.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_decode_failed(&self) {
        self.decode_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_type_mismatch(&self) {
        self.type_mismatches.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            dispatched: self.dispatched.load(Ordering::Relaxed),
            handled: self.handled.load(Ordering::Relaxed),
            unhandled: self.unhandled.load(Ordering::Relaxed),
            unknown_reducer: self.unknown_reducer.load(Ordering::Relaxed),
            decode_failed: self.decode_failed.load(Ordering::Relaxed),
            handler_faults: self.handler_faults.load(Ordering::Relaxed),
            type_mismatches: self.type_mismatches.load(Ordering::Relaxed),
        }
    }
}
