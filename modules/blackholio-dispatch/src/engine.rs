//! The per-connection dispatch loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::info;

use crate::config::DispatchConfig;
use crate::decode::JsonArgsDecoder;
use crate::router::DispatchRouter;
use crate::stats::StatsSnapshot;
use crate::traits::ArgsDecoder;
use crate::types::ReducerCall;

/// Drains a connection's notification channel into the router.
///
/// One loop per connection. Notifications are dispatched one at a time in
/// arrival order; no error stops the loop, only the transport closing the
/// channel does.
pub struct DispatchLoop<D: ArgsDecoder = JsonArgsDecoder> {
    router: Arc<DispatchRouter<D>>,
}

impl DispatchLoop<JsonArgsDecoder> {
    /// Transport-side sender and loop-side receiver, sized from config.
    pub fn channel(
        config: &DispatchConfig,
    ) -> (mpsc::Sender<ReducerCall>, mpsc::Receiver<ReducerCall>) {
        mpsc::channel(config.queue_capacity)
    }
}

impl<D: ArgsDecoder> DispatchLoop<D> {
    pub fn new(router: Arc<DispatchRouter<D>>) -> Self {
        Self { router }
    }

    /// Run until every sender is dropped. Returns the router's final counters.
    pub async fn run(&self, mut rx: mpsc::Receiver<ReducerCall>) -> StatsSnapshot {
        while let Some(call) = rx.recv().await {
            self.router.dispatch_logged(&call);
        }

        let stats = self.router.stats().snapshot();
        info!(
            dispatched = stats.dispatched,
            handled = stats.handled,
            unhandled = stats.unhandled,
            unknown_reducer = stats.unknown_reducer,
            decode_failed = stats.decode_failed,
            handler_faults = stats.handler_faults,
            "Dispatch loop finished"
        );
        stats
    }

    pub fn router(&self) -> &DispatchRouter<D> {
        &self.router
    }
}
