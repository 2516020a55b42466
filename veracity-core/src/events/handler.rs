//! Event handler trait with no-op defaults.

use super::types::*;

/// Receiver for engine lifecycle events. All methods default to
/// no-ops so handlers implement only what they care about.
pub trait EngineEventHandler: Send + Sync {
    fn on_run_started(&self, event: &RunStartedEvent) {
        let _ = event;
    }

    fn on_run_completed(&self, event: &RunCompletedEvent) {
        let _ = event;
    }

    fn on_run_failed(&self, event: &RunFailedEvent) {
        let _ = event;
    }

    fn on_weights_reloaded(&self, event: &WeightsReloadedEvent) {
        let _ = event;
    }

    fn on_weights_rejected(&self, event: &WeightsRejectedEvent) {
        let _ = event;
    }
}
