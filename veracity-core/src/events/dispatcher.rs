//! EventDispatcher — synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::EngineEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
///
/// When no handlers are registered, `emit` iterates over an empty Vec
/// and costs nothing. A handler that panics is caught and does not
/// prevent subsequent handlers from receiving the event.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn EngineEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn EngineEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    fn emit<F: Fn(&dyn EngineEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked, continuing");
            }
        }
    }

    pub fn emit_run_started(&self, event: &RunStartedEvent) {
        self.emit(|h| h.on_run_started(event));
    }

    pub fn emit_run_completed(&self, event: &RunCompletedEvent) {
        self.emit(|h| h.on_run_completed(event));
    }

    pub fn emit_run_failed(&self, event: &RunFailedEvent) {
        self.emit(|h| h.on_run_failed(event));
    }

    pub fn emit_weights_reloaded(&self, event: &WeightsReloadedEvent) {
        self.emit(|h| h.on_weights_reloaded(event));
    }

    pub fn emit_weights_rejected(&self, event: &WeightsRejectedEvent) {
        self.emit(|h| h.on_weights_rejected(event));
    }
}
