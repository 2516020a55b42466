//! Event payload types for the engine lifecycle.

use crate::types::RiskLevel;

/// Payload for `on_run_started`.
#[derive(Debug, Clone)]
pub struct RunStartedEvent {
    pub run_id: String,
    pub document_count: usize,
}

/// Payload for `on_run_completed`.
#[derive(Debug, Clone)]
pub struct RunCompletedEvent {
    pub run_id: String,
    pub risk_level: RiskLevel,
    pub pattern_count: usize,
    pub duration_ms: u64,
}

/// Payload for `on_run_failed`.
#[derive(Debug, Clone)]
pub struct RunFailedEvent {
    pub run_id: String,
    pub reason: String,
}

/// Payload for `on_weights_reloaded`.
#[derive(Debug, Clone)]
pub struct WeightsReloadedEvent {
    pub version: String,
}

/// Payload for `on_weights_rejected`.
#[derive(Debug, Clone)]
pub struct WeightsRejectedEvent {
    pub reason: String,
    /// Version of the snapshot still being served.
    pub retained_version: String,
}
