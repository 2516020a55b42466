//! Analysis run coordinator.
//!
//! State machine: idle → running → {completed, failed}. Triggers into
//! `running`: a successful weights reload, the periodic timer, or an
//! explicit external request. Execution is serialized; concurrent
//! triggers coalesce into at most one pending re-run. A failed run
//! leaves the previously committed current run untouched.

use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::thread::JoinHandle;
use std::time::Duration;

use chrono::Utc;
use crossbeam_channel::{bounded, select, tick, Sender};
use veracity_core::errors::{InputError, RunError, RunResult};
use veracity_core::events::{
    EventDispatcher, RunCompletedEvent, RunFailedEvent, RunStartedEvent,
    WeightsReloadedEvent, WeightsRejectedEvent,
};
use veracity_core::types::{AnalysisRun, DocumentRecord, EvidencePattern, RunStatus};

use super::artifacts::ArtifactWriter;
use super::source::DocumentSource;
use crate::detectors::{self, rules};
use crate::fingerprint::{extract_fingerprint, DocumentFingerprint};
use crate::patterns;
use crate::scoring;
use crate::weights::{ChangeProbe, ReloadOutcome, WeightsStore};

/// What caused a run to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Periodic re-score timer elapsed.
    Timer,
    /// A new weights snapshot was swapped in.
    WeightsChanged,
    /// Explicit external request.
    Explicit,
}

/// Coordinator tuning. Intervals only drive the watch loop; tests
/// trigger runs and polls directly.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    /// Periodic re-score cadence in watch mode.
    pub run_interval: Duration,
    /// Weights polling cadence in watch mode.
    pub poll_interval: Duration,
    /// Display cap for the run score total.
    pub display_cap: f64,
    /// Completed runs retained in history.
    pub history_limit: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            run_interval: Duration::from_secs(300),
            poll_interval: Duration::from_secs(30),
            display_cap: rules::DEFAULT_DISPLAY_CAP,
            history_limit: 50,
        }
    }
}

/// Orchestrates full analysis passes over document snapshots.
pub struct AnalysisCoordinator {
    store: Arc<WeightsStore>,
    source: Arc<dyn DocumentSource>,
    writer: Option<ArtifactWriter>,
    dispatcher: EventDispatcher,
    config: CoordinatorConfig,
    current: RwLock<Option<Arc<AnalysisRun>>>,
    history: Mutex<Vec<Arc<AnalysisRun>>>,
    running: AtomicBool,
    pending: AtomicBool,
    run_counter: AtomicU64,
}

impl AnalysisCoordinator {
    pub fn new(
        store: Arc<WeightsStore>,
        source: Arc<dyn DocumentSource>,
        writer: Option<ArtifactWriter>,
        dispatcher: EventDispatcher,
        config: CoordinatorConfig,
    ) -> Self {
        Self {
            store,
            source,
            writer,
            dispatcher,
            config,
            current: RwLock::new(None),
            history: Mutex::new(Vec::new()),
            running: AtomicBool::new(false),
            pending: AtomicBool::new(false),
            run_counter: AtomicU64::new(0),
        }
    }

    pub fn store(&self) -> &WeightsStore {
        &self.store
    }

    /// Most recently committed run. Non-blocking: a read lock around
    /// an `Arc` clone; never observes a run in progress.
    pub fn current_run(&self) -> Option<Arc<AnalysisRun>> {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Completed runs, oldest first, bounded by `history_limit`.
    pub fn history(&self) -> Vec<Arc<AnalysisRun>> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Request a run. If one is already executing, the request
    /// coalesces into a single pending re-run and returns `None`.
    pub fn trigger(&self, trigger: Trigger) -> Result<Option<Arc<AnalysisRun>>, RunError> {
        if self.running.swap(true, Ordering::SeqCst) {
            self.pending.store(true, Ordering::SeqCst);
            tracing::debug!(?trigger, "run already executing, trigger coalesced");
            return Ok(None);
        }

        let result = loop {
            let outcome = self.execute(trigger);
            if !self.pending.swap(false, Ordering::SeqCst) {
                break outcome;
            }
            tracing::debug!("pending trigger observed, re-running");
        };
        self.running.store(false, Ordering::SeqCst);
        result.map(Some)
    }

    /// One full pass: snapshot weights and documents, run the
    /// pipeline, commit the completed run.
    fn execute(&self, trigger: Trigger) -> Result<Arc<AnalysisRun>, RunError> {
        let run_id = format!("run-{:05}", self.run_counter.fetch_add(1, Ordering::SeqCst) + 1);
        let started_at = Utc::now();
        let weights = self.store.snapshot();

        let documents = match self.source.snapshot() {
            Ok(docs) => docs,
            Err(err) => {
                let reason = err.to_string();
                self.fail_run(&run_id, &reason);
                return Err(RunError::NoOutput { reason });
            }
        };
        if documents.is_empty() {
            self.fail_run(&run_id, "no documents in snapshot");
            return Err(RunError::NoDocuments);
        }

        tracing::info!(%run_id, ?trigger, documents = documents.len(), "analysis run started");
        self.dispatcher.emit_run_started(&RunStartedEvent {
            run_id: run_id.clone(),
            document_count: documents.len(),
        });

        let mut stage: RunResult = RunResult::default();
        let (fingerprinted, mut all_patterns) =
            self.analyze_documents(documents, &mut stage);
        let mut cross_faulted = false;
        match std::panic::catch_unwind(AssertUnwindSafe(|| {
            detectors::compare_documents(&fingerprinted)
        })) {
            Ok(cross) => all_patterns.extend(cross),
            Err(_) => cross_faulted = true,
        }

        let summary = patterns::aggregate(&mut all_patterns);
        let scoring = scoring::score_patterns(&all_patterns, &weights.config, self.config.display_cap);
        for fault in scoring.faults {
            stage.add_error(fault);
        }
        let mut notes = stage.notes();
        if cross_faulted {
            notes.push("cross-document comparison faulted, results omitted".to_string());
        }

        let total_document_versions =
            fingerprinted.iter().map(|(d, _)| u64::from(d.version)).sum();
        let mut run = AnalysisRun {
            run_id: run_id.clone(),
            started_at,
            finished_at: Some(Utc::now()),
            status: RunStatus::Completed,
            patterns: all_patterns,
            scored: scoring.scored,
            score_report: scoring.report,
            risk_level: summary.risk_level,
            confidence_score: summary.confidence_score,
            weights_version: weights.config.version.clone(),
            document_count: fingerprinted.len(),
            total_document_versions,
            notes,
        };

        if let Some(writer) = &self.writer {
            if let Err(err) = writer.write_run(&run, weights.degraded) {
                tracing::warn!(%err, "artifact persistence failed, run still committed");
                run.notes.push(err.to_string());
            }
        }

        let run = Arc::new(run);
        self.commit(run.clone());

        let duration_ms = (run.finished_at.unwrap_or(run.started_at) - run.started_at)
            .num_milliseconds()
            .max(0) as u64;
        tracing::info!(
            %run_id,
            risk = %run.risk_level,
            patterns = run.patterns.len(),
            duration_ms,
            "analysis run completed"
        );
        self.dispatcher.emit_run_completed(&RunCompletedEvent {
            run_id,
            risk_level: run.risk_level,
            pattern_count: run.patterns.len(),
            duration_ms,
        });
        Ok(run)
    }

    /// Fingerprint each document and run the single-document checks.
    /// A fault in one document is recorded as a note; the rest of the
    /// snapshot continues.
    fn analyze_documents(
        &self,
        documents: Vec<DocumentRecord>,
        stage: &mut RunResult,
    ) -> (Vec<(DocumentRecord, DocumentFingerprint)>, Vec<EvidencePattern>) {
        let mut fingerprinted = Vec::with_capacity(documents.len());
        let mut patterns = Vec::new();

        for doc in documents {
            match &doc.text {
                None => stage.add_error(InputError::MissingText { id: doc.id.clone() }),
                Some(text) if text.trim().is_empty() => {
                    stage.add_error(InputError::EmptyDocument { id: doc.id.clone() })
                }
                Some(_) => {}
            }
            let outcome = std::panic::catch_unwind(AssertUnwindSafe(|| {
                let fingerprint = extract_fingerprint(doc.text_or_empty(), &doc.title);
                let doc_patterns = detectors::analyze_document(&doc);
                (fingerprint, doc_patterns)
            }));
            match outcome {
                Ok((fingerprint, doc_patterns)) => {
                    patterns.extend(doc_patterns);
                    fingerprinted.push((doc, fingerprint));
                }
                Err(_) => {
                    stage.add_error(InputError::AnalysisFaulted { id: doc.id.clone() });
                }
            }
        }
        (fingerprinted, patterns)
    }

    fn fail_run(&self, run_id: &str, reason: &str) {
        tracing::warn!(%run_id, reason, "analysis run failed, prior results retained");
        self.dispatcher.emit_run_failed(&RunFailedEvent {
            run_id: run_id.to_string(),
            reason: reason.to_string(),
        });
    }

    fn commit(&self, run: Arc<AnalysisRun>) {
        {
            let mut current = self
                .current
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            *current = Some(run.clone());
        }
        let mut history = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        history.push(run);
        let overflow = history.len().saturating_sub(self.config.history_limit);
        if overflow > 0 {
            history.drain(..overflow);
        }
    }

    /// Start the watch loop: weights polling on `poll_interval`,
    /// periodic re-score on `run_interval`. Weights swaps trigger an
    /// immediate re-run.
    pub fn spawn_watch(
        self: &Arc<Self>,
        probe: Arc<dyn ChangeProbe>,
    ) -> WatchHandle {
        let (shutdown_tx, shutdown_rx) = bounded::<()>(0);
        let coordinator = Arc::clone(self);

        let thread = std::thread::spawn(move || {
            let poll_tick = tick(coordinator.config.poll_interval);
            let run_tick = tick(coordinator.config.run_interval);
            loop {
                select! {
                    recv(shutdown_rx) -> _ => break,
                    recv(poll_tick) -> _ => {
                        match coordinator.store.poll(probe.as_ref()) {
                            ReloadOutcome::Reloaded { version } => {
                                coordinator.dispatcher.emit_weights_reloaded(
                                    &WeightsReloadedEvent { version },
                                );
                                let _ = coordinator.trigger(Trigger::WeightsChanged);
                            }
                            ReloadOutcome::Rejected { reason } => {
                                coordinator.dispatcher.emit_weights_rejected(
                                    &WeightsRejectedEvent {
                                        reason,
                                        retained_version: coordinator
                                            .store
                                            .snapshot()
                                            .config
                                            .version
                                            .clone(),
                                    },
                                );
                            }
                            ReloadOutcome::Unchanged => {}
                        }
                    }
                    recv(run_tick) -> _ => {
                        let _ = coordinator.trigger(Trigger::Timer);
                    }
                }
            }
        });

        WatchHandle {
            shutdown: shutdown_tx,
            thread,
        }
    }
}

/// Handle to a running watch loop.
pub struct WatchHandle {
    shutdown: Sender<()>,
    thread: JoinHandle<()>,
}

impl WatchHandle {
    /// Stop the loop and wait for it to exit.
    pub fn shutdown(self) {
        let _ = self.shutdown.send(());
        let _ = self.thread.join();
    }

    /// Block until the loop exits on its own.
    pub fn join(self) {
        let _ = self.thread.join();
    }
}
