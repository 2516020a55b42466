//! Veracity operational binary.
//!
//! Run-once mode executes one analysis pass and exits; watch mode
//! keeps polling the weights file and re-running on changes or on the
//! periodic timer. Exit status distinguishes a clean run (0) from a
//! run served by degraded/default weights (2) and a fatal startup
//! failure (1).

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use veracity_core::events::{
    EngineEventHandler, EventDispatcher, RunCompletedEvent, RunFailedEvent,
    WeightsRejectedEvent, WeightsReloadedEvent,
};
use veracity_engine::{
    AnalysisCoordinator, ArtifactWriter, CoordinatorConfig, FileMtimeProbe,
    JsonFileSource, Trigger, WeightsStore,
};

const EXIT_OK: u8 = 0;
const EXIT_FATAL: u8 = 1;
const EXIT_DEGRADED_WEIGHTS: u8 = 2;

#[derive(Parser)]
#[command(name = "veracity", version, about = "Evidence integrity analysis engine")]
struct Cli {
    /// Documents snapshot: JSON array of document records.
    #[arg(long, value_name = "PATH")]
    documents: PathBuf,

    /// Rule-weights file (TOML).
    #[arg(long, value_name = "PATH", default_value = "weights.toml")]
    weights: PathBuf,

    /// Output directory for run artifacts.
    #[arg(long, value_name = "DIR", default_value = "out")]
    out: PathBuf,

    /// Keep watching: poll the weights file and re-run periodically.
    #[arg(long)]
    watch: bool,

    /// Re-score cadence in watch mode, seconds.
    #[arg(long, value_name = "SECS", default_value_t = 300)]
    interval: u64,

    /// Weights polling cadence in watch mode, seconds.
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    poll_interval: u64,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Logs engine lifecycle events for the operator.
struct LogHandler;

impl EngineEventHandler for LogHandler {
    fn on_run_completed(&self, event: &RunCompletedEvent) {
        tracing::info!(
            run_id = %event.run_id,
            risk = %event.risk_level,
            patterns = event.pattern_count,
            duration_ms = event.duration_ms,
            "run completed"
        );
    }

    fn on_run_failed(&self, event: &RunFailedEvent) {
        tracing::warn!(run_id = %event.run_id, reason = %event.reason, "run failed");
    }

    fn on_weights_reloaded(&self, event: &WeightsReloadedEvent) {
        tracing::info!(version = %event.version, "weights reloaded");
    }

    fn on_weights_rejected(&self, event: &WeightsRejectedEvent) {
        tracing::warn!(
            reason = %event.reason,
            retained = %event.retained_version,
            "weights rejected, prior snapshot retained"
        );
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let store = Arc::new(WeightsStore::open(&cli.weights));

    let writer = match ArtifactWriter::new(&cli.out) {
        Ok(writer) => writer,
        Err(err) => {
            eprintln!("fatal: {err}");
            return ExitCode::from(EXIT_FATAL);
        }
    };

    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(LogHandler));

    let config = CoordinatorConfig {
        run_interval: Duration::from_secs(cli.interval),
        poll_interval: Duration::from_secs(cli.poll_interval),
        ..CoordinatorConfig::default()
    };
    let coordinator = Arc::new(AnalysisCoordinator::new(
        store.clone(),
        Arc::new(JsonFileSource::new(&cli.documents)),
        Some(writer),
        dispatcher,
        config,
    ));

    if let Err(err) = coordinator.trigger(Trigger::Explicit) {
        if cli.watch {
            tracing::warn!(%err, "initial run failed, continuing in watch mode");
        } else {
            eprintln!("fatal: {err}");
            return ExitCode::from(EXIT_FATAL);
        }
    }

    if cli.watch {
        let handle =
            coordinator.spawn_watch(Arc::new(FileMtimeProbe::new(&cli.weights)));
        tracing::info!("watching for weights changes, stop with SIGINT");
        // The watch loop owns the process from here; SIGINT ends it.
        handle.join();
    }

    if store.is_degraded() {
        ExitCode::from(EXIT_DEGRADED_WEIGHTS)
    } else {
        ExitCode::from(EXIT_OK)
    }
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
