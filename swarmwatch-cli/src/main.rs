//! Swarmwatch CLI
//!
//! Watches an already-submitted run-to-completion service and exits with
//! the job's own exit code when known, else 1. Exit code 0 means verified
//! success.

use anyhow::Result;
use clap::Parser;
use colored::*;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use swarmwatch_client::EngineClient;
use swarmwatch_core::domain::handle::JobHandle;
use swarmwatch_core::domain::outcome::Outcome;
use swarmwatch_monitor::{
    EngineCleaner, EngineLogSource, EngineObserver, LifecycleMonitor, MonitorConfig,
};

#[derive(Parser)]
#[command(name = "swarmwatch")]
#[command(about = "Watch a one-shot swarm service to completion", long_about = None)]
struct Cli {
    /// Service id of the job to monitor
    service_id: String,

    /// Engine API URL
    #[arg(
        long,
        env = "SWARMWATCH_ENGINE_URL",
        default_value = "http://localhost:2375"
    )]
    engine_url: String,

    /// Ticks to wait for a terminal state before timing out
    #[arg(long, default_value_t = 60)]
    timeout: u64,

    /// Do not stream the job's output while waiting
    #[arg(long)]
    no_logs: bool,

    /// Delete the service once the outcome is decided
    #[arg(long)]
    rm: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr; the job's own output owns stdout.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "swarmwatch_cli=info,swarmwatch_monitor=info,swarmwatch_client=info".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = MonitorConfig::from_env();
    config.validate()?;

    let handle = JobHandle {
        id: cli.service_id,
        time_budget: cli.timeout,
        stream_output: !cli.no_logs,
        delete_on_exit: cli.rm,
    };

    info!("engine: {}", cli.engine_url);

    let client = Arc::new(EngineClient::new(cli.engine_url));
    let monitor = LifecycleMonitor::new(
        Arc::new(EngineObserver::new(Arc::clone(&client))),
        Arc::new(EngineLogSource::new(Arc::clone(&client))),
        Arc::new(EngineCleaner::new(Arc::clone(&client))),
        config,
    );

    let outcome = monitor.run(&handle).await;

    print_status(&outcome);
    std::process::exit(outcome.exit_code());
}

/// Prints the single human-readable status line for the run
fn print_status(outcome: &Outcome) {
    let line = outcome.to_string();
    let colored_line = match outcome {
        Outcome::Succeeded => line.green(),
        Outcome::FailedWithCode(_) | Outcome::FailedNoCode => line.red(),
        Outcome::TimedOut => line.yellow(),
        Outcome::ObservationError(_) => line.red(),
    };

    eprintln!("{}", colored_line);
}
