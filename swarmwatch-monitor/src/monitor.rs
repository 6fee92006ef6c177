//! Lifecycle monitor
//!
//! The polling loop that watches one job until it reaches a terminal
//! outcome or exhausts its time budget. One poll per tick, so a budget
//! expressed in whole ticks directly bounds the number of polls.

use std::sync::Arc;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::cleanup::ResourceCleaner;
use crate::config::MonitorConfig;
use crate::observer::StateObserver;
use crate::streamer::{LogSource, OutputStreamer};
use swarmwatch_core::classify::classify;
use swarmwatch_core::domain::handle::JobHandle;
use swarmwatch_core::domain::outcome::Outcome;
use swarmwatch_core::domain::task::TaskObservation;

/// Watches a single job to a decision
///
/// Owns the polling loop's lifetime; the streamer, when enabled, is a
/// spawned task joined with a short grace period on a terminal
/// classification and abandoned on timeout. Cleanup is attempted after
/// the outcome is computed and can never change it.
pub struct LifecycleMonitor {
    observer: Arc<dyn StateObserver>,
    logs: Arc<dyn LogSource>,
    cleaner: Arc<dyn ResourceCleaner>,
    config: MonitorConfig,
}

impl LifecycleMonitor {
    /// Creates a monitor from its engine-facing collaborators
    pub fn new(
        observer: Arc<dyn StateObserver>,
        logs: Arc<dyn LogSource>,
        cleaner: Arc<dyn ResourceCleaner>,
        config: MonitorConfig,
    ) -> Self {
        Self {
            observer,
            logs,
            cleaner,
            config,
        }
    }

    /// Runs the job to a decision and returns its outcome
    ///
    /// Not interruptible from outside; the only exit paths are a terminal
    /// observation, the time budget, or a failed observation.
    pub async fn run(&self, handle: &JobHandle) -> Outcome {
        info!(
            "monitoring service {} (budget: {} tick(s))",
            handle.id, handle.time_budget
        );

        let streamer = if handle.stream_output {
            Some(OutputStreamer::spawn(
                Arc::clone(&self.logs),
                handle.id.clone(),
            ))
        } else {
            None
        };

        let outcome = self.poll_until_decided(handle).await;

        if let Some(streamer) = streamer {
            if outcome == Outcome::TimedOut {
                // The budget is spent; do not hang waiting for log output.
                drop(streamer);
            } else {
                let _ = time::timeout(self.config.stream_grace, streamer).await;
            }
        }

        if handle.delete_on_exit {
            if let Err(e) = self.cleaner.delete(&handle.id).await {
                warn!("failed to delete service {}: {}", handle.id, e);
            } else {
                debug!("deleted service {}", handle.id);
            }
        }

        outcome
    }

    /// The polling loop proper: one observation per tick
    async fn poll_until_decided(&self, handle: &JobHandle) -> Outcome {
        let mut interval = time::interval(self.config.tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval fires immediately; consume it so
        // every loop iteration waits out one full tick before polling.
        interval.tick().await;

        for tick in 1..=handle.time_budget {
            interval.tick().await;

            let observations = match self.observe_guarded(&handle.id).await {
                Ok(observations) => observations,
                Err(message) => {
                    warn!("observation failed on tick {}: {}", tick, message);
                    return Outcome::ObservationError(message);
                }
            };

            if let Some(outcome) = classify(&observations) {
                info!("service {} reached a terminal state on tick {}", handle.id, tick);
                return outcome;
            }

            debug!(
                "tick {}/{}: service {} not terminal yet ({} task(s))",
                tick,
                handle.time_budget,
                handle.id,
                observations.len()
            );
        }

        Outcome::TimedOut
    }

    /// One state query under its own bounded-duration guard
    ///
    /// A hard query error escalates immediately. A guard expiry is retried
    /// within the same tick up to the configured count, so a single hung
    /// round trip cannot silently extend the observed budget.
    async fn observe_guarded(&self, service_id: &str) -> Result<Vec<TaskObservation>, String> {
        let attempts = self.config.poll_retries + 1;

        for attempt in 1..=attempts {
            match time::timeout(self.config.poll_timeout, self.observer.observe(service_id)).await {
                Ok(Ok(observations)) => return Ok(observations),
                Ok(Err(e)) => return Err(e.to_string()),
                Err(_) => warn!(
                    "state query exceeded {:?} (attempt {}/{})",
                    self.config.poll_timeout, attempt, attempts
                ),
            }
        }

        Err(format!(
            "state query timed out {} time(s) in a row",
            attempts
        ))
    }
}
