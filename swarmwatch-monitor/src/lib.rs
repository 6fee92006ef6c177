//! Swarmwatch Monitor
//!
//! The lifecycle monitor for a single run-to-completion service.
//!
//! Architecture:
//! - Configuration: tick cadence, per-poll guard, streamer grace period
//! - Observer: the per-tick task state query, behind a trait seam
//! - Streamer: concurrent log forwarding with frame demultiplexing
//! - Cleanup: best-effort service deletion after the outcome is decided
//! - Monitor: the polling loop that classifies observations into an outcome
//!
//! All engine access goes through trait objects so the loop can be driven
//! by scripted observations in tests.

mod cleanup;
mod config;
mod monitor;
mod observer;
mod streamer;

pub use cleanup::{EngineCleaner, ResourceCleaner};
pub use config::MonitorConfig;
pub use monitor::LifecycleMonitor;
pub use observer::{EngineObserver, StateObserver};
pub use streamer::{EngineLogSource, LogSource, OutputStreamer};
