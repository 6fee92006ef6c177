//! Monitor configuration
//!
//! Defines the timing knobs of the polling loop: the tick cadence, the
//! per-poll guard, and how long to wait for trailing log output.

use std::time::Duration;

/// Monitor configuration
///
/// The time budget itself lives on the job handle; everything here shapes
/// how a single run spends that budget.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Duration of one poll tick; the budget is expressed in whole ticks
    pub tick: Duration,

    /// Upper bound on a single state query round trip, independent of the
    /// tick clock, so one hung poll cannot silently extend the budget
    pub poll_timeout: Duration,

    /// How many times a timed-out poll is retried within its tick before
    /// the run is declared an observation error
    pub poll_retries: u32,

    /// Grace period granted to the streamer to flush trailing output once
    /// a terminal classification is reached
    pub stream_grace: Duration,
}

impl MonitorConfig {
    /// Creates configuration from environment variables
    ///
    /// Recognized variables (all optional):
    /// - SWARMWATCH_TICK_SECS (default: 1)
    /// - SWARMWATCH_POLL_TIMEOUT_SECS (default: 10)
    /// - SWARMWATCH_POLL_RETRIES (default: 2)
    /// - SWARMWATCH_STREAM_GRACE_SECS (default: 2)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            tick: env_secs("SWARMWATCH_TICK_SECS").unwrap_or(defaults.tick),
            poll_timeout: env_secs("SWARMWATCH_POLL_TIMEOUT_SECS").unwrap_or(defaults.poll_timeout),
            poll_retries: std::env::var("SWARMWATCH_POLL_RETRIES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.poll_retries),
            stream_grace: env_secs("SWARMWATCH_STREAM_GRACE_SECS").unwrap_or(defaults.stream_grace),
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.tick.is_zero() {
            anyhow::bail!("tick must be greater than 0");
        }

        if self.poll_timeout.is_zero() {
            anyhow::bail!("poll_timeout must be greater than 0");
        }

        Ok(())
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_secs(1),
            poll_timeout: Duration::from_secs(10),
            poll_retries: 2,
            stream_grace: Duration::from_secs(2),
        }
    }
}

fn env_secs(name: &str) -> Option<Duration> {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MonitorConfig::default();
        assert_eq!(config.tick, Duration::from_secs(1));
        assert_eq!(config.poll_timeout, Duration::from_secs(10));
        assert_eq!(config.poll_retries, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = MonitorConfig::default();
        assert!(config.validate().is_ok());

        config.tick = Duration::ZERO;
        assert!(config.validate().is_err());

        config.tick = Duration::from_secs(1);
        config.poll_timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }
}
