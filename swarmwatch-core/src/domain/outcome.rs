//! Terminal outcome of a monitored job

use std::fmt;

/// The monitor's final classification of a job
///
/// Computed exactly once, when the polling loop exits. Drives the process
/// exit code and nothing else; cleanup is attempted regardless of variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The job completed with exit code 0
    Succeeded,
    /// The job reached a terminal state with a known non-zero exit code
    FailedWithCode(i32),
    /// The job reached a failed terminal state without reporting a code
    FailedNoCode,
    /// No terminal state was observed within the time budget
    TimedOut,
    /// The engine query itself failed; infrastructure, not job failure
    ObservationError(String),
}

impl Outcome {
    /// Maps the classification to the calling process's exit status
    ///
    /// The job's own exit code is passed through when known so callers can
    /// distinguish failure reasons; everything else collapses to 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Succeeded => 0,
            Self::FailedWithCode(code) => *code,
            Self::FailedNoCode | Self::TimedOut | Self::ObservationError(_) => 1,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded => write!(f, "job succeeded"),
            Self::FailedWithCode(code) => write!(f, "job failed with exit code {code}"),
            Self::FailedNoCode => write!(f, "job failed without reporting an exit code"),
            Self::TimedOut => write!(f, "job timed out before reaching a terminal state"),
            Self::ObservationError(msg) => write!(f, "failed to observe job: {msg}"),
        }
    }
}
