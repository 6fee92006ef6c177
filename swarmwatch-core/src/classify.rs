//! Observation classification
//!
//! Turns one poll's worth of task observations into a terminal outcome, or
//! `None` when the job is still in flight. The engine may retain several
//! task instances for one job (a failed instance plus its reschedule), so
//! classification first settles which instance is authoritative.

use crate::domain::outcome::Outcome;
use crate::domain::task::{TaskObservation, TaskState};

/// Classifies a set of observations from a single poll
///
/// Returns `None` while no task instance has reached a terminal state.
/// When several instances are terminal, the one with the most recent
/// status timestamp governs; array position carries no meaning.
pub fn classify(observations: &[TaskObservation]) -> Option<Outcome> {
    let authoritative = observations
        .iter()
        .filter(|obs| obs.state.is_terminal())
        .max_by_key(|obs| obs.observed_at)?;

    Some(classify_terminal(authoritative))
}

/// Maps one terminal observation to an outcome
///
/// `Complete` without a reported code counts as success: the engine only
/// marks a task complete when its container exited cleanly. A zero code on
/// any failed state is treated as missing, since the failure signal came
/// from the engine rather than the container.
fn classify_terminal(obs: &TaskObservation) -> Outcome {
    match (obs.state, obs.exit_code) {
        (TaskState::Complete, Some(0) | None) => Outcome::Succeeded,
        // A code outside i32 cannot round-trip through a process exit
        // status; collapse it to 1 rather than let truncation reach 0.
        (_, Some(code)) if code != 0 => {
            Outcome::FailedWithCode(i32::try_from(code).unwrap_or(1))
        }
        _ => Outcome::FailedNoCode,
    }
}
