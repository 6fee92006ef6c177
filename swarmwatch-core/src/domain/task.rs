//! Task domain types
//!
//! A job fans out to one or more task instances over its lifetime (the
//! engine reschedules after node failure), so every poll yields a set of
//! observations rather than a single one.

use serde::{Deserialize, Serialize};

/// Execution state of a task instance, as reported by the engine
///
/// Ordered by lifecycle: everything before `Complete` is non-terminal.
/// Serialized in the engine's lowercase wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskState {
    New,
    Pending,
    Assigned,
    Accepted,
    Preparing,
    Starting,
    Running,
    Complete,
    Failed,
    Shutdown,
    Rejected,
    Orphaned,
}

impl TaskState {
    /// True when the engine will not progress this task instance any further
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Complete | Self::Failed | Self::Shutdown | Self::Rejected | Self::Orphaned
        )
    }
}

/// One task instance's state as seen by a single poll
///
/// Fresh every poll; superseded by the next observation. Only the current
/// state is a terminal signal -- the desired state churns during scheduling
/// retries and must never be used to classify.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskObservation {
    /// Engine task id, identifying the instance across polls
    pub task_id: String,
    /// Current execution state
    pub state: TaskState,
    /// State the engine is driving the task towards
    pub desired_state: TaskState,
    /// Container exit code, present once the container has exited
    pub exit_code: Option<i64>,
    /// Engine-reported error message, if any
    pub error_message: Option<String>,
    /// When the engine recorded this status
    pub observed_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_states() {
        let terminal = [
            TaskState::Complete,
            TaskState::Failed,
            TaskState::Shutdown,
            TaskState::Rejected,
            TaskState::Orphaned,
        ];
        let running = [
            TaskState::New,
            TaskState::Pending,
            TaskState::Assigned,
            TaskState::Accepted,
            TaskState::Preparing,
            TaskState::Starting,
            TaskState::Running,
        ];

        for state in terminal {
            assert!(state.is_terminal(), "{state:?} should be terminal");
        }
        for state in running {
            assert!(!state.is_terminal(), "{state:?} should not be terminal");
        }
    }

    #[test]
    fn test_wire_form_is_lowercase() {
        let json = serde_json::to_string(&TaskState::Complete).unwrap();
        assert_eq!(json, "\"complete\"");

        let state: TaskState = serde_json::from_str("\"shutdown\"").unwrap();
        assert_eq!(state, TaskState::Shutdown);
    }
}
