//! Task listing
//!
//! Maps the engine's task records into domain observations. The wire shapes
//! here cover only the fields the monitor classifies on; the engine returns
//! far more and serde ignores the rest.

use crate::EngineClient;
use crate::error::Result;
use serde::Deserialize;
use swarmwatch_core::domain::task::{TaskObservation, TaskState};
use tracing::debug;

impl EngineClient {
    /// List the current task instances of a service
    ///
    /// Pure read; one call per poll tick. A service that has not scheduled
    /// any task yet yields an empty list, which the monitor treats as
    /// still-in-flight.
    ///
    /// # Arguments
    /// * `service_id` - The engine service id
    ///
    /// # Returns
    /// One observation per task instance the engine currently retains,
    /// including instances that already failed and were rescheduled
    pub async fn list_tasks(&self, service_id: &str) -> Result<Vec<TaskObservation>> {
        let url = format!("{}/tasks", self.base_url);
        let filters = serde_json::json!({ "service": [service_id] }).to_string();

        let response = self
            .client
            .get(&url)
            .query(&[("filters", filters.as_str())])
            .send()
            .await?;

        let tasks: Vec<Task> = self.handle_response(response).await?;
        debug!(
            "service {} has {} task instance(s)",
            service_id,
            tasks.len()
        );
        Ok(tasks.into_iter().map(TaskObservation::from).collect())
    }
}

/// Engine task record (subset)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Task {
    #[serde(rename = "ID")]
    id: String,
    status: TaskStatus,
    desired_state: TaskState,
}

/// Engine task status block
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct TaskStatus {
    timestamp: chrono::DateTime<chrono::Utc>,
    state: TaskState,
    err: Option<String>,
    container_status: Option<ContainerStatus>,
}

/// Container-level status, absent until a container was created
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ContainerStatus {
    exit_code: Option<i64>,
}

impl From<Task> for TaskObservation {
    fn from(task: Task) -> Self {
        TaskObservation {
            task_id: task.id,
            state: task.status.state,
            desired_state: task.desired_state,
            exit_code: task.status.container_status.and_then(|cs| cs.exit_code),
            error_message: task.status.err,
            observed_at: task.status.timestamp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trimmed from a real `GET /tasks` response.
    const TASK_JSON: &str = r#"{
        "ID": "0kzzo1i0y4jz6027t0k7aezc7",
        "Version": { "Index": 71 },
        "CreatedAt": "2024-07-06T17:30:07.853781916Z",
        "UpdatedAt": "2024-07-06T17:30:12.278066449Z",
        "ServiceID": "9mnpnzenvg8p8tdbtq4wvbkcz",
        "Status": {
            "Timestamp": "2024-07-06T17:30:12.124914177Z",
            "State": "complete",
            "Message": "finished",
            "ContainerStatus": {
                "ContainerID": "e5d62702a1b48d01c3e02ca1e0212a250801fa8d67caca0b6f35919ebc12f035",
                "ExitCode": 0
            }
        },
        "DesiredState": "shutdown"
    }"#;

    #[test]
    fn test_task_observation_from_wire() {
        let task: Task = serde_json::from_str(TASK_JSON).unwrap();
        let obs = TaskObservation::from(task);

        assert_eq!(obs.task_id, "0kzzo1i0y4jz6027t0k7aezc7");
        assert_eq!(obs.state, TaskState::Complete);
        assert_eq!(obs.desired_state, TaskState::Shutdown);
        assert_eq!(obs.exit_code, Some(0));
        assert_eq!(obs.error_message, None);
    }

    #[test]
    fn test_task_without_container_status() {
        let json = r#"{
            "ID": "abc",
            "Status": {
                "Timestamp": "2024-07-06T17:30:07.853781916Z",
                "State": "pending",
                "Err": "no suitable node"
            },
            "DesiredState": "running"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        let obs = TaskObservation::from(task);

        assert_eq!(obs.state, TaskState::Pending);
        assert_eq!(obs.exit_code, None);
        assert_eq!(obs.error_message.as_deref(), Some("no suitable node"));
    }
}
