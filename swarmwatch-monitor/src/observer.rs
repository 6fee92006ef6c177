//! State observer
//!
//! The per-tick query for a job's task states. Trait-based so the polling
//! loop can be exercised against scripted observation sequences in tests.

use async_trait::async_trait;
use std::sync::Arc;
use swarmwatch_client::{ClientError, EngineClient};
use swarmwatch_core::domain::task::TaskObservation;

/// Queries the engine for the current task states of a job
///
/// Pure read with no side effects on the engine. An error here means the
/// query itself failed (network, auth, unknown service) and is distinct
/// from the job legitimately reaching a failed state.
#[async_trait]
pub trait StateObserver: Send + Sync {
    /// Fetches the current task observations for a service
    ///
    /// # Arguments
    /// * `service_id` - The engine service id
    async fn observe(&self, service_id: &str) -> Result<Vec<TaskObservation>, ClientError>;
}

/// Engine-backed implementation of [`StateObserver`]
pub struct EngineObserver {
    client: Arc<EngineClient>,
}

impl EngineObserver {
    /// Creates an observer over an engine client
    pub fn new(client: Arc<EngineClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StateObserver for EngineObserver {
    async fn observe(&self, service_id: &str) -> Result<Vec<TaskObservation>, ClientError> {
        self.client.list_tasks(service_id).await
    }
}
