//! Best-effort resource cleanup
//!
//! Deletes the job's service after the outcome is decided. Failure here is
//! logged and never changes the already-computed exit code.

use async_trait::async_trait;
use std::sync::Arc;
use swarmwatch_client::{ClientError, EngineClient};
use tracing::debug;

/// Deletes a job's engine resources
#[async_trait]
pub trait ResourceCleaner: Send + Sync {
    /// Deletes the service and its remaining tasks
    ///
    /// # Arguments
    /// * `service_id` - The engine service id
    async fn delete(&self, service_id: &str) -> Result<(), ClientError>;
}

/// Engine-backed implementation of [`ResourceCleaner`]
pub struct EngineCleaner {
    client: Arc<EngineClient>,
}

impl EngineCleaner {
    /// Creates a cleaner over an engine client
    pub fn new(client: Arc<EngineClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResourceCleaner for EngineCleaner {
    async fn delete(&self, service_id: &str) -> Result<(), ClientError> {
        match self.client.delete_service(service_id).await {
            Err(e) if e.is_not_found() => {
                // Already gone; nothing left to clean up.
                debug!("service {} not found during cleanup", service_id);
                Ok(())
            }
            other => other,
        }
    }
}
