//! Service log attachment and deletion

use crate::EngineClient;
use crate::error::{ClientError, Result};
use futures_util::TryStreamExt;
use tokio::io::AsyncRead;
use tokio_util::io::StreamReader;
use tracing::debug;

/// A raw byte stream of a service's output
///
/// Carries the engine's multiplexed log frames verbatim; demultiplexing
/// into stdout payload is the streamer's job, not the client's.
pub type LogStream = Box<dyn AsyncRead + Send + Unpin>;

impl EngineClient {
    /// Attach to a service's log stream
    ///
    /// In follow mode the engine keeps the connection open and closes it
    /// once the task is terminal and all output has been delivered. The
    /// call fails independently of task listing (the daemon may not
    /// support service logs in its current mode); callers are expected to
    /// degrade rather than abort.
    ///
    /// # Arguments
    /// * `service_id` - The engine service id
    /// * `follow` - Keep the stream open until the task terminates
    pub async fn service_logs(&self, service_id: &str, follow: bool) -> Result<LogStream> {
        debug!(
            "attaching to logs for service {} (follow: {})",
            service_id, follow
        );

        let url = format!("{}/services/{}/logs", self.base_url, service_id);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("stdout", "true"),
                ("stderr", "true"),
                ("follow", if follow { "true" } else { "false" }),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        let stream = Box::pin(response.bytes_stream().map_err(std::io::Error::other));
        Ok(Box::new(StreamReader::new(stream)))
    }

    /// Delete a service and its remaining tasks
    ///
    /// Best-effort teardown; the engine returns 404 if the service is
    /// already gone.
    ///
    /// # Arguments
    /// * `service_id` - The engine service id
    pub async fn delete_service(&self, service_id: &str) -> Result<()> {
        debug!("deleting service {}", service_id);

        let url = format!("{}/services/{}", self.base_url, service_id);
        let response = self.client.delete(&url).send().await?;

        self.handle_empty_response(response).await
    }
}
