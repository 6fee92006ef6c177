//! Swarmwatch Engine Client
//!
//! A small, typed HTTP client for the container engine's REST API, limited
//! to the three operations the lifecycle monitor needs: listing a service's
//! tasks, attaching to a service's log stream, and deleting a service.
//!
//! The engine endpoint is an HTTP(S) URL (the daemon listening on TCP);
//! nothing here submits or mutates a service beyond deletion.
//!
//! # Example
//!
//! ```no_run
//! use swarmwatch_client::EngineClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EngineClient::new("http://localhost:2375");
//!     let tasks = client.list_tasks("my-service").await?;
//!     println!("{} task(s)", tasks.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod services;
mod tasks;

pub use error::{ClientError, Result};
pub use services::LogStream;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the container engine API
///
/// Covers the read-and-teardown surface the monitor relies on:
/// - Task listing (the per-poll state query)
/// - Log attachment (a follow-mode byte stream)
/// - Service deletion (best-effort cleanup)
#[derive(Debug, Clone)]
pub struct EngineClient {
    /// Base URL of the engine (e.g., "http://localhost:2375")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl EngineClient {
    /// Create a new engine client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the engine API (e.g., "http://localhost:2375")
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Create a new engine client with a custom HTTP client
    ///
    /// This allows configuring timeouts, proxies, TLS settings, etc.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the engine API
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the engine
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the
    /// request failed, or deserializes the response body if successful.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = EngineClient::new("http://localhost:2375");
        assert_eq!(client.base_url(), "http://localhost:2375");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = EngineClient::new("http://localhost:2375/");
        assert_eq!(client.base_url(), "http://localhost:2375");
    }
}
