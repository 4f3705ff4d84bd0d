use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the generation client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend API, e.g. `https://api.example.com`.
    pub base_url: String,

    /// Budget for one whole generation call. The backend pipeline runs for
    /// minutes on long answers; exceeding this surfaces as a client-side
    /// timeout, distinct from a timeout reported by the upstream provider.
    pub request_timeout: Duration,

    /// Budget for establishing the connection.
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            request_timeout: Duration::from_secs(600),
            connect_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.trim().is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(format!("base_url must be http(s): {}", self.base_url));
        }

        if self.request_timeout.is_zero() {
            return Err("request_timeout must be > 0".to_string());
        }

        if self.connect_timeout > self.request_timeout {
            return Err(format!(
                "connect_timeout ({:?}) cannot exceed request_timeout ({:?})",
                self.connect_timeout, self.request_timeout
            ));
        }

        Ok(())
    }
}
