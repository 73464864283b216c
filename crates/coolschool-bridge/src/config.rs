use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Connection settings for the platform's HTTP API.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL every endpoint is resolved against. Should end with `/`.
    pub base_url: String,
    /// Per-request timeout in seconds. A request that exceeds it fails the
    /// phase it belongs to.
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1/".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Limits of the transient notification queue.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Maximum amount of notifications visible at once.
    pub max_visible: usize,
    /// Lifetime of a notification in milliseconds.
    pub unmount_after_ms: u64,
}

impl NotificationConfig {
    pub fn unmount_after(&self) -> Duration {
        Duration::from_millis(self.unmount_after_ms)
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            max_visible: 3,
            unmount_after_ms: 10_000,
        }
    }
}

/// Global application configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Configuration of the remote API.
    pub api: ApiConfig,
    /// Configuration of the notification queue.
    pub notifications: NotificationConfig,
}
