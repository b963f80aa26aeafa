//! Configuration Module
//!
//! Handles loading and managing client configuration from environment variables.

use std::env;

/// Client configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the remote expense store
    pub base_url: String,
    /// Per-request timeout in seconds for remote calls
    pub request_timeout: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `EXPENSES_API_URL` - Remote store base URL (default: http://localhost:8080)
    /// - `REQUEST_TIMEOUT_SECS` - Remote call timeout in seconds (default: 10)
    pub fn from_env() -> Self {
        Self {
            base_url: env::var("EXPENSES_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            request_timeout: env::var("REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            request_timeout: 10,
        }
    }
}
