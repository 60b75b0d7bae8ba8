//! Service configuration

use std::time::Duration;

use ::config::{Config, ConfigError, Environment};
use serde::Deserialize;

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Budget for validating one request, repository lookups included
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    /// Load the configuration from environment variables
    ///
    /// # Environment Variables
    /// - `AUTH_HOST`: Interface to bind (default: "0.0.0.0")
    /// - `AUTH_PORT`: Port to listen on (default: 3000)
    /// - `AUTH_REQUEST_TIMEOUT_SECS`: Per-request validation budget (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 3000_i64)?
            .set_default("request_timeout_secs", 10_i64)?
            .add_source(Environment::with_prefix("AUTH").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
