//! Local runtime configuration.

use crate::function::endpoint::FUNCTION_NAME;
use crate::function::handler::DEFAULT_FUNCTION_VERSION;
use serde::{Deserialize, Serialize};

/// Configuration for the invocation server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Function name reported in each invocation context.
    pub function_name: String,
    /// Function version reported in each invocation context.
    pub function_version: String,
    /// Whether to enable health check endpoint.
    pub enable_health: bool,
    /// Maximum event size in bytes.
    pub max_body_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            function_name: FUNCTION_NAME.to_string(),
            function_version: DEFAULT_FUNCTION_VERSION.to_string(),
            enable_health: true,
            max_body_size: 10 * 1024 * 1024, // 10MB
        }
    }
}

impl ServerConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the host address.
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn function_name(mut self, name: impl Into<String>) -> Self {
        self.function_name = name.into();
        self
    }

    pub fn function_version(mut self, version: impl Into<String>) -> Self {
        self.function_version = version.into();
        self
    }

    pub fn max_body_size(mut self, bytes: usize) -> Self {
        self.max_body_size = bytes;
        self
    }

    /// Get the bind address.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_builder() {
        let config = ServerConfig::new()
            .host("127.0.0.1")
            .port(9000)
            .function_name("caller")
            .function_version("3")
            .max_body_size(16);

        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.function_name, "caller");
        assert_eq!(config.function_version, "3");
        assert_eq!(config.max_body_size, 16);
        assert!(config.enable_health);
    }
}
