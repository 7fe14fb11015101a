//! Serverless function trait and invocation context.

use crate::function::InvocationResponse;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version reported when the platform does not provide one.
pub const DEFAULT_FUNCTION_VERSION: &str = "$LATEST";

/// Identifying metadata of one invocation.
///
/// Only used for logging; never influences what the function does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationContext {
    /// Function name.
    pub function_name: String,
    /// Function version.
    pub function_version: String,
    /// Request ID for tracing.
    pub request_id: String,
}

impl InvocationContext {
    /// Create a new invocation context.
    pub fn new(function_name: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            function_name: function_name.into(),
            function_version: DEFAULT_FUNCTION_VERSION.to_string(),
            request_id: request_id.into(),
        }
    }

    /// Set the function version.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.function_version = version.into();
        self
    }

    /// Build a context from the Lambda-style `AWS_LAMBDA_FUNCTION_NAME` and
    /// `AWS_LAMBDA_FUNCTION_VERSION` variables, falling back to `default_name`.
    pub fn from_env(default_name: &str, request_id: impl Into<String>) -> Self {
        let name = std::env::var("AWS_LAMBDA_FUNCTION_NAME").unwrap_or_else(|_| default_name.to_string());
        let version = std::env::var("AWS_LAMBDA_FUNCTION_VERSION")
            .unwrap_or_else(|_| DEFAULT_FUNCTION_VERSION.to_string());
        Self::new(name, request_id).with_version(version)
    }
}

/// A serverless function invoked once per event.
///
/// Implementations always answer with an [`InvocationResponse`]; failures are
/// expressed through its status code rather than through `Err`.
#[async_trait]
pub trait ServerlessFunction: Send + Sync {
    /// Handle one invocation.
    async fn invoke(&self, event: Value, ctx: &InvocationContext) -> InvocationResponse;

    /// Get the function name.
    fn name(&self) -> &str;
}

/// Generate a unique request ID.
pub fn generate_request_id() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{:x}", timestamp)
}
