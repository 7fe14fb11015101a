//! Request descriptor for the outbound endpoint call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// HTTP method used when none is configured.
pub const DEFAULT_METHOD: &str = "POST";

/// Request timeout in seconds used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Fully-resolved parameters for one outbound HTTP call.
///
/// A descriptor is built once per invocation and is not modified after it
/// has been handed to the [`EndpointCaller`](crate::caller::EndpointCaller).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestDescriptor {
    /// Endpoint URL.
    pub url: String,
    /// HTTP method token (e.g. "GET", "POST").
    pub method: String,
    /// Headers sent verbatim with the request.
    pub headers: HashMap<String, String>,
    /// JSON payload, omitted from the request when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    /// Total request timeout in seconds.
    pub timeout: u64,
}

impl RequestDescriptor {
    /// Create a descriptor for `url` with the default method and timeout.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: DEFAULT_METHOD.to_string(),
            headers: HashMap::new(),
            body: None,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Set the HTTP method.
    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    /// Replace all headers.
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Set the JSON body.
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.timeout = secs;
        self
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}
