//! Endpoint configuration resolved from a key-value source.
//!
//! In production the source is the process environment. The recognised keys
//! are:
//!
//! | Key               | Meaning                         | Default |
//! |-------------------|---------------------------------|---------|
//! | `ENDPOINT_URL`    | URL to call (required)          |         |
//! | `HTTP_METHOD`     | HTTP method                     | `POST`  |
//! | `REQUEST_TIMEOUT` | timeout in whole seconds        | `30`    |
//! | `REQUEST_HEADERS` | JSON object of header values    | `{}`    |
//! | `REQUEST_DATA`    | JSON body                       | none    |
//!
//! Malformed `REQUEST_HEADERS` or `REQUEST_DATA` never fail resolution; they
//! are logged as warnings and replaced by empty headers or no body.

use crate::http::{RequestDescriptor, DEFAULT_METHOD, DEFAULT_TIMEOUT_SECS};
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

pub const ENDPOINT_URL: &str = "ENDPOINT_URL";
pub const HTTP_METHOD: &str = "HTTP_METHOD";
pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";
pub const REQUEST_HEADERS: &str = "REQUEST_HEADERS";
pub const REQUEST_DATA: &str = "REQUEST_DATA";

/// A key-value configuration source.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Configuration errors that stop an invocation before any call is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("No endpoint URL provided. Set ENDPOINT_URL environment variable.")]
    MissingEndpointUrl,

    #[error("Invalid REQUEST_TIMEOUT value '{0}': expected a positive number of seconds")]
    InvalidTimeout(String),
}

/// Endpoint configuration for one invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointConfig {
    pub endpoint_url: String,
    pub method: String,
    pub timeout: u64,
    pub headers: HashMap<String, String>,
    pub data: Option<Value>,
}

impl EndpointConfig {
    /// Resolve the configuration from `source`.
    pub fn resolve(source: &impl ConfigSource) -> Result<Self, ConfigError> {
        let endpoint_url = non_empty(source, ENDPOINT_URL).ok_or(ConfigError::MissingEndpointUrl)?;

        let method = source
            .get(HTTP_METHOD)
            .unwrap_or_else(|| DEFAULT_METHOD.to_string());

        let timeout = match source.get(REQUEST_TIMEOUT) {
            Some(raw) => parse_timeout(&raw)?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let headers = non_empty(source, REQUEST_HEADERS)
            .map(|raw| parse_headers(&raw))
            .unwrap_or_default();

        let data = non_empty(source, REQUEST_DATA).and_then(|raw| parse_data(&raw));

        Ok(Self {
            endpoint_url,
            method,
            timeout,
            headers,
            data,
        })
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn has_data(&self) -> bool {
        self.data.is_some()
    }

    /// Convert into the descriptor handed to the endpoint caller.
    pub fn into_descriptor(self) -> RequestDescriptor {
        let descriptor = RequestDescriptor::new(self.endpoint_url)
            .method(self.method)
            .headers(self.headers)
            .timeout(self.timeout);
        match self.data {
            Some(body) => descriptor.body(body),
            None => descriptor,
        }
    }
}

fn non_empty(source: &impl ConfigSource, key: &str) -> Option<String> {
    source.get(key).filter(|value| !value.is_empty())
}

fn parse_timeout(raw: &str) -> Result<u64, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .ok()
        .filter(|secs| *secs > 0)
        .ok_or_else(|| ConfigError::InvalidTimeout(raw.to_string()))
}

fn parse_headers(raw: &str) -> HashMap<String, String> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => map
            .into_iter()
            .filter_map(|(name, value)| match value {
                Value::Null => None,
                Value::String(value) => Some((name, value)),
                other => Some((name, other.to_string())),
            })
            .collect(),
        _ => {
            warn!("Invalid REQUEST_HEADERS JSON format, using empty headers");
            HashMap::new()
        }
    }
}

/// `null` is the same as no body.
fn parse_data(raw: &str) -> Option<Value> {
    match serde_json::from_str(raw) {
        Ok(Value::Null) => None,
        Ok(value) => Some(value),
        Err(e) => {
            warn!(error = %e, "Invalid REQUEST_DATA JSON format, ignoring data");
            None
        }
    }
}
