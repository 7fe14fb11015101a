//! Normalized result of an endpoint call and the status codes used in
//! invocation envelopes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// HTTP status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusCode(pub u16);

impl StatusCode {
    pub const OK: StatusCode = StatusCode(200);
    pub const BAD_REQUEST: StatusCode = StatusCode(400);
    pub const INTERNAL_SERVER_ERROR: StatusCode = StatusCode(500);
}

impl Default for StatusCode {
    fn default() -> Self {
        StatusCode::OK
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        StatusCode(code)
    }
}

impl From<StatusCode> for u16 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

/// Decoded response body.
///
/// Bodies that are valid JSON are kept as a JSON value; anything else falls
/// back to the raw text. Serializes untagged, so the envelope carries either
/// the JSON value itself or a JSON string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ResponseData {
    Json(Value),
    Text(String),
}

impl ResponseData {
    /// Parse `body` as JSON, falling back to its (lossy UTF-8) text.
    pub fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice(body) {
            Ok(value) => ResponseData::Json(value),
            Err(_) => ResponseData::Text(String::from_utf8_lossy(body).into_owned()),
        }
    }
}

/// Result of one successful endpoint call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseResult {
    /// Status code returned by the endpoint.
    pub status_code: u16,
    /// Response headers, names lower-cased.
    pub headers: HashMap<String, String>,
    /// Decoded body.
    pub data: ResponseData,
    /// Seconds between sending the request and receiving response headers.
    pub elapsed_time: f64,
}
