//! Endpoint caller: performs the single outbound HTTP request of an
//! invocation and classifies its outcome.

mod error;

pub use error::CallError;

use crate::http::{RequestDescriptor, ResponseData, ResponseResult};
use error::error_chain;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{error, info, instrument};

/// Performs one HTTP call per [`RequestDescriptor`].
///
/// A fresh client is built for every call, so no connection outlives the
/// invocation that opened it.
#[derive(Debug, Clone, Default)]
pub struct EndpointCaller;

impl EndpointCaller {
    pub fn new() -> Self {
        Self
    }

    /// Call the endpoint described by `descriptor`.
    ///
    /// Produces exactly one [`ResponseResult`] or one [`CallError`]. Failures
    /// are logged here before being returned; nothing is retried.
    #[instrument(name = "call_endpoint", skip_all, fields(url = %descriptor.url))]
    pub async fn call(&self, descriptor: &RequestDescriptor) -> Result<ResponseResult, CallError> {
        info!(
            url = %descriptor.url,
            method = %descriptor.method,
            headers = ?descriptor.headers,
            "Calling endpoint"
        );

        let outcome = self.send(descriptor).await;
        if let Err(err) = &outcome {
            log_failure(err);
        }
        outcome
    }

    async fn send(&self, descriptor: &RequestDescriptor) -> Result<ResponseResult, CallError> {
        let method = Method::from_bytes(descriptor.method.to_ascii_uppercase().as_bytes())
            .map_err(|e| {
                CallError::unexpected(
                    &descriptor.url,
                    format!("Invalid HTTP method '{}': {}", descriptor.method, e),
                )
            })?;

        let client = Client::builder()
            .timeout(descriptor.timeout_duration())
            .build()
            .map_err(|e| CallError::unexpected(&descriptor.url, error_chain(&e)))?;

        let mut request = client.request(method, &descriptor.url);
        for (name, value) in &descriptor.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &descriptor.body {
            // Sets Content-Type only when the caller did not supply one.
            request = request.json(body);
        }

        let start = Instant::now();
        let response = request
            .send()
            .await
            .map_err(|e| CallError::from_transport(descriptor, e))?;
        let elapsed_time = start.elapsed().as_secs_f64();

        let status_code = response.status().as_u16();
        let headers = collect_headers(response.headers());
        let body = response
            .bytes()
            .await
            .map_err(|e| CallError::from_transport(descriptor, e))?;

        info!(
            url = %descriptor.url,
            status_code,
            response_time = elapsed_time,
            content_length = body.len(),
            "Endpoint response received"
        );

        Ok(ResponseResult {
            status_code,
            headers,
            data: ResponseData::parse(&body),
            elapsed_time,
        })
    }
}

fn log_failure(err: &CallError) {
    match err {
        CallError::Timeout { url, timeout } => {
            error!(url = %url, timeout = *timeout, "Request timeout");
        }
        CallError::Request { url, message } => {
            error!(url = %url, error = %message, "Request failed");
        }
        CallError::Unexpected { url, message } => {
            error!(url = %url, error = %message, "Unexpected error during request");
        }
    }
}

/// Flatten a header map; repeated headers are joined with ", ".
fn collect_headers(headers: &HeaderMap) -> HashMap<String, String> {
    let mut collected: HashMap<String, String> = HashMap::new();
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        match collected.entry(name.as_str().to_string()) {
            Entry::Occupied(mut entry) => {
                let existing = entry.get_mut();
                existing.push_str(", ");
                existing.push_str(&value);
            }
            Entry::Vacant(entry) => {
                entry.insert(value.into_owned());
            }
        }
    }
    collected
}
