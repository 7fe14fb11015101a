//! # Fezz Endpoint - a single-call serverless function
//!
//! `fezz-endpoint` is a serverless function that reads connection parameters
//! from its environment, issues one outbound HTTP request, and answers with a
//! JSON envelope describing the result or the failure.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   event    ┌──────────────────┐  descriptor  ┌────────────────┐
//! │ InvokeServer │ ─────────▶ │ EndpointFunction │ ───────────▶ │ EndpointCaller │ ──▶ endpoint
//! │  / `invoke`  │ ◀───────── │  (config, wrap)  │ ◀─────────── │ (call, classify│
//! └──────────────┘  envelope  └──────────────────┘ result/error └────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fezz_endpoint::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
//!     fezz_endpoint::logging::init()?;
//!
//!     let function = EndpointFunction::from_env();
//!     let ctx = InvocationContext::new("fezz-endpoint", generate_request_id());
//!     let response = function.invoke(serde_json::json!({}), &ctx).await;
//!
//!     println!("{}", serde_json::to_string(&response)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration
//!
//! | Variable          | Meaning                      | Default |
//! |-------------------|------------------------------|---------|
//! | `ENDPOINT_URL`    | URL to call (required)       |         |
//! | `HTTP_METHOD`     | HTTP method                  | `POST`  |
//! | `REQUEST_TIMEOUT` | timeout in seconds           | `30`    |
//! | `REQUEST_HEADERS` | JSON object of headers       | `{}`    |
//! | `REQUEST_DATA`    | JSON request body            | none    |
//!
//! ## Envelopes
//!
//! - success: `{"statusCode": 200, "body": "{\"message\": ..., \"result\": {...}}"}`
//! - missing `ENDPOINT_URL`: `{"statusCode": 400, "body": "{\"error\": ...}"}`
//! - any failure: `{"statusCode": 500, "body": "{\"error\": \"Internal server error\", \"message\": ...}"}`

pub mod caller;
pub mod config;
pub mod function;
pub mod http;
pub mod logging;
pub mod runtime;

/// Re-export commonly used types.
pub mod prelude {
    pub use crate::caller::{CallError, EndpointCaller};
    pub use crate::config::{ConfigError, ConfigSource, EndpointConfig, ProcessEnv};
    pub use crate::function::{
        generate_request_id, EndpointFunction, InvocationContext, InvocationResponse,
        ServerlessFunction,
    };
    pub use crate::http::{RequestDescriptor, ResponseData, ResponseResult, StatusCode};
    pub use crate::runtime::{InvokeServer, ServerConfig};
    pub use async_trait::async_trait;
}

// Re-export for convenience
pub use caller::{CallError, EndpointCaller};
pub use function::{EndpointFunction, InvocationContext, InvocationResponse, ServerlessFunction};
pub use http::{RequestDescriptor, ResponseResult};
pub use runtime::{InvokeServer, ServerConfig};
