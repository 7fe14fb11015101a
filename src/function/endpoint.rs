//! The endpoint function: resolves its configuration, calls the endpoint
//! once and wraps the outcome in an invocation envelope.

use crate::caller::EndpointCaller;
use crate::config::{ConfigError, ConfigSource, EndpointConfig, ProcessEnv};
use crate::function::{InvocationContext, InvocationResponse, ServerlessFunction};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{error, info, instrument};

/// Name the endpoint function registers under.
pub const FUNCTION_NAME: &str = "fezz-endpoint";

/// Serverless function calling the endpoint configured in `S`.
///
/// The configuration is read at the start of every invocation, so a change in
/// the source is picked up by the next event.
#[derive(Debug, Clone, Default)]
pub struct EndpointFunction<S = ProcessEnv> {
    source: S,
    caller: EndpointCaller,
}

impl EndpointFunction<ProcessEnv> {
    /// Endpoint function configured from the process environment.
    pub fn from_env() -> Self {
        Self::new(ProcessEnv)
    }
}

impl<S: ConfigSource> EndpointFunction<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            caller: EndpointCaller::new(),
        }
    }
}

#[async_trait]
impl<S> ServerlessFunction for EndpointFunction<S>
where
    S: ConfigSource + Send + Sync,
{
    #[instrument(name = "handle_invocation", skip_all, fields(request_id = %ctx.request_id))]
    async fn invoke(&self, _event: Value, ctx: &InvocationContext) -> InvocationResponse {
        info!(
            function_name = %ctx.function_name,
            function_version = %ctx.function_version,
            request_id = %ctx.request_id,
            "Function invocation started"
        );

        let config = match EndpointConfig::resolve(&self.source) {
            Ok(config) => config,
            Err(err @ ConfigError::MissingEndpointUrl) => {
                let message = err.to_string();
                error!("{}", message);
                return InvocationResponse::bad_request(message);
            }
            Err(err) => {
                error!(error = %err, "Function invocation failed");
                return InvocationResponse::internal_error(err.to_string());
            }
        };

        info!(
            endpoint_url = %config.endpoint_url,
            method = %config.method,
            timeout = config.timeout,
            has_headers = config.has_headers(),
            has_data = config.has_data(),
            "Using configuration from environment variables"
        );

        let descriptor = config.into_descriptor();
        match self.caller.call(&descriptor).await {
            Ok(result) => {
                info!(
                    url = %descriptor.url,
                    status_code = result.status_code,
                    elapsed_time = result.elapsed_time,
                    "Endpoint call completed successfully"
                );
                InvocationResponse::success(&result)
            }
            Err(err) => {
                error!(error = %err, kind = err.kind(), "Function invocation failed");
                InvocationResponse::internal_error(err.to_string())
            }
        }
    }

    fn name(&self) -> &str {
        FUNCTION_NAME
    }
}
