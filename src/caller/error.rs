//! Classified failures of an endpoint call.

use crate::http::RequestDescriptor;

/// Failure of a single endpoint call.
///
/// Every variant carries the URL of the descriptor that failed. The
/// `Display` output is the message surfaced in the 500 envelope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CallError {
    /// No response arrived within the descriptor's timeout.
    #[error("Request to {url} timed out after {timeout} seconds")]
    Timeout { url: String, timeout: u64 },

    /// The transport reported an error (DNS, connect, malformed response, ...).
    #[error("{message}")]
    Request { url: String, message: String },

    /// Anything that is not a transport error.
    #[error("{message}")]
    Unexpected { url: String, message: String },
}

impl CallError {
    /// Classify a transport error for `descriptor`.
    pub fn from_transport(descriptor: &RequestDescriptor, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            CallError::Timeout {
                url: descriptor.url.clone(),
                timeout: descriptor.timeout,
            }
        } else {
            CallError::Request {
                url: descriptor.url.clone(),
                message: error_chain(&error),
            }
        }
    }

    pub fn unexpected(url: impl Into<String>, message: impl Into<String>) -> Self {
        CallError::Unexpected {
            url: url.into(),
            message: message.into(),
        }
    }

    /// URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            CallError::Timeout { url, .. }
            | CallError::Request { url, .. }
            | CallError::Unexpected { url, .. } => url,
        }
    }

    /// Short classification label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CallError::Timeout { .. } => "timeout",
            CallError::Request { .. } => "request",
            CallError::Unexpected { .. } => "unexpected",
        }
    }
}

/// Render an error followed by every distinct message in its source chain.
pub(crate) fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
