//! Structured JSON logging on stdout.
//!
//! Every record is one JSON object carrying the timestamp, level, message,
//! target (logger name), source file and line, and the enclosing span, which
//! names the function that emitted it.

use tracing_subscriber::EnvFilter;

/// Install the JSON subscriber. Call once per process; the level filter is
/// taken from `RUST_LOG` and defaults to `info`.
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .json()
        .flatten_event(true)
        .with_current_span(true)
        .with_span_list(false)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stdout)
        .try_init()
}
