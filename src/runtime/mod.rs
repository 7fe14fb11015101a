//! Local runtime hosting a serverless function behind an HTTP listener.

mod config;
mod server;

pub use config::ServerConfig;
pub use server::{InvokeServer, INVOCATION_PATH};
