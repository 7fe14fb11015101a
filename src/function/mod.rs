//! Serverless function model and the endpoint function built on it.

pub mod endpoint;
pub mod envelope;
pub mod handler;

pub use endpoint::EndpointFunction;
pub use envelope::InvocationResponse;
pub use handler::{generate_request_id, InvocationContext, ServerlessFunction};
