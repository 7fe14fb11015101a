//! HTTP types shared by the endpoint caller and the invocation adapter.

mod request;
mod response;

pub use request::{RequestDescriptor, DEFAULT_METHOD, DEFAULT_TIMEOUT_SECS};
pub use response::{ResponseData, ResponseResult, StatusCode};
