//! Invocation response envelope: `{"statusCode": ..., "body": "<json text>"}`.

use crate::http::{ResponseResult, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const SUCCESS_MESSAGE: &str = "Endpoint called successfully";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Serialize)]
struct SuccessBody<'a> {
    message: &'static str,
    result: &'a ResponseResult,
}

/// Response returned to the platform for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvocationResponse {
    #[serde(rename = "statusCode")]
    pub status_code: StatusCode,
    /// JSON text.
    pub body: String,
}

impl InvocationResponse {
    pub fn new(status_code: impl Into<StatusCode>, body: impl Into<String>) -> Self {
        Self {
            status_code: status_code.into(),
            body: body.into(),
        }
    }

    /// 200 envelope embedding the endpoint result.
    pub fn success(result: &ResponseResult) -> Self {
        let payload = SuccessBody {
            message: SUCCESS_MESSAGE,
            result,
        };
        match serde_json::to_string(&payload) {
            Ok(body) => Self::new(StatusCode::OK, body),
            Err(e) => Self::internal_error(e.to_string()),
        }
    }

    /// 400 envelope for configuration the caller must fix.
    pub fn bad_request(error: impl Into<String>) -> Self {
        let error: String = error.into();
        let body = json!({ "error": error });
        Self::new(StatusCode::BAD_REQUEST, body.to_string())
    }

    /// 500 envelope carrying the failure message.
    pub fn internal_error(message: impl Into<String>) -> Self {
        let message: String = message.into();
        let body = json!({
            "error": INTERNAL_ERROR,
            "message": message,
        });
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, body.to_string())
    }

    /// Parse the body back into JSON.
    pub fn body_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::ResponseData;
    use std::collections::HashMap;

    #[test]
    fn test_success_envelope() {
        let result = ResponseResult {
            status_code: 200,
            headers: HashMap::new(),
            data: ResponseData::Json(json!({"ok": true})),
            elapsed_time: 0.5,
        };

        let response = InvocationResponse::success(&result);
        assert_eq!(response.status_code, StatusCode::OK);

        let body = response.body_json().unwrap();
        assert_eq!(body["message"], "Endpoint called successfully");
        assert_eq!(body["result"]["status_code"], 200);
        assert_eq!(body["result"]["data"], json!({"ok": true}));
        assert_eq!(body["result"]["elapsed_time"], 0.5);
    }

    #[test]
    fn test_bad_request_envelope() {
        let response = InvocationResponse::bad_request("missing");
        assert_eq!(response.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(response.body_json().unwrap(), json!({"error": "missing"}));
    }

    #[test]
    fn test_internal_error_envelope() {
        let response = InvocationResponse::internal_error("connection refused");
        assert_eq!(response.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.body_json().unwrap(),
            json!({"error": "Internal server error", "message": "connection refused"})
        );
    }

    #[test]
    fn test_envelope_serialization() {
        let response = InvocationResponse::bad_request("missing");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["statusCode"], 400);
        assert!(json["body"].is_string());
    }
}
