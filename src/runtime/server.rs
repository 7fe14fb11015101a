//! Invocation HTTP server.
//!
//! Accepts events on the same path as the Lambda runtime interface emulator,
//! so the function can be driven with the usual local tooling:
//!
//! ```text
//! curl -XPOST http://localhost:8080/2015-03-31/functions/function/invocations -d '{}'
//! ```

use crate::function::{generate_request_id, InvocationContext, ServerlessFunction};
use crate::runtime::ServerConfig;
use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Body;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use serde_json::Value;
use std::convert::Infallible;
use std::error::Error as StdError;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Path events are posted to.
pub const INVOCATION_PATH: &str = "/2015-03-31/functions/function/invocations";

/// Server hosting one serverless function.
pub struct InvokeServer {
    /// Server configuration.
    config: Arc<ServerConfig>,
    /// The hosted function.
    function: Arc<dyn ServerlessFunction>,
}

impl InvokeServer {
    /// Create a new invocation server.
    pub fn new(config: ServerConfig, function: impl ServerlessFunction + 'static) -> Self {
        Self {
            config: Arc::new(config),
            function: Arc::new(function),
        }
    }

    /// Bind to the configured address and serve until an accept error.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let addr: SocketAddr = self.config.bind_addr().parse()?;
        let listener = TcpListener::bind(addr).await?;
        self.serve(listener).await
    }

    /// Serve invocations on an already bound listener.
    pub async fn serve(
        self,
        listener: TcpListener,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!(
            function = self.function.name(),
            path = INVOCATION_PATH,
            "Invocation server listening on {}",
            listener.local_addr()?
        );

        loop {
            let (stream, remote_addr) = listener.accept().await?;
            let io = TokioIo::new(stream);

            let function = self.function.clone();
            let config = self.config.clone();

            tokio::task::spawn(async move {
                let service = service_fn(move |req| {
                    let function = function.clone();
                    let config = config.clone();
                    async move { handle_request(req, function, config, remote_addr).await }
                });

                if let Err(err) = http1::Builder::new()
                    .serve_connection(io, service)
                    .await
                {
                    error!("Error serving connection: {:?}", err);
                }
            });
        }
    }
}

/// Handle an incoming HTTP request.
async fn handle_request<B>(
    req: Request<B>,
    function: Arc<dyn ServerlessFunction>,
    config: Arc<ServerConfig>,
    remote_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let path = req.uri().path().to_string();
    let method = req.method().clone();

    debug!("Handling request: {} {} from {}", method, path, remote_addr);

    if config.enable_health && path == "/_health" {
        return Ok(text_response(StatusCode::OK, "OK"));
    }

    if path != INVOCATION_PATH {
        return Ok(text_response(StatusCode::NOT_FOUND, "Not found"));
    }

    if method != Method::POST {
        return Ok(text_response(
            StatusCode::METHOD_NOT_ALLOWED,
            "Method not allowed",
        ));
    }

    let event = match read_event(req, config.max_body_size).await {
        Ok(event) => event,
        Err(message) => {
            warn!("Rejected invocation: {}", message);
            return Ok(text_response(StatusCode::BAD_REQUEST, message));
        }
    };

    let ctx = InvocationContext::new(&config.function_name, generate_request_id())
        .with_version(&config.function_version);
    let response = function.invoke(event, &ctx).await;

    match serde_json::to_vec(&response) {
        Ok(body) => Ok(build_response(StatusCode::OK, "application/json", body)),
        Err(e) => {
            error!("Failed to encode invocation response [{}]: {}", ctx.request_id, e);
            Ok(text_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

/// Read the event JSON; an empty body is the empty object.
///
/// Reading stops as soon as more than `max_body_size` bytes have arrived.
async fn read_event<B>(req: Request<B>, max_body_size: usize) -> Result<Value, String>
where
    B: Body,
    B::Error: Into<Box<dyn StdError + Send + Sync>>,
{
    let body = Limited::new(req.into_body(), max_body_size)
        .collect()
        .await
        .map_err(|e| {
            if e.downcast_ref::<LengthLimitError>().is_some() {
                "Request body too large".to_string()
            } else {
                format!("Failed to read request body: {}", e)
            }
        })?
        .to_bytes();

    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }

    serde_json::from_slice(&body).map_err(|e| format!("Invalid event JSON: {}", e))
}

fn text_response(status: StatusCode, message: impl Into<String>) -> Response<Full<Bytes>> {
    build_response(status, "text/plain", message.into())
}

fn build_response(
    status: StatusCode,
    content_type: &'static str,
    body: impl Into<Bytes>,
) -> Response<Full<Bytes>> {
    let mut response = Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::InvocationResponse;
    use async_trait::async_trait;
    use hyper::body::Frame;
    use serde_json::json;
    use std::pin::Pin;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::task::{Context, Poll};

    /// Echoes the event and context back in the envelope body.
    struct EchoFunction;

    #[async_trait]
    impl ServerlessFunction for EchoFunction {
        async fn invoke(&self, event: Value, ctx: &InvocationContext) -> InvocationResponse {
            let body = json!({
                "event": event,
                "function_name": ctx.function_name,
                "function_version": ctx.function_version,
                "has_request_id": !ctx.request_id.is_empty(),
            });
            InvocationResponse::new(200u16, body.to_string())
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    /// Streams `frames` chunks of 1 KiB, counting the bytes handed out.
    struct ChunkedBody {
        frames: usize,
        emitted: Arc<AtomicUsize>,
    }

    impl Body for ChunkedBody {
        type Data = Bytes;
        type Error = Infallible;

        fn poll_frame(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
        ) -> Poll<Option<Result<Frame<Bytes>, Infallible>>> {
            let this = self.get_mut();
            if this.frames == 0 {
                return Poll::Ready(None);
            }
            this.frames -= 1;
            this.emitted.fetch_add(1024, Ordering::SeqCst);
            Poll::Ready(Some(Ok(Frame::data(Bytes::from(vec![b' '; 1024])))))
        }
    }

    async fn send(config: ServerConfig, method: &str, path: &str, body: &'static str) -> (StatusCode, Bytes) {
        send_body(config, method, path, Full::new(Bytes::from(body))).await
    }

    async fn send_body<B>(config: ServerConfig, method: &str, path: &str, body: B) -> (StatusCode, Bytes)
    where
        B: Body,
        B::Error: Into<Box<dyn StdError + Send + Sync>>,
    {
        let req = Request::builder()
            .method(method)
            .uri(path)
            .body(body)
            .unwrap();
        let response = handle_request(
            req,
            Arc::new(EchoFunction),
            Arc::new(config),
            "127.0.0.1:4000".parse().unwrap(),
        )
        .await
        .unwrap();

        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body)
    }

    #[tokio::test]
    async fn test_invocation_returns_envelope() {
        let config = ServerConfig::new().function_name("caller").function_version("2");
        let (status, body) = send(config, "POST", INVOCATION_PATH, r#"{"source": "test"}"#).await;

        assert_eq!(status, StatusCode::OK);
        let envelope: InvocationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.status_code, crate::http::StatusCode::OK);
        assert_eq!(
            envelope.body_json().unwrap(),
            json!({
                "event": {"source": "test"},
                "function_name": "caller",
                "function_version": "2",
                "has_request_id": true,
            })
        );
    }

    #[tokio::test]
    async fn test_empty_event_is_empty_object() {
        let (status, body) = send(ServerConfig::new(), "POST", INVOCATION_PATH, "").await;

        assert_eq!(status, StatusCode::OK);
        let envelope: InvocationResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(envelope.body_json().unwrap()["event"], json!({}));
    }

    #[tokio::test]
    async fn test_invalid_event_is_rejected() {
        let (status, body) = send(ServerConfig::new(), "POST", INVOCATION_PATH, "{oops").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8_lossy(&body).starts_with("Invalid event JSON"));
    }

    #[tokio::test]
    async fn test_oversized_event_is_rejected() {
        let config = ServerConfig::new().max_body_size(4);
        let (status, body) = send(config, "POST", INVOCATION_PATH, r#"{"a": 1}"#).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(&body[..], b"Request body too large");
    }

    #[tokio::test]
    async fn test_oversized_stream_stops_at_first_frame() {
        let emitted = Arc::new(AtomicUsize::new(0));
        let body = ChunkedBody {
            frames: 1000,
            emitted: emitted.clone(),
        };
        let config = ServerConfig::new().max_body_size(16);
        let (status, body) = send_body(config, "POST", INVOCATION_PATH, body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(&body[..], b"Request body too large");
        assert!(emitted.load(Ordering::SeqCst) <= 1024);
    }

    #[tokio::test]
    async fn test_health_and_unknown_paths() {
        let (status, body) = send(ServerConfig::new(), "GET", "/_health", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&body[..], b"OK");

        let (status, _) = send(ServerConfig::new(), "POST", "/elsewhere", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(ServerConfig::new(), "GET", INVOCATION_PATH, "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
