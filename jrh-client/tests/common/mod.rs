//! Common test utilities for jrh-client integration tests
//!
//! A mock HTTP server that records every request it receives and answers
//! with whatever the test's handler returns.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

/// One request as seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub peer: SocketAddr,
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
    pub body: String,
}

impl RecordedRequest {
    /// Body parsed as JSON, `Null` if it is not JSON
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }

    /// The `id` the client sent
    pub fn id(&self) -> Value {
        self.json()["id"].clone()
    }

    /// A header as a string
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }
}

type Handler = dyn Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync;

struct Shared {
    handler: Box<Handler>,
    delay: Option<Duration>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Mock JSON-RPC HTTP server
pub struct MockHttpServer {
    addr: SocketAddr,
    shared: Arc<Shared>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockHttpServer {
    /// Start a server that answers every request with `handler`
    pub async fn with_handler<F>(handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync + 'static,
    {
        Self::start(Box::new(handler), None).await
    }

    /// Start a server that waits `delay` before answering
    pub async fn with_delay<F>(delay: Duration, handler: F) -> Self
    where
        F: Fn(&RecordedRequest) -> (StatusCode, String) + Send + Sync + 'static,
    {
        Self::start(Box::new(handler), Some(delay)).await
    }

    /// Start a server that echoes `result` under the request's id
    pub async fn returning(result: Value) -> Self {
        Self::with_handler(move |req| (StatusCode::OK, success(req, result.clone()))).await
    }

    async fn start(handler: Box<Handler>, delay: Option<Duration>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let shared = Arc::new(Shared {
            handler,
            delay,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new().fallback(handle).with_state(shared.clone());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            })
            .await;
        });

        Self {
            addr,
            shared,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Bound socket address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Bound port, for `JrhClient::new("127.0.0.1", port)`
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Everything received so far, in arrival order
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.shared.requests.lock().unwrap().clone()
    }

    /// The only request received, panicking if there were zero or several
    pub fn single_request(&self) -> RecordedRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request");
        requests.into_iter().next().unwrap()
    }

    /// Shutdown the mock server
    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn handle(
    State(shared): State<Arc<Shared>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    let request = RecordedRequest {
        peer,
        method,
        path: uri.path().to_string(),
        headers,
        body: String::from_utf8_lossy(&body).into_owned(),
    };
    shared.requests.lock().unwrap().push(request.clone());

    if let Some(delay) = shared.delay {
        tokio::time::sleep(delay).await;
    }

    (shared.handler)(&request)
}

/// Successful response echoing the request's id
pub fn success(req: &RecordedRequest, result: Value) -> String {
    json!({
        "jsonrpc": "2.0",
        "result": result,
        "id": req.id(),
    })
    .to_string()
}

/// Error response echoing the request's id
pub fn error_response(req: &RecordedRequest, code: i64, message: &str) -> String {
    json!({
        "jsonrpc": "2.0",
        "error": {
            "code": code,
            "message": message,
        },
        "id": req.id(),
    })
    .to_string()
}
