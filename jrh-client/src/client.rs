//! JSON-RPC client over HTTP
//!
//! [`JrhClient`] is the entry point. A call runs these stages in order, and
//! the first one that fails ends the call:
//!
//! 1. reject reserved (`rpc…`) or empty method names, before any I/O
//! 2. generate a fresh correlation id
//! 3. build and encode the request envelope
//! 4. post it over the client's transport, created on the first call
//! 5. validate the response and return its `result`
//!
//! # Connection Lifecycle
//!
//! The transport is created lazily and then kept for the lifetime of the
//! client. It is dropped with the client; there is nothing to close.
//!
//! # Concurrency
//!
//! The transport and the id generator sit behind one async mutex that is held
//! for the whole round trip. Calls issued concurrently on one client are
//! therefore serialized. Use one client per task for parallel calls.

use crate::metrics::ClientMetrics;
use crate::request::IdGenerator;
use crate::transport::{ConnectionConfig, HttpTransport};
use crate::ClientBuilder;
use jrh_core::{check_method, codec, validate_response, Error, ErrorKind, JsonRpcRequest, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Per-call mutable state, created empty and filled on first use
pub(crate) struct CallState {
    transport: Option<HttpTransport>,
    ids: IdGenerator,
}

impl CallState {
    pub(crate) fn new() -> Self {
        Self {
            transport: None,
            ids: IdGenerator::new(),
        }
    }
}

/// JSON-RPC 2.0 client over HTTP with Basic authentication
pub struct JrhClient {
    pub(crate) config: ConnectionConfig,
    pub(crate) endpoint: String,
    pub(crate) state: Mutex<CallState>,
    pub(crate) metrics: Option<Arc<ClientMetrics>>,
}

impl JrhClient {
    /// Client for `http://host:port/` with empty credentials
    ///
    /// Nothing is opened until the first call.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self::from_parts(ConnectionConfig::new(host, port), None)
    }

    /// Start configuring a client
    pub fn builder(host: impl Into<String>, port: u16) -> ClientBuilder {
        ClientBuilder::new(host, port)
    }

    pub(crate) fn from_parts(config: ConnectionConfig, metrics: Option<Arc<ClientMetrics>>) -> Self {
        let endpoint = config.endpoint();
        Self {
            config,
            endpoint,
            state: Mutex::new(CallState::new()),
            metrics,
        }
    }

    /// Server host name or address
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// Server port
    pub fn port(&self) -> u16 {
        self.config.port
    }

    /// User name sent with Basic authentication, if one was configured
    pub fn user(&self) -> Option<&str> {
        self.config.user.as_deref()
    }

    /// Whether requests go over HTTPS
    pub fn ssl(&self) -> bool {
        self.config.ssl
    }

    /// Transport timeout, if one was configured
    pub fn timeout(&self) -> Option<Duration> {
        self.config.timeout
    }

    /// URL every request is posted to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether the transport has been created yet
    pub async fn has_connection(&self) -> bool {
        self.state.lock().await.transport.is_some()
    }

    /// Call a remote method with positional parameters
    ///
    /// Any method name is accepted except those starting with "rpc", which
    /// fail with [`ErrorKind::ReservedMethod`] before anything is sent.
    ///
    /// Returns the response's `result`, which may be `null`. Every error
    /// carries this client's [`endpoint`](Self::endpoint).
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use jrh_client::JrhClient;
    /// use serde_json::json;
    ///
    /// # async fn example() -> jrh_core::Result<()> {
    /// let client = JrhClient::builder("localhost", 8332)
    ///     .credentials("rpcuser", "rpcpassword")
    ///     .build()?;
    ///
    /// let difference = client.call("subtract", vec![json!(42), json!(23)]).await?;
    /// assert_eq!(difference, json!(19));
    /// # Ok(())
    /// # }
    /// ```
    #[tracing::instrument(skip(self, params), fields(method = %method, endpoint = %self.endpoint))]
    pub async fn call(&self, method: &str, params: Vec<serde_json::Value>) -> Result<serde_json::Value> {
        let start = Instant::now();
        let outcome = self
            .round_trip(method, params)
            .await
            .map_err(|e| e.with_endpoint(self.endpoint.as_str()));
        let duration = start.elapsed().as_secs_f64();

        match &outcome {
            Ok(_) => {
                if let Some(ref m) = self.metrics {
                    m.record_call(method, "success", duration);
                }
                tracing::debug!(duration_secs = duration, "Call completed");
            }
            Err(error) => {
                if let Some(ref m) = self.metrics {
                    m.record_call(method, "error", duration);
                    m.record_error(error.label());
                }
                tracing::warn!(error_kind = error.label(), error = %error, "Call failed");
            }
        }

        outcome
    }

    /// Call a remote method and deserialize the result
    ///
    /// Fails with [`ErrorKind::Serialization`] if the result does not fit `R`.
    pub async fn call_as<R>(&self, method: &str, params: Vec<serde_json::Value>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let result = self.call(method, params).await?;
        serde_json::from_value(result).map_err(|e| {
            Error::from(ErrorKind::Serialization(e.to_string())).with_endpoint(self.endpoint.as_str())
        })
    }

    async fn round_trip(&self, method: &str, params: Vec<serde_json::Value>) -> Result<serde_json::Value> {
        check_method(method)?;

        let mut state = self.state.lock().await;
        let id = state.ids.next_id();

        let request = JsonRpcRequest::build(method, params, id.clone())?;
        let body = codec::encode_request(&request)?;

        let transport = self.transport(&mut state)?;
        tracing::debug!(id = %id, "Sending request");
        let raw = transport.send(body).await?;
        tracing::debug!(bytes = raw.len(), "Response received");

        validate_response(&raw, &id)
    }

    fn transport<'s>(&self, state: &'s mut CallState) -> Result<&'s HttpTransport> {
        let transport = match state.transport {
            Some(ref transport) => transport,
            None => {
                let transport = HttpTransport::connect(&self.config)?;
                tracing::info!(ssl = self.config.ssl, "Transport created");
                if let Some(ref m) = self.metrics {
                    m.record_connection(&self.endpoint);
                }
                &*state.transport.insert(transport)
            }
        };
        Ok(transport)
    }
}

impl std::fmt::Debug for JrhClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JrhClient")
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
