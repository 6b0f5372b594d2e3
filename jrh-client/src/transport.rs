//! HTTP transport
//!
//! One `HttpTransport` exists per client, created on the first call. It wraps
//! a `reqwest::Client` limited to a single idle HTTP/1 connection per host,
//! so consecutive calls ride the same keep-alive connection.
//!
//! # Wire format
//!
//! ```text
//! POST / HTTP/1.1
//! Authorization: Basic base64(user:password)
//! Content-Type: multipart/form_data
//!
//! {"jsonrpc":"2.0","method":"...","params":[...],"id":"..."}
//! ```
//!
//! The content type does not describe the JSON body. It is the value existing
//! servers have always received from this client and some of them key on it,
//! so it is sent verbatim.
//!
//! HTTP 401 fails the call with [`ErrorKind::Authentication`]. Every other status
//! is passed through: JSON-RPC carries its errors in the body.

use jrh_core::{ErrorKind, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use std::fmt;
use std::time::Duration;

/// Content type sent with every request
pub const COMPAT_CONTENT_TYPE: &str = "multipart/form_data";

/// Where and how to connect
#[derive(Clone)]
pub(crate) struct ConnectionConfig {
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) user: Option<String>,
    pub(crate) password: Option<String>,
    pub(crate) ssl: bool,
    pub(crate) timeout: Option<Duration>,
}

impl ConnectionConfig {
    pub(crate) fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            user: None,
            password: None,
            ssl: false,
            timeout: None,
        }
    }

    /// URL every request is posted to
    pub(crate) fn endpoint(&self) -> String {
        let scheme = if self.ssl { "https" } else { "http" };
        // Bare IPv6 literals need brackets in a URL authority.
        if self.host.contains(':') && !self.host.starts_with('[') {
            format!("{}://[{}]:{}/", scheme, self.host, self.port)
        } else {
            format!("{}://{}:{}/", scheme, self.host, self.port)
        }
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("ssl", &self.ssl)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Persistent HTTP connection to one JSON-RPC endpoint
pub(crate) struct HttpTransport {
    http: reqwest::Client,
    url: String,
    user: String,
    password: String,
}

impl HttpTransport {
    /// Set up the transport
    ///
    /// No socket is opened here; the connection is established by the first
    /// `send` and kept alive for the ones after it.
    pub(crate) fn connect(config: &ConnectionConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .http1_only()
            .pool_max_idle_per_host(1);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder
            .build()
            .map_err(|e| ErrorKind::Communication(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            url: config.endpoint(),
            user: config.user.clone().unwrap_or_default(),
            password: config.password.clone().unwrap_or_default(),
        })
    }

    /// Post an encoded request and return the raw response body
    pub(crate) async fn send(&self, body: String) -> Result<Vec<u8>> {
        let response = self
            .http
            .post(&self.url)
            .basic_auth(&self.user, Some(&self.password))
            .header(CONTENT_TYPE, COMPAT_CONTENT_TYPE)
            .body(body)
            .send()
            .await
            .map_err(|e| ErrorKind::Communication(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ErrorKind::Authentication.into());
        }
        if !status.is_success() {
            tracing::debug!(status = %status, "Non-success status, validating body anyway");
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ErrorKind::Communication(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}
