//! Error types for jrh
//!
//! Every way a call can fail is an [`ErrorKind`], so calling code can branch
//! on the failure category with `match` instead of inspecting messages. The
//! [`Error`] returned to callers pairs that kind with the endpoint of the
//! client that raised it.
//!
//! # Error Kinds
//!
//! | Variant | Raised when |
//! |---|---|
//! | `Communication` | the transport failed or the response body could not be decoded |
//! | `Authentication` | the server answered HTTP 401 |
//! | `IdMismatch` | the response id differs from the request id |
//! | `ProtocolMismatch` | the response declares a `jsonrpc` version other than "2.0" |
//! | `ReservedMethod` | the method name starts with the reserved prefix "rpc" |
//! | `Server` | the response carries a non-null `error` object |
//!
//! Local kinds complete the set: `InvalidRequest` for an empty method name,
//! `Serialization` for encode failures and typed-result mismatches, and
//! `Config` for clients that cannot be built.
//!
//! # Examples
//!
//! ```rust
//! use jrh_core::{Error, ErrorKind, JsonRpcErrorData};
//!
//! let error = Error::from(JsonRpcErrorData::new(-32601, "Method not found"))
//!     .with_endpoint("http://localhost:8332/");
//!
//! assert!(matches!(error.kind(), ErrorKind::Server(data) if data.code == -32601));
//! assert_eq!(error.endpoint(), Some("http://localhost:8332/"));
//! assert_eq!(error.label(), "server");
//! ```

use crate::types::RequestId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for jrh operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error raised to the caller of a JSON-RPC call
///
/// Errors returned by `JrhClient::call` always carry the endpoint of the
/// client that made the call. Errors produced by the protocol helpers in this
/// crate have none until a client attaches it.
#[derive(Debug, Clone, Error)]
#[error("{kind}{}", display_endpoint(.endpoint))]
pub struct Error {
    kind: ErrorKind,
    endpoint: Option<String>,
}

impl Error {
    /// Error of the given kind without client context
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            endpoint: None,
        }
    }

    /// Attach the endpoint of the client the error belongs to
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// The failure kind
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Consume the error and return its kind
    pub fn into_kind(self) -> ErrorKind {
        self.kind
    }

    /// Endpoint URL of the originating client
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }

    /// Short, stable tag for the error kind
    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::new(kind)
    }
}

fn display_endpoint(endpoint: &Option<String>) -> String {
    match endpoint {
        Some(endpoint) => format!(" (endpoint {})", endpoint),
        None => String::new(),
    }
}

/// Failure kinds
///
/// Stages of a call short-circuit on the first failure, so exactly one of
/// these is reported per failed call. None of them is retried.
#[derive(Debug, Clone, Error)]
pub enum ErrorKind {
    /// Generic communication failure
    ///
    /// Covers transport errors (connection refused, TLS, timeouts, body
    /// read failures) and response bodies that are not a JSON object.
    #[error("There was an error communicating with the JSON RPC server: {0}")]
    Communication(String),

    /// The server rejected our credentials with HTTP 401
    #[error("There was an error authenticating to the JSON RPC server.")]
    Authentication,

    /// The response id does not echo the request id
    #[error("The server sent us a response with an unexpected id (expected {expected}, got {})", display_received(.received))]
    IdMismatch {
        /// Id that was sent with the request
        expected: RequestId,
        /// Id found in the response, `None` when the key was absent
        received: Option<serde_json::Value>,
    },

    /// The response declares an unexpected `jsonrpc` version
    ///
    /// Only raised when the key is present. Servers that omit `jsonrpc`
    /// altogether are accepted.
    #[error("We expected to receive a version '2.0' response, but actually got a {received} one.")]
    ProtocolMismatch {
        /// The exact value of the `jsonrpc` key
        received: serde_json::Value,
    },

    /// The method name starts with the reserved prefix "rpc"
    #[error("{method} is a reserved method")]
    ReservedMethod {
        /// The rejected method name
        method: String,
    },

    /// The server signaled failure through the `error` member
    #[error("Error {}: {}", .0.code, .0.message)]
    Server(JsonRpcErrorData),

    /// The request cannot be built (for example an empty method name)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Serialization or deserialization error
    ///
    /// Raised when the request cannot be encoded, or when a result does not
    /// fit the type requested from `call_as`.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The client could not be configured
    ///
    /// Raised by the builder, never by a call.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorKind {
    /// Short, stable tag for the kind
    ///
    /// Used as a label in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            ErrorKind::Communication(_) => "communication",
            ErrorKind::Authentication => "authentication",
            ErrorKind::IdMismatch { .. } => "id_mismatch",
            ErrorKind::ProtocolMismatch { .. } => "protocol_mismatch",
            ErrorKind::ReservedMethod { .. } => "reserved_method",
            ErrorKind::Server(_) => "server",
            ErrorKind::InvalidRequest(_) => "invalid_request",
            ErrorKind::Serialization(_) => "serialization",
            ErrorKind::Config(_) => "config",
        }
    }
}

fn display_received(received: &Option<serde_json::Value>) -> String {
    match received {
        Some(value) => value.to_string(),
        None => "no id".to_string(),
    }
}

/// JSON-RPC 2.0 error object as sent by the server
///
/// Carried unchanged inside [`ErrorKind::Server`]: `code`, `message` and `data`
/// are exactly what the server put in the response's `error` member.
///
/// # Examples
///
/// ```rust
/// use jrh_core::JsonRpcErrorData;
/// use serde_json::json;
///
/// let error = JsonRpcErrorData::with_data(
///     1001,
///     "Insufficient funds",
///     json!({"balance": 50, "required": 100}),
/// );
/// assert_eq!(error.code, 1001);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcErrorData {
    /// Numeric error code
    ///
    /// -32768 to -32000 are reserved by JSON-RPC 2.0; -32601 is
    /// "Method not found".
    pub code: i64,

    /// Short description of the error
    pub message: String,

    /// Additional information, `None` when the server sent none or `null`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl JsonRpcErrorData {
    /// Create an error object without data
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Create an error object carrying additional data
    pub fn with_data(code: i64, message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            code,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl std::fmt::Display for JsonRpcErrorData {
    /// Formats as "[code] message"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for JsonRpcErrorData {}

impl From<JsonRpcErrorData> for Error {
    fn from(data: JsonRpcErrorData) -> Self {
        Error::new(ErrorKind::Server(data))
    }
}
