//! JSON-RPC 2.0 envelopes
//!
//! The request side is a plain serde struct with exactly the four members the
//! protocol requires. The response side keeps track of which members were
//! present on the wire, because the validator treats a missing `jsonrpc` key
//! differently from one that is present with the wrong value.

use crate::error::{ErrorKind, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol version sent in every request and accepted in responses
pub const JSONRPC_VERSION: &str = "2.0";

/// Method-name prefix reserved by JSON-RPC 2.0 for extensions
pub const RESERVED_METHOD_PREFIX: &str = "rpc";

/// Correlation id of a single request
///
/// An opaque string that the server must echo back. Serializes as a bare JSON
/// string and compares by plain equality.
///
/// # Examples
///
/// ```rust
/// use jrh_core::RequestId;
///
/// let id = RequestId::from("c2FtcGxlLWlkLTEy");
/// assert_eq!(id.as_str(), "c2FtcGxlLWlkLTEy");
/// assert_eq!(serde_json::to_string(&id).unwrap(), "\"c2FtcGxlLWlkLTEy\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    /// The id as text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a response `id` member echoes this id
    ///
    /// An absent member never matches.
    pub fn matches(&self, received: Option<&serde_json::Value>) -> bool {
        matches!(received, Some(serde_json::Value::String(s)) if *s == self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0)
    }
}

impl From<String> for RequestId {
    fn from(s: String) -> Self {
        RequestId(s)
    }
}

impl From<&str> for RequestId {
    fn from(s: &str) -> Self {
        RequestId(s.to_string())
    }
}

/// Check a method name before anything is sent
///
/// Names starting with "rpc" (case-sensitive) are reserved for protocol
/// extensions and fail with [`ErrorKind::ReservedMethod`]. Empty names fail with
/// [`ErrorKind::InvalidRequest`].
///
/// # Examples
///
/// ```rust
/// use jrh_core::check_method;
///
/// assert!(check_method("subtract").is_ok());
/// assert!(check_method("RPCish").is_ok());
/// assert_eq!(check_method("rpc.discover").unwrap_err().label(), "reserved_method");
/// ```
pub fn check_method(method: &str) -> Result<()> {
    if method.is_empty() {
        return Err(ErrorKind::InvalidRequest("method name must not be empty".to_string()).into());
    }
    if method.starts_with(RESERVED_METHOD_PREFIX) {
        return Err(ErrorKind::ReservedMethod {
            method: method.to_string(),
        }
        .into());
    }
    Ok(())
}

/// JSON-RPC 2.0 request envelope
///
/// Always serializes exactly four members in protocol order:
///
/// ```text
/// {"jsonrpc":"2.0","method":"subtract","params":[42,23],"id":"..."}
/// ```
///
/// `params` is an array even when empty. Notifications and named parameters
/// are not supported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Always "2.0"
    pub jsonrpc: String,
    /// Name of the remote method
    pub method: String,
    /// Positional arguments
    pub params: Vec<serde_json::Value>,
    /// Correlation id echoed by the server
    pub id: RequestId,
}

impl JsonRpcRequest {
    /// Build a request envelope
    ///
    /// Runs [`check_method`] first; nothing is built for a reserved or empty
    /// method name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jrh_core::{JsonRpcRequest, RequestId};
    /// use serde_json::json;
    ///
    /// let request = JsonRpcRequest::build(
    ///     "subtract",
    ///     vec![json!(42), json!(23)],
    ///     RequestId::from("id-1"),
    /// ).unwrap();
    /// assert_eq!(request.jsonrpc, "2.0");
    /// assert_eq!(request.params.len(), 2);
    /// ```
    pub fn build(
        method: impl Into<String>,
        params: Vec<serde_json::Value>,
        id: RequestId,
    ) -> Result<Self> {
        let method = method.into();
        check_method(&method)?;

        Ok(Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method,
            params,
            id,
        })
    }
}

/// JSON-RPC 2.0 response envelope as received
///
/// Each member is `Some` exactly when its key was present in the response
/// object, so `"jsonrpc": null` is `Some(Value::Null)` while a missing key is
/// `None`. Members other than these four are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonRpcResponse {
    /// The `jsonrpc` member, if present
    pub jsonrpc: Option<serde_json::Value>,
    /// The `id` member, if present
    pub id: Option<serde_json::Value>,
    /// The `result` member, if present
    pub result: Option<serde_json::Value>,
    /// The `error` member, if present
    pub error: Option<serde_json::Value>,
}

impl JsonRpcResponse {
    /// Split a decoded JSON object into the four response members
    pub fn from_object(mut object: serde_json::Map<String, serde_json::Value>) -> Self {
        Self {
            jsonrpc: object.remove("jsonrpc"),
            id: object.remove("id"),
            result: object.remove("result"),
            error: object.remove("error"),
        }
    }
}
