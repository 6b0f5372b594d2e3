//! Codec for JSON-RPC envelopes
//!
//! Thin wrappers over `serde_json` that map its failures onto the jrh error
//! taxonomy:
//!
//! - encoding a request that serde rejects → `ErrorKind::Serialization`
//! - a response body that is not JSON, or not a JSON object → `ErrorKind::Communication`
//!
//! # Examples
//!
//! ```rust
//! use jrh_core::{codec, JsonRpcRequest, RequestId};
//!
//! let request = JsonRpcRequest::build("ping", Vec::new(), RequestId::from("id")).unwrap();
//! let json = codec::encode_request(&request).unwrap();
//! assert_eq!(json, r#"{"jsonrpc":"2.0","method":"ping","params":[],"id":"id"}"#);
//!
//! let response = codec::decode_response(br#"{"id":"id","result":1}"#).unwrap();
//! assert!(response.jsonrpc.is_none());
//! ```

use crate::error::{ErrorKind, Result};
use crate::types::{JsonRpcRequest, JsonRpcResponse};
use serde::Serialize;

/// Encode any serializable message to a JSON string
pub fn encode<T: Serialize>(msg: &T) -> Result<String> {
    serde_json::to_string(msg).map_err(|e| ErrorKind::Serialization(e.to_string()).into())
}

/// Encode a request envelope
pub fn encode_request(req: &JsonRpcRequest) -> Result<String> {
    encode(req)
}

/// Decode a raw response body
///
/// The body must be a single JSON object. Anything else, including an HTML
/// error page or a batch array, is a communication failure.
pub fn decode_response(body: &[u8]) -> Result<JsonRpcResponse> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| ErrorKind::Communication(format!("invalid JSON in response: {}", e)))?;

    match value {
        serde_json::Value::Object(object) => Ok(JsonRpcResponse::from_object(object)),
        other => Err(ErrorKind::Communication(format!(
            "expected a JSON object in response, got {}",
            json_type_name(&other)
        ))
        .into()),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
