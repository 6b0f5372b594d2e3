//! Response validation
//!
//! Turns a raw response body into the call's result or one error kind. The
//! checks run in a fixed order and the first failing one wins:
//!
//! 1. the body decodes to a JSON object
//! 2. `jsonrpc`, when present, is exactly `"2.0"`
//! 3. `id` echoes the request id
//! 4. `error`, when present and non-null, becomes [`ErrorKind::Server`]
//! 5. `result` is returned, `null` when absent
//!
//! A response that is both version-mismatched and carries an error therefore
//! reports the version mismatch.
//!
//! Step 2 deliberately accepts responses without a `jsonrpc` member: many
//! servers leave it out even though JSON-RPC 2.0 requires it.

use crate::codec;
use crate::error::{ErrorKind, JsonRpcErrorData, Result};
use crate::types::{JsonRpcResponse, RequestId, JSONRPC_VERSION};

/// Validate a raw response body against the id that was sent
///
/// # Examples
///
/// ```rust
/// use jrh_core::{validate_response, RequestId};
/// use serde_json::json;
///
/// let id = RequestId::from("abc");
/// let result = validate_response(br#"{"jsonrpc":"2.0","result":19,"id":"abc"}"#, &id).unwrap();
/// assert_eq!(result, json!(19));
/// ```
pub fn validate_response(body: &[u8], expected_id: &RequestId) -> Result<serde_json::Value> {
    let response = codec::decode_response(body)?;
    validate(response, expected_id)
}

/// Validate an already decoded response
pub fn validate(response: JsonRpcResponse, expected_id: &RequestId) -> Result<serde_json::Value> {
    if let Some(version) = response.jsonrpc {
        if version.as_str() != Some(JSONRPC_VERSION) {
            return Err(ErrorKind::ProtocolMismatch { received: version }.into());
        }
    }

    if !expected_id.matches(response.id.as_ref()) {
        return Err(ErrorKind::IdMismatch {
            expected: expected_id.clone(),
            received: response.id,
        }
        .into());
    }

    match response.error {
        Some(serde_json::Value::Null) | None => {}
        Some(error) => return Err(ErrorKind::Server(decode_error_object(error)?).into()),
    }

    Ok(response.result.unwrap_or(serde_json::Value::Null))
}

fn decode_error_object(error: serde_json::Value) -> Result<JsonRpcErrorData> {
    serde_json::from_value(error)
        .map_err(|e| ErrorKind::Communication(format!("malformed error object in response: {}", e)).into())
}
