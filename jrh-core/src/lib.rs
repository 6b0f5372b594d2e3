//! Core JSON-RPC 2.0 types, codec and response validation for jrh
//!
//! This crate holds the transport-agnostic half of a JSON-RPC 2.0 client:
//!
//! - **Types**: request and response envelopes, correlation ids, the
//!   reserved method-name rule
//! - **Codec**: encoding requests and decoding response bodies
//! - **Validation**: the ordered checks that turn a response into a result or
//!   an error
//! - **Error handling**: the error taxonomy raised to callers
//! - **Observability**: OpenTelemetry and tracing setup
//!
//! The `jrh-client` crate adds the HTTP transport on top.
//!
//! # Example
//!
//! ```rust
//! use jrh_core::{codec, validate_response, JsonRpcRequest, RequestId};
//! use serde_json::json;
//!
//! let id = RequestId::from("aWQtZm9yLXRlc3Q");
//! let request = JsonRpcRequest::build("subtract", vec![json!(42), json!(23)], id.clone()).unwrap();
//! let body = codec::encode_request(&request).unwrap();
//! assert!(body.contains("\"params\":[42,23]"));
//!
//! let result = validate_response(br#"{"jsonrpc":"2.0","result":19,"id":"aWQtZm9yLXRlc3Q"}"#, &id).unwrap();
//! assert_eq!(result, json!(19));
//! ```

pub mod codec;
pub mod error;
pub mod observability;
pub mod types;
pub mod validate;

pub use error::{Error, ErrorKind, JsonRpcErrorData, Result};
pub use observability::{init_observability, shutdown_observability, ObservabilityConfig};
pub use types::{
    check_method, JsonRpcRequest, JsonRpcResponse, RequestId, JSONRPC_VERSION,
    RESERVED_METHOD_PREFIX,
};
pub use validate::validate_response;
