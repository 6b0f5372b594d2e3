//! JRH - JSON-RPC 2.0 over HTTP
//!
//! Convenience crate that re-exports the jrh sub-crates, so a single
//! dependency gives access to the client and the protocol types.
//!
//! # Architecture
//!
//! - **jrh-core**: protocol types, codec, response validation, error
//!   taxonomy, observability
//! - **jrh-client**: HTTP client with Basic authentication and lazy
//!   connection setup
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jrh::JrhClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JrhClient::builder("localhost", 8332)
//!         .credentials("rpcuser", "rpcpassword")
//!         .build()?;
//!
//!     let difference = client.call("subtract", vec![json!(42), json!(23)]).await?;
//!     println!("Result: {}", difference);
//!
//!     Ok(())
//! }
//! ```

pub use jrh_client as client;
pub use jrh_core as core;

pub use jrh_client::JrhClient;
pub use jrh_core::{Error, ErrorKind, Result};
