//! JSON-RPC 2.0 client over HTTP with Basic authentication
//!
//! This crate sends JSON-RPC 2.0 calls as HTTP POST requests to the root path
//! of a server, one call at a time, over a single kept-alive connection.
//!
//! # Core Features
//!
//! - **Open call surface**: any method name the server understands, with
//!   positional parameters
//! - **Correlation ids**: 12 random bytes per call, checked against the echo
//! - **Typed failures**: one [`jrh_core::ErrorKind`] variant per failure
//!   kind, tagged with the endpoint of the failing client
//! - **Basic auth and TLS**: credentials on every request, HTTPS on request
//! - **Observability**: tracing spans per call, optional OpenTelemetry metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use jrh_client::JrhClient;
//! use jrh_core::ErrorKind;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = JrhClient::builder("localhost", 8332)
//!         .credentials("rpcuser", "rpcpassword")
//!         .build()?;
//!
//!     match client.call("getblockcount", vec![]).await {
//!         Ok(count) => println!("Blocks: {}", count),
//!         Err(e) => match e.kind() {
//!             ErrorKind::Authentication => eprintln!("Wrong credentials for {:?}", e.endpoint()),
//!             ErrorKind::Server(data) => eprintln!("Server said {}: {}", data.code, data.message),
//!             _ => eprintln!("Call failed: {}", e),
//!         },
//!     }
//!
//!     let total: i64 = client.call_as("add", vec![json!(2), json!(3)]).await?;
//!     println!("Total: {}", total);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod client_builder;
mod metrics;
mod request;
mod transport;

pub use client::JrhClient;
pub use client_builder::ClientBuilder;
pub use metrics::ClientMetrics;
pub use transport::COMPAT_CONTENT_TYPE;
