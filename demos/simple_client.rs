//! Simple JSON-RPC over HTTP client example
//!
//! Expects a JSON-RPC 2.0 server on 127.0.0.1:8332 that accepts the
//! credentials "user" / "pass".

use jrh::{ErrorKind, JrhClient};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct ServerInfo {
    version: String,
    #[serde(default)]
    uptime: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jrh_client=debug".into()),
        )
        .init();

    let client = JrhClient::builder("127.0.0.1", 8332)
        .credentials("user", "pass")
        .build()?;

    println!("Calling JSON-RPC server at {}", client.endpoint());

    let difference = client.call("subtract", vec![json!(42), json!(23)]).await?;
    println!("subtract(42, 23) = {}", difference);

    let info: ServerInfo = client.call_as("getinfo", vec![]).await?;
    println!("getinfo() = {:?}", info);

    // Reserved names never leave the process.
    match client.call("rpc.discover", vec![]).await.map_err(|e| e.into_kind()) {
        Err(ErrorKind::ReservedMethod { method }) => println!("{} was rejected locally", method),
        other => println!("Unexpected outcome: {:?}", other),
    }

    match client.call("no_such_method", vec![]).await {
        Ok(value) => println!("no_such_method() = {}", value),
        Err(e) => match e.kind() {
            ErrorKind::Server(data) => println!("Server error {}: {}", data.code, data.message),
            ErrorKind::Authentication => println!("Credentials were rejected by {:?}", e.endpoint()),
            _ => println!("{}", e),
        },
    }

    Ok(())
}
