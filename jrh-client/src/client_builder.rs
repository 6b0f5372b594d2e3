//! Client builder
//!
//! The `ClientBuilder` collects connection parameters and optional telemetry
//! before producing a [`JrhClient`]. Building never touches the network.
//!
//! # Examples
//!
//! ```rust,no_run
//! use jrh_client::ClientBuilder;
//! use std::time::Duration;
//!
//! # fn example() -> jrh_core::Result<()> {
//! let client = ClientBuilder::new("node.example.com", 8332)
//!     .credentials("rpcuser", "rpcpassword")
//!     .ssl(true)
//!     .timeout(Duration::from_secs(30))
//!     .build()?;
//!
//! // With observability
//! let client2 = ClientBuilder::new("localhost", 8332)
//!     .with_default_observability()
//!     .service_name("wallet-poller")
//!     .build()?;
//! # Ok(())
//! # }
//! ```

use crate::transport::ConnectionConfig;
use crate::{ClientMetrics, JrhClient};
use jrh_core::{ErrorKind, Result};
use std::sync::Arc;
use std::time::Duration;

/// Builder for configuring and creating a JrhClient
pub struct ClientBuilder {
    config: ConnectionConfig,
    observability_config: Option<jrh_core::ObservabilityConfig>,
    service_name: Option<String>,
}

impl ClientBuilder {
    /// Create a new client builder
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            config: ConnectionConfig::new(host, port),
            observability_config: None,
            service_name: None,
        }
    }

    /// Set both Basic authentication credentials
    pub fn credentials(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.user = Some(user.into());
        self.config.password = Some(password.into());
        self
    }

    /// Set the Basic authentication user
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.config.user = Some(user.into());
        self
    }

    /// Set the Basic authentication password
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config.password = Some(password.into());
        self
    }

    /// Use HTTPS instead of plain HTTP
    pub fn ssl(mut self, ssl: bool) -> Self {
        self.config.ssl = ssl;
        self
    }

    /// Bound every request with a transport timeout
    ///
    /// A call that exceeds it fails with `ErrorKind::Communication`. There is no
    /// timeout by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    /// Enable OpenTelemetry observability with custom configuration
    pub fn with_observability(mut self, config: jrh_core::ObservabilityConfig) -> Self {
        self.observability_config = Some(config);
        self
    }

    /// Enable OpenTelemetry observability with default configuration
    pub fn with_default_observability(mut self) -> Self {
        self.observability_config = Some(jrh_core::ObservabilityConfig::default());
        self
    }

    /// Set service name for observability (used if observability is enabled)
    pub fn service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }

    /// Build the client
    ///
    /// Initializes observability when it was requested, which installs global
    /// providers and may therefore be done once per process.
    pub fn build(self) -> Result<JrhClient> {
        if self.config.host.trim().is_empty() {
            return Err(ErrorKind::Config("host must not be empty".to_string()).into());
        }

        let metrics = if let Some(mut config) = self.observability_config {
            if let Some(name) = self.service_name {
                config.service_name = name;
            }

            jrh_core::init_observability(config.clone())
                .map_err(|e| ErrorKind::Config(format!("Failed to initialize observability: {}", e)))?;

            Some(Arc::new(ClientMetrics::new(&config.service_name)))
        } else {
            None
        };

        tracing::debug!(endpoint = %self.config.endpoint(), "Client configured");
        Ok(JrhClient::from_parts(self.config, metrics))
    }
}
