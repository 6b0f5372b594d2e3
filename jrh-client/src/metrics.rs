//! Client metrics
//!
//! OpenTelemetry instruments recorded by [`JrhClient`](crate::JrhClient) when
//! it is built with observability enabled:
//!
//! - **jrh.client.calls.total**: calls made, by method and status (counter)
//! - **jrh.client.call.duration**: round-trip time in seconds (histogram)
//! - **jrh.client.errors.total**: failed calls, by error kind (counter)
//! - **jrh.client.connections.opened**: transports created (counter)
//!
//! Without an installed meter provider the instruments are no-ops.

use opentelemetry::{
    global,
    metrics::{Counter, Histogram, Meter},
    KeyValue,
};

/// Client metrics for monitoring
pub struct ClientMetrics {
    /// Total number of calls made
    pub calls_total: Counter<u64>,
    /// Call duration in seconds
    pub call_duration: Histogram<f64>,
    /// Total number of failed calls
    pub errors_total: Counter<u64>,
    /// Total number of transports created
    pub connections_opened: Counter<u64>,
}

impl ClientMetrics {
    /// Create metrics on the global meter provider
    pub fn new(service_name: impl Into<String>) -> Self {
        let name: &'static str = Box::leak(service_name.into().into_boxed_str());
        let meter = global::meter(name);
        Self::new_with_meter(&meter)
    }

    /// Create metrics on a specific meter
    pub fn new_with_meter(meter: &Meter) -> Self {
        Self {
            calls_total: meter
                .u64_counter("jrh.client.calls.total")
                .with_description("Total number of JSON-RPC calls made")
                .build(),
            call_duration: meter
                .f64_histogram("jrh.client.call.duration")
                .with_description("JSON-RPC call round-trip time in seconds")
                .build(),
            errors_total: meter
                .u64_counter("jrh.client.errors.total")
                .with_description("Total number of failed JSON-RPC calls")
                .build(),
            connections_opened: meter
                .u64_counter("jrh.client.connections.opened")
                .with_description("Total number of HTTP transports created")
                .build(),
        }
    }

    /// Record a finished call
    pub fn record_call(&self, method: &str, status: &str, duration_secs: f64) {
        let attributes = &[
            KeyValue::new("method", method.to_string()),
            KeyValue::new("status", status.to_string()),
        ];
        self.calls_total.add(1, attributes);
        self.call_duration.record(duration_secs, attributes);
    }

    /// Record a failed call by error kind
    pub fn record_error(&self, kind: &str) {
        let attributes = &[KeyValue::new("error_kind", kind.to_string())];
        self.errors_total.add(1, attributes);
    }

    /// Record a transport being created
    pub fn record_connection(&self, endpoint: &str) {
        let attributes = &[KeyValue::new("endpoint", endpoint.to_string())];
        self.connections_opened.add(1, attributes);
    }
}
