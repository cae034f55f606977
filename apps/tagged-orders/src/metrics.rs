//! Prometheus metrics for the tagged-orders service.
//!
//! # Example
//!
//! ```ignore
//! use tagged_orders::metrics::{init_metrics, MetricsConfig, record_request};
//!
//! init_metrics(&MetricsConfig::with_port(9090))?;
//! record_request("ok", 0.042);
//! ```

use std::net::{Ipv4Addr, SocketAddr};

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Configuration for the metrics exporter.
#[derive(Debug, Clone)]
pub struct MetricsConfig {
    /// Address to bind the metrics HTTP listener.
    pub listen_addr: SocketAddr,
    /// Histogram buckets for request latency (in seconds).
    pub latency_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self::with_port(9090)
    }
}

impl MetricsConfig {
    /// Listen on all interfaces at `port`.
    #[must_use]
    pub fn with_port(port: u16) -> Self {
        Self {
            listen_addr: SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)),
            // Upstream round trips: 5ms to 10s
            latency_buckets: vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        }
    }
}

/// Error type for metrics operations.
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    /// Failed to configure metrics exporter.
    #[error("metrics configuration error: {0}")]
    Configuration(String),
    /// Failed to install metrics exporter.
    #[error("metrics installation error: {0}")]
    Installation(String),
}

/// Start the Prometheus exporter, serving `/metrics` on `listen_addr`.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    PrometheusBuilder::new()
        .with_http_listener(config.listen_addr)
        .set_buckets(&config.latency_buckets)
        .map_err(|e| MetricsError::Configuration(e.to_string()))?
        .install()
        .map_err(|e| MetricsError::Installation(e.to_string()))?;

    tracing::info!(addr = %config.listen_addr, "Prometheus metrics exporter started");

    Ok(())
}

/// Record a finished `/api/v1/orders` request.
///
/// `outcome` is `ok` or the error outcome label.
pub fn record_request(outcome: &'static str, duration_seconds: f64) {
    counter!("tagged_orders_requests_total", "outcome" => outcome).increment(1);
    histogram!("tagged_orders_request_duration_seconds", "outcome" => outcome)
        .record(duration_seconds);
}

/// Record which order source served a request (`persisted` or `live`).
pub fn record_source(source: &'static str) {
    counter!("tagged_orders_source_total", "source" => source).increment(1);
}
