//! Tracing Setup
//!
//! Console logging via `tracing-subscriber`, plus an optional OTLP span
//! exporter.
//!
//! # Configuration
//!
//! - `RUST_LOG`: Filter directives (default: `tagged_orders=info`)
//! - `OTEL_ENABLED`: Set to `true` to export spans over OTLP (default: `false`)
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP gRPC endpoint (default: `http://localhost:4317`)
//! - `OTEL_SERVICE_NAME`: Service name for traces (default: `tagged-orders`)

use std::io::IsTerminal;

use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "tagged_orders=info";
const DEFAULT_ENDPOINT: &str = "http://localhost:4317";
const DEFAULT_SERVICE_NAME: &str = "tagged-orders";

/// Telemetry settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetrySettings {
    /// Export spans over OTLP.
    pub otel_enabled: bool,
    /// OTLP gRPC endpoint.
    pub endpoint: String,
    /// Service name attached to spans.
    pub service_name: String,
}

impl TelemetrySettings {
    /// Read settings from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            otel_enabled: lookup("OTEL_ENABLED")
                .is_some_and(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1")),
            endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            service_name: lookup("OTEL_SERVICE_NAME")
                .unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string()),
        }
    }
}

/// Guard that shuts down the tracer provider on drop.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Error shutting down tracer provider: {e:?}");
            }
        }
    }
}

/// Initialize the global subscriber.
///
/// Returns a guard that shuts down the tracer provider when dropped. Falls
/// back to console-only logging when the exporter cannot be built.
#[must_use]
pub fn init_telemetry(settings: &TelemetrySettings) -> TelemetryGuard {
    let ansi = std::io::stdout().is_terminal();

    if !settings.otel_enabled {
        init_console(ansi);
        tracing::debug!("OpenTelemetry disabled, using console logging only");
        return TelemetryGuard { provider: None };
    }

    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&settings.endpoint)
        .build()
    {
        Ok(exp) => exp,
        Err(e) => {
            eprintln!("Failed to create OTLP exporter: {e:?}, falling back to console logging");
            init_console(ansi);
            return TelemetryGuard { provider: None };
        }
    };

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();
    let tracer = provider.tracer(settings.service_name.clone());

    Registry::default()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_ansi(ansi))
        .with(tracing_opentelemetry::layer().with_tracer(tracer))
        .init();

    tracing::info!(
        service_name = %settings.service_name,
        endpoint = %settings.endpoint,
        "OpenTelemetry initialized"
    );

    TelemetryGuard {
        provider: Some(provider),
    }
}

fn init_console(ansi: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(ansi)
        .init();
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_disable_otel() {
        let settings = TelemetrySettings::from_lookup(|_| None);
        assert!(!settings.otel_enabled);
        assert_eq!(settings.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(settings.service_name, DEFAULT_SERVICE_NAME);
    }

    #[test]
    fn otel_enabled_flag() {
        for (raw, expected) in [("true", true), ("1", true), ("TRUE", true), ("false", false), ("no", false)] {
            let settings = TelemetrySettings::from_lookup(|key| {
                (key == "OTEL_ENABLED").then(|| raw.to_string())
            });
            assert_eq!(settings.otel_enabled, expected, "OTEL_ENABLED={raw}");
        }
    }

    #[test]
    fn default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }
}
