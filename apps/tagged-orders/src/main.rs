//! Tagged Orders Binary
//!
//! Serves `GET /api/v1/orders?order_tag=...`.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin tagged-orders
//! ```
//!
//! # Environment Variables
//!
//! ## Required
//! - `KITE_API_KEY`, `KITE_ACCESS_TOKEN`: Kite Connect session
//! - `ORDER_LOG_HOST_URL`, `ORDER_LOG_USER_KEY`: Persisted order log
//!
//! ## Optional
//! - `HTTP_PORT`: HTTP server port (default: 8080)
//! - `METRICS_PORT`: Prometheus exporter port (default: 0, disabled)
//! - `SERVICE_API_TOKEN`: Bearer token required on API routes
//! - `RUST_LOG`: Log level (default: tagged_orders=info)

use std::net::SocketAddr;
use std::sync::Arc;

use tagged_orders::config::ServiceConfig;
use tagged_orders::infrastructure::config::ProductionContainer;
use tagged_orders::infrastructure::http::{AppState, create_router};
use tagged_orders::metrics::{MetricsConfig, init_metrics};
use tagged_orders::telemetry::{TelemetrySettings, init_telemetry};
use tokio::net::TcpListener;
use tokio::signal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_dotenv();
    let _telemetry = init_telemetry(&TelemetrySettings::from_env());

    tracing::info!("Starting tagged orders service");

    let config = ServiceConfig::from_env()?;
    log_config(&config);

    if config.server.metrics_port != 0 {
        init_metrics(&MetricsConfig::with_port(config.server.metrics_port))?;
    }

    let container = ProductionContainer::from_config(&config)?;
    run_http_server(&config, &container).await?;

    tracing::info!("Tagged orders service stopped");
    Ok(())
}

/// Load .env file from current or ancestor directories.
fn load_dotenv() {
    if dotenvy::dotenv().is_ok() {
        return;
    }

    if let Ok(cwd) = std::env::current_dir() {
        for dir in cwd.ancestors().skip(1) {
            let env_path = dir.join(".env");
            if env_path.exists() {
                let _ = dotenvy::from_path(&env_path);
                return;
            }
        }
    }
}

fn log_config(config: &ServiceConfig) {
    tracing::info!(
        kite_base_url = %config.kite_base_url,
        segment = %config.instruments_segment,
        underlyings = ?config.index_underlyings,
        http_port = config.server.http_port,
        metrics_port = config.server.metrics_port,
        api_token = config.api_token.is_some(),
        "Configuration loaded"
    );
}

/// Serve the REST API until a shutdown signal arrives.
async fn run_http_server(
    config: &ServiceConfig,
    container: &ProductionContainer,
) -> anyhow::Result<()> {
    let state = AppState {
        get_tagged_orders: Arc::new(container.get_tagged_orders_use_case()),
        api_token: config.api_token.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.http_port));
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "HTTP server listening");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /api/v1/orders?order_tag=<tag>");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, initiating shutdown");
        }
    }
}
