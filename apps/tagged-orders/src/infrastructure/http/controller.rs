//! HTTP Controller (Driver Adapter)
//!
//! Axum-based REST API that delegates to application use cases.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::application::errors::OrdersError;
use crate::application::ports::{BrokerPort, InstrumentReferencePort, OrderLogPort};
use crate::application::use_cases::GetTaggedOrdersUseCase;
use crate::domain::instruments::SymbolResolver;

use super::request::OrdersQuery;
use super::response::HealthResponse;

/// Application state shared across handlers.
pub struct AppState<L, B, I, S>
where
    L: OrderLogPort,
    B: BrokerPort,
    I: InstrumentReferencePort,
    S: SymbolResolver,
{
    /// Use case serving tagged orders.
    pub get_tagged_orders: Arc<GetTaggedOrdersUseCase<L, B, I, S>>,
    /// Bearer token required on API routes; `None` disables the check.
    pub api_token: Option<String>,
    /// Application version.
    pub version: String,
}

impl<L, B, I, S> Clone for AppState<L, B, I, S>
where
    L: OrderLogPort,
    B: BrokerPort,
    I: InstrumentReferencePort,
    S: SymbolResolver,
{
    fn clone(&self) -> Self {
        Self {
            get_tagged_orders: Arc::clone(&self.get_tagged_orders),
            api_token: self.api_token.clone(),
            version: self.version.clone(),
        }
    }
}

/// Create the HTTP router with all endpoints.
pub fn create_router<L, B, I, S>(state: AppState<L, B, I, S>) -> Router
where
    L: OrderLogPort + 'static,
    B: BrokerPort + 'static,
    I: InstrumentReferencePort + 'static,
    S: SymbolResolver + 'static,
{
    Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/orders", get(get_orders))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check<L, B, I, S>(State(state): State<AppState<L, B, I, S>>) -> impl IntoResponse
where
    L: OrderLogPort,
    B: BrokerPort,
    I: InstrumentReferencePort,
    S: SymbolResolver,
{
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: state.version.clone(),
    })
}

/// Tagged orders endpoint.
///
/// A query string that does not decode is answered with the same JSON
/// error body as a missing tag, after the token check.
async fn get_orders<L, B, I, S>(
    State(state): State<AppState<L, B, I, S>>,
    headers: HeaderMap,
    query: Result<Query<OrdersQuery>, QueryRejection>,
) -> Response
where
    L: OrderLogPort,
    B: BrokerPort,
    I: InstrumentReferencePort,
    S: SymbolResolver,
{
    let started = Instant::now();
    let (order_tag, rejection) = match query {
        Ok(Query(query)) => (query.order_tag.unwrap_or_default(), None),
        Err(rejection) => (String::new(), Some(rejection.body_text())),
    };
    let span = tracing::info_span!(
        "get_orders",
        request_id = %Uuid::new_v4(),
        order_tag = %order_tag
    );

    let result = async {
        authorize(state.api_token.as_deref(), &headers)?;
        if let Some(message) = rejection {
            return Err(OrdersError::BadRequest { message });
        }
        state.get_tagged_orders.execute(&order_tag).await
    }
    .instrument(span.clone())
    .await;

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) => e.outcome(),
    };
    crate::metrics::record_request(outcome, started.elapsed().as_secs_f64());

    match result {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => {
            span.in_scope(|| log_failure(&e));
            e.into_response()
        }
    }
}

/// Check the bearer token when one is configured.
fn authorize(expected: Option<&str>, headers: &HeaderMap) -> Result<(), OrdersError> {
    let Some(expected) = expected else {
        return Ok(());
    };

    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match presented {
        Some(token) if token == expected => Ok(()),
        _ => Err(OrdersError::Unauthenticated),
    }
}

fn log_failure(err: &OrdersError) {
    match err {
        OrdersError::Unauthenticated | OrdersError::BadRequest { .. } => {
            tracing::warn!(code = err.code(), error = %err, "Request rejected");
        }
        OrdersError::UpstreamFailure { upstream, .. } => {
            tracing::error!(upstream = %upstream, error = %err, "Upstream failure");
        }
        OrdersError::SymbolResolutionFailure { tradingsymbol, .. } => {
            tracing::error!(tradingsymbol = %tradingsymbol, error = %err, "Symbol resolution failed");
        }
    }
}
