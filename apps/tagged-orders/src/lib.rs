// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::items_after_statements
    )
)]

//! Tagged Orders - Rust Core Library
//!
//! Serves the orders of one basket/strategy execution (identified by an
//! order tag) with a human-readable label per trading symbol.
//!
//! # Architecture (Clean Architecture + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Pure business logic
//!   - `orders`: Order model, dedup/filter/sort pipeline
//!   - `instruments`: Reference dataset, ticker decomposition, symbol humanizer
//!
//! - **Application**: Use cases and orchestration
//!   - `ports`: Interfaces for external systems (`OrderLogPort`, `BrokerPort`,
//!     `InstrumentReferencePort`)
//!   - `use_cases`: `GetTaggedOrdersUseCase`
//!
//! - **Infrastructure**: Adapters (implementations)
//!   - `broker`: Kite Connect adapter
//!   - `order_log`: Persisted order log adapters
//!   - `instruments`: Kite instruments dump loader
//!   - `http`: Axum REST controller
//!   - `config`: Dependency injection container

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases and port definitions.
pub mod application;

/// Infrastructure layer - Adapters and external integrations.
pub mod infrastructure;

// =============================================================================
// Ambient
// =============================================================================

/// Service configuration loaded from the environment.
pub mod config;

/// Prometheus metrics.
pub mod metrics;

/// Tracing subscriber and OpenTelemetry setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

// Domain re-exports
pub use domain::instruments::{
    InstrumentReferenceDataset, InstrumentReferenceEntry, ReferenceSymbolResolver,
    ResolvedSymbol, SymbolResolutionError, SymbolResolver,
};
pub use domain::orders::{HumanizedOrder, Order, OrderDecodeError, RawOrder, TransactionType};
pub use domain::shared::{OrderId, OrderTag, OrderTimestamp};

// Application re-exports
pub use application::errors::{OrdersError, Upstream};
pub use application::ports::{
    BrokerError, BrokerPort, InstrumentReferenceError, InstrumentReferencePort, OrderLogError,
    OrderLogPort,
};
pub use application::use_cases::{GetTaggedOrdersUseCase, OrderSource};

// Ambient re-exports
pub use config::{ConfigError, ServiceConfig};

// Infrastructure re-exports
pub use infrastructure::broker::kite::{KiteBrokerAdapter, KiteConfig, KiteError};
pub use infrastructure::config::{Container, ContainerError, ProductionContainer};
pub use infrastructure::http::{AppState, create_router};
pub use infrastructure::instruments::KiteInstrumentLoader;
pub use infrastructure::order_log::{HttpOrderLogAdapter, InMemoryOrderLog};
