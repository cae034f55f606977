//! Request-level errors.
//!
//! Every failure of the tagged-orders pipeline is terminal for the request.

use std::fmt;

use crate::application::ports::{BrokerError, InstrumentReferenceError, OrderLogError};
use crate::domain::instruments::SymbolResolutionError;

/// Outbound dependency that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upstream {
    /// Persisted order log.
    OrderLog,
    /// Live brokerage.
    Broker,
    /// Instrument reference dump.
    Instruments,
}

impl Upstream {
    /// Label used in logs and metrics.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OrderLog => "order_log",
            Self::Broker => "broker",
            Self::Instruments => "instruments",
        }
    }
}

impl fmt::Display for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors returned by the tagged-orders use case.
#[derive(Debug, Clone, thiserror::Error)]
pub enum OrdersError {
    /// Caller is not authenticated.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Invalid request (e.g. missing order tag).
    #[error("Bad request: {message}")]
    BadRequest {
        /// What was wrong.
        message: String,
    },

    /// An outbound dependency failed.
    #[error("Upstream {upstream} failed: {message}")]
    UpstreamFailure {
        /// Which dependency.
        upstream: Upstream,
        /// Underlying error text (logged, never returned to callers).
        message: String,
    },

    /// An order's trading symbol could not be humanized.
    #[error("Cannot resolve trading symbol {tradingsymbol}")]
    SymbolResolutionFailure {
        /// The unresolved symbol.
        tradingsymbol: String,
        /// Underlying error text.
        message: String,
    },
}

impl OrdersError {
    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::BadRequest { .. } => "BAD_REQUEST",
            Self::UpstreamFailure { .. } => "UPSTREAM_FAILURE",
            Self::SymbolResolutionFailure { .. } => "SYMBOL_RESOLUTION_FAILURE",
        }
    }

    /// Metrics outcome label.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::BadRequest { .. } => "bad_request",
            Self::UpstreamFailure { .. } => "upstream_failure",
            Self::SymbolResolutionFailure { .. } => "symbol_resolution_failure",
        }
    }

    fn upstream(upstream: Upstream, err: &impl fmt::Display) -> Self {
        Self::UpstreamFailure {
            upstream,
            message: err.to_string(),
        }
    }
}

impl From<OrderLogError> for OrdersError {
    fn from(err: OrderLogError) -> Self {
        Self::upstream(Upstream::OrderLog, &err)
    }
}

impl From<BrokerError> for OrdersError {
    fn from(err: BrokerError) -> Self {
        Self::upstream(Upstream::Broker, &err)
    }
}

impl From<InstrumentReferenceError> for OrdersError {
    fn from(err: InstrumentReferenceError) -> Self {
        Self::upstream(Upstream::Instruments, &err)
    }
}

impl From<SymbolResolutionError> for OrdersError {
    fn from(err: SymbolResolutionError) -> Self {
        Self::SymbolResolutionFailure {
            tradingsymbol: err.tradingsymbol().to_string(),
            message: err.to_string(),
        }
    }
}
