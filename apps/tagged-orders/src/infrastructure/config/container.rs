//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;

use crate::application::ports::{
    BrokerPort, InstrumentReferencePort, OrderLogError, OrderLogPort,
};
use crate::application::use_cases::GetTaggedOrdersUseCase;
use crate::config::ServiceConfig;
use crate::domain::instruments::{ReferenceSymbolResolver, SymbolResolver};
use crate::infrastructure::broker::kite::{KiteBrokerAdapter, KiteError, KiteHttpClient};
use crate::infrastructure::instruments::KiteInstrumentLoader;
use crate::infrastructure::order_log::HttpOrderLogAdapter;

/// Container wired with the Kite and HTTP order log adapters.
pub type ProductionContainer = Container<
    HttpOrderLogAdapter,
    KiteBrokerAdapter,
    KiteInstrumentLoader,
    ReferenceSymbolResolver,
>;

/// Error building the production container.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    /// Kite client could not be created.
    #[error("kite client: {0}")]
    Kite(#[from] KiteError),
    /// Order log client could not be created.
    #[error("order log client: {0}")]
    OrderLog(#[from] OrderLogError),
}

/// Dependency injection container.
pub struct Container<L, B, I, S>
where
    L: OrderLogPort + 'static,
    B: BrokerPort + 'static,
    I: InstrumentReferencePort + 'static,
    S: SymbolResolver + 'static,
{
    order_log: Arc<L>,
    broker: Arc<B>,
    instruments: Arc<I>,
    resolver: Arc<S>,
}

impl<L, B, I, S> Container<L, B, I, S>
where
    L: OrderLogPort + 'static,
    B: BrokerPort + 'static,
    I: InstrumentReferencePort + 'static,
    S: SymbolResolver + 'static,
{
    /// Create a new container with all dependencies.
    pub const fn new(order_log: Arc<L>, broker: Arc<B>, instruments: Arc<I>, resolver: Arc<S>) -> Self {
        Self {
            order_log,
            broker,
            instruments,
            resolver,
        }
    }

    /// Get the order log port.
    pub fn order_log(&self) -> Arc<L> {
        Arc::clone(&self.order_log)
    }

    /// Get the broker port.
    pub fn broker(&self) -> Arc<B> {
        Arc::clone(&self.broker)
    }

    /// Get the instrument reference port.
    pub fn instruments(&self) -> Arc<I> {
        Arc::clone(&self.instruments)
    }

    /// Get the symbol resolver.
    pub fn resolver(&self) -> Arc<S> {
        Arc::clone(&self.resolver)
    }

    /// Create a `GetTaggedOrdersUseCase`.
    pub fn get_tagged_orders_use_case(&self) -> GetTaggedOrdersUseCase<L, B, I, S> {
        GetTaggedOrdersUseCase::new(
            Arc::clone(&self.order_log),
            Arc::clone(&self.broker),
            Arc::clone(&self.instruments),
            Arc::clone(&self.resolver),
        )
    }
}

impl ProductionContainer {
    /// Build the production adapters. The broker and the instruments loader
    /// share one Kite client.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ContainerError> {
        let kite = KiteHttpClient::new(&config.kite_config())?;
        let order_log = HttpOrderLogAdapter::new(&config.order_log_config())?;

        let instruments = KiteInstrumentLoader::with_client(kite.clone())
            .with_segment(config.instruments_segment.clone())
            .with_underlyings(config.index_underlyings.clone());

        Ok(Self::new(
            Arc::new(order_log),
            Arc::new(KiteBrokerAdapter::with_client(kite)),
            Arc::new(instruments),
            Arc::new(ReferenceSymbolResolver::new()),
        ))
    }
}
