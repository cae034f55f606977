//! Get Tagged Orders Use Case
//!
//! Order source resolution → normalization → humanization → assembly.

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::errors::{OrdersError, Upstream};
use crate::application::ports::{BrokerPort, InstrumentReferencePort, OrderLogPort};
use crate::domain::instruments::{InstrumentReferenceDataset, SymbolResolver, humanize};
use crate::domain::orders::{HumanizedOrder, Order, RawOrder, normalize};
use crate::domain::shared::OrderTag;

/// Where the orders of a request came from.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderSource {
    /// The persisted order log had orders for the tag.
    Persisted(Vec<RawOrder>),
    /// The order log was empty; orders came from the live broker.
    Live(Vec<RawOrder>),
}

impl OrderSource {
    /// Metrics/log label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Persisted(_) => "persisted",
            Self::Live(_) => "live",
        }
    }

    /// Dependency the orders were read from.
    #[must_use]
    pub const fn upstream(&self) -> Upstream {
        match self {
            Self::Persisted(_) => Upstream::OrderLog,
            Self::Live(_) => Upstream::Broker,
        }
    }

    /// Number of raw orders.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Persisted(orders) | Self::Live(orders) => orders.len(),
        }
    }

    /// Whether no orders were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take the orders.
    #[must_use]
    pub fn into_orders(self) -> Vec<RawOrder> {
        match self {
            Self::Persisted(orders) | Self::Live(orders) => orders,
        }
    }
}

/// Use case serving the orders of one order tag.
pub struct GetTaggedOrdersUseCase<L, B, I, S>
where
    L: OrderLogPort,
    B: BrokerPort,
    I: InstrumentReferencePort,
    S: SymbolResolver,
{
    order_log: Arc<L>,
    broker: Arc<B>,
    instruments: Arc<I>,
    resolver: Arc<S>,
}

impl<L, B, I, S> GetTaggedOrdersUseCase<L, B, I, S>
where
    L: OrderLogPort,
    B: BrokerPort,
    I: InstrumentReferencePort,
    S: SymbolResolver,
{
    /// Create a new `GetTaggedOrdersUseCase`.
    pub const fn new(order_log: Arc<L>, broker: Arc<B>, instruments: Arc<I>, resolver: Arc<S>) -> Self {
        Self {
            order_log,
            broker,
            instruments,
            resolver,
        }
    }

    /// Orders placed under `order_tag`, newest first, each with its label.
    ///
    /// A blank tag is rejected before any upstream call. The order log and
    /// the instrument reference are fetched concurrently; the broker is
    /// queried only when the log has nothing for the tag.
    pub async fn execute(&self, order_tag: &str) -> Result<Vec<HumanizedOrder>, OrdersError> {
        let tag = OrderTag::parse(order_tag).ok_or_else(|| OrdersError::BadRequest {
            message: "order_tag is required".to_string(),
        })?;

        // 1. Persisted log and reference dataset in parallel
        let (persisted, dataset) = tokio::try_join!(
            async {
                self.order_log
                    .fetch_persisted_orders(&tag)
                    .await
                    .map_err(OrdersError::from)
            },
            async {
                self.instruments
                    .load_reference()
                    .await
                    .map_err(OrdersError::from)
            },
        )?;

        // 2. Fall back to the live broker
        let source = self.resolve_source(persisted).await?;
        crate::metrics::record_source(source.label());
        debug!(source = source.label(), raw_orders = source.len(), "Order source resolved");

        // 3. Dedup, filter, decode, sort
        let upstream = source.upstream();
        let orders = normalize(source.into_orders(), &tag).map_err(|e| {
            OrdersError::UpstreamFailure {
                upstream,
                message: e.to_string(),
            }
        })?;

        // 4. Humanize
        let humanized = self.assemble(orders, &dataset)?;
        info!(order_tag = %tag, orders = humanized.len(), "Tagged orders served");

        Ok(humanized)
    }

    /// Use `persisted` when it has orders, otherwise fetch live orders.
    pub async fn resolve_source(
        &self,
        persisted: Vec<RawOrder>,
    ) -> Result<OrderSource, OrdersError> {
        if !persisted.is_empty() {
            return Ok(OrderSource::Persisted(persisted));
        }

        let live = self.broker.fetch_orders().await?;
        Ok(OrderSource::Live(live))
    }

    /// Attach a label to each order. Any unresolvable symbol fails the batch.
    pub fn assemble(
        &self,
        orders: Vec<Order>,
        dataset: &InstrumentReferenceDataset,
    ) -> Result<Vec<HumanizedOrder>, OrdersError> {
        orders
            .into_iter()
            .map(|order| {
                let label = humanize(self.resolver.as_ref(), dataset, &order.tradingsymbol)?;
                Ok(HumanizedOrder::new(order, label))
            })
            .collect()
    }
}
