use async_trait::async_trait;
use common::models::TradeSide;

/// One order submission, vendor-agnostic. `dry_run` asks the venue to
/// validate without transmitting a live order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderTicket {
    pub asset: String,
    pub side: TradeSide,
    pub quantity: f64,
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct OrderAck {
    pub order_id: String,
    pub status: String,
}

/// The brokerage capability the pipeline depends on. Implementations own
/// transport, endpoint layout and credentials; callers see prices, balances
/// and acknowledgements only.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait BrokerageApi: Send + Sync {
    async fn fetch_price(&self, asset: &str) -> anyhow::Result<f64>;

    async fn fetch_balance(&self) -> anyhow::Result<f64>;

    async fn place_order(&self, ticket: &OrderTicket) -> anyhow::Result<OrderAck>;
}
