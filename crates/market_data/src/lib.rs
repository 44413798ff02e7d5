pub mod remote;
pub mod services;
pub mod traits;

pub use services::market_data_service::{MarketDataClient, MarketDataError};
pub use traits::{BrokerageApi, OrderAck, OrderTicket};

#[cfg(any(test, feature = "mocks"))]
pub use traits::MockBrokerageApi;
