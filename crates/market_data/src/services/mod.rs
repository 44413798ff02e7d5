pub mod market_data_service;

pub use market_data_service::{MarketDataClient, MarketDataError};
