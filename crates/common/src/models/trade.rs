use chrono::{DateTime, Utc};

use crate::models::TradeSide;

/// One executed trade, append-only once written. Mirrors the `trades` table.
#[derive(Debug, Clone)]
pub struct TradeRecord {
    pub asset: String,
    pub trade_type: TradeSide,
    pub trade_amount: f64,
    pub price: f64,
    pub stop_loss: f64,
    pub timestamp: DateTime<Utc>,
}
