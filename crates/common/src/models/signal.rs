use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeSide::Buy => "buy",
            TradeSide::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidSignal {
    #[error("signal asset must be non-empty")]
    EmptyAsset,
    #[error("signal timestamp is not a valid point in time")]
    BadTimestamp,
}

/// An externally supplied instruction to buy or sell an asset at a point in
/// time. Staleness is judged purely against the producer-declared timestamp;
/// clock skew is the producer's contract to uphold.
#[derive(Debug, Clone)]
pub struct Signal {
    pub asset: String,
    pub side: TradeSide,
    pub timestamp: DateTime<Utc>,
}

impl Signal {
    /// Builds a validated signal from the wire representation
    /// (asset string, side, epoch seconds with optional fraction).
    pub fn from_epoch(asset: String, side: TradeSide, epoch_secs: f64) -> Result<Self, InvalidSignal> {
        // Normalized so "BTC" and " BTC " share one cooldown key and one
        // audit identity.
        let asset = asset.trim().to_string();
        if asset.is_empty() {
            return Err(InvalidSignal::EmptyAsset);
        }
        if !epoch_secs.is_finite() {
            return Err(InvalidSignal::BadTimestamp);
        }
        let timestamp = Utc
            .timestamp_millis_opt((epoch_secs * 1000.0) as i64)
            .single()
            .ok_or(InvalidSignal::BadTimestamp)?;
        Ok(Self {
            asset,
            side,
            timestamp,
        })
    }
}
