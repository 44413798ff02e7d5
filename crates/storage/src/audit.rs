use common::models::{ErrorRecord, TradeRecord};
use sqlx::SqlitePool;
use thiserror::Error;
use tracing::debug;

use crate::repositories::{ErrorsRepository, TradesRepository};

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("audit store write failed: {0}")]
    Database(#[from] sqlx::Error),
}

/// Append-only audit trail for trades and operational errors.
///
/// Both record calls commit synchronously: returning `Ok` means the row is
/// on disk. There is no in-memory buffering fallback; if the store is
/// unreachable the failure propagates to the caller, because a silently
/// dropped error record could mask a dropped trade record.
#[derive(Clone)]
pub struct AuditLog {
    pool: SqlitePool,
}

impl AuditLog {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn record_trade(&self, record: &TradeRecord) -> Result<(), StorageError> {
        TradesRepository::insert(&self.pool, record).await?;
        debug!(
            "recorded {} trade for {}: amount={} price={} stop_loss={}",
            record.trade_type, record.asset, record.trade_amount, record.price, record.stop_loss
        );
        Ok(())
    }

    pub async fn record_error(&self, record: &ErrorRecord) -> Result<(), StorageError> {
        ErrorsRepository::insert(&self.pool, record).await?;
        debug!("recorded {} error: {}", record.severity, record.message);
        Ok(())
    }
}
