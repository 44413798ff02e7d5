use std::sync::Arc;
use std::time::Duration;

use common::models::{ErrorRecord, Severity};
use common::retry::with_fixed_retry;
use storage::{AuditLog, StorageError};
use thiserror::Error;
use tracing::error;

use crate::traits::BrokerageApi;

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("no live price available for {asset}")]
    PriceUnavailable { asset: String },
    #[error(transparent)]
    Audit(#[from] StorageError),
}

/// Live price and balance lookups with bounded retry.
///
/// The two lookups fail differently on exhaustion: a missing price is a hard
/// stop (executing without a price is unsafe), while a missing balance
/// degrades to the configured fallback capital so sizing can proceed. Both
/// exhaustion paths leave a CRITICAL record in the audit trail.
#[derive(Clone)]
pub struct MarketDataClient {
    broker: Arc<dyn BrokerageApi>,
    audit: AuditLog,
    fallback_capital: f64,
    attempts: u32,
    delay: Duration,
}

impl MarketDataClient {
    pub fn new(
        broker: Arc<dyn BrokerageApi>,
        audit: AuditLog,
        fallback_capital: f64,
        attempts: u32,
        delay: Duration,
    ) -> Self {
        Self {
            broker,
            audit,
            fallback_capital,
            attempts,
            delay,
        }
    }

    pub async fn live_price(&self, asset: &str) -> Result<f64, MarketDataError> {
        let fetched = with_fixed_retry(self.attempts, self.delay, "live price fetch", || {
            self.broker.fetch_price(asset)
        })
        .await;

        match fetched {
            Ok(price) => Ok(price),
            Err(e) => {
                error!("live price fetch for {asset} exhausted retries: {e}");
                self.audit
                    .record_error(&ErrorRecord::new(
                        format!("error fetching live price for {asset}: {e}"),
                        Severity::Critical,
                    ))
                    .await?;
                Err(MarketDataError::PriceUnavailable {
                    asset: asset.to_string(),
                })
            }
        }
    }

    /// Never fails on upstream trouble: exhausted retries fall back to the
    /// configured capital so the caller can still size a trade. Only an
    /// audit-write failure propagates.
    pub async fn account_balance(&self) -> Result<f64, StorageError> {
        let fetched = with_fixed_retry(self.attempts, self.delay, "balance fetch", || {
            self.broker.fetch_balance()
        })
        .await;

        match fetched {
            Ok(balance) => Ok(balance),
            Err(e) => {
                error!("balance fetch exhausted retries, using fallback capital: {e}");
                self.audit
                    .record_error(&ErrorRecord::new(
                        format!("error fetching account balance: {e}"),
                        Severity::Critical,
                    ))
                    .await?;
                Ok(self.fallback_capital)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use storage::db::connect_in_memory;

    use crate::traits::MockBrokerageApi;

    async fn client_with(broker: MockBrokerageApi) -> (MarketDataClient, sqlx::SqlitePool) {
        let pool = connect_in_memory().await.unwrap();
        let audit = AuditLog::new(pool.clone());
        let client = MarketDataClient::new(Arc::new(broker), audit, 10_000.0, 3, Duration::ZERO);
        (client, pool)
    }

    async fn critical_errors(pool: &sqlx::SqlitePool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM errors WHERE severity = 'CRITICAL'")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn price_recovers_on_transient_failure() {
        let mut broker = MockBrokerageApi::new();
        let mut calls = 0;
        broker.expect_fetch_price().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(anyhow!("connection reset"))
            } else {
                Ok(101.5)
            }
        });

        let (client, pool) = client_with(broker).await;
        assert_eq!(client.live_price("BTC").await.unwrap(), 101.5);
        assert_eq!(critical_errors(&pool).await, 0);
    }

    #[tokio::test]
    async fn price_exhaustion_records_critical_and_hard_stops() {
        let mut broker = MockBrokerageApi::new();
        broker
            .expect_fetch_price()
            .times(3)
            .returning(|_| Err(anyhow!("upstream down")));

        let (client, pool) = client_with(broker).await;
        let err = client.live_price("BTC").await.unwrap_err();
        assert!(matches!(
            err,
            MarketDataError::PriceUnavailable { ref asset } if asset == "BTC"
        ));
        assert_eq!(critical_errors(&pool).await, 1);
    }

    #[tokio::test]
    async fn balance_exhaustion_degrades_to_fallback_capital() {
        let mut broker = MockBrokerageApi::new();
        broker
            .expect_fetch_balance()
            .times(3)
            .returning(|| Err(anyhow!("upstream down")));

        let (client, pool) = client_with(broker).await;
        assert_eq!(client.account_balance().await.unwrap(), 10_000.0);
        assert_eq!(critical_errors(&pool).await, 1);
    }

    #[tokio::test]
    async fn balance_success_passes_through() {
        let mut broker = MockBrokerageApi::new();
        broker
            .expect_fetch_balance()
            .times(1)
            .returning(|| Ok(25_000.0));

        let (client, pool) = client_with(broker).await;
        assert_eq!(client.account_balance().await.unwrap(), 25_000.0);
        assert_eq!(critical_errors(&pool).await, 0);
    }

    #[tokio::test]
    async fn audit_failure_propagates_from_price_path() {
        let mut broker = MockBrokerageApi::new();
        broker
            .expect_fetch_price()
            .times(3)
            .returning(|_| Err(anyhow!("upstream down")));

        let (client, pool) = client_with(broker).await;
        pool.close().await;

        let err = client.live_price("BTC").await.unwrap_err();
        assert!(matches!(err, MarketDataError::Audit(_)));
    }
}
