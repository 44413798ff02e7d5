use std::sync::Arc;

use chrono::Utc;
use common::models::{ErrorRecord, Severity, Signal, TradeRecord};
use market_data::{BrokerageApi, MarketDataClient, MarketDataError, OrderTicket};
use storage::{AuditLog, StorageError};
use tracing::{error, info};

use crate::sizing::PositionSizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionOutcome {
    /// Trade recorded and order submitted.
    Completed,
    /// Execution stopped after an audited fault; no order is live.
    Aborted,
}

/// Orchestrates one admitted signal: size against capital, price, compute the
/// stop-loss, record, submit.
///
/// Only audit-store failures propagate as errors; every other fault resolves
/// to an `Aborted` outcome with a durable error record behind it.
pub struct TradeExecutor {
    market: MarketDataClient,
    sizer: PositionSizer,
    broker: Arc<dyn BrokerageApi>,
    audit: AuditLog,
    stop_loss_fraction: f64,
    dry_run: bool,
}

impl TradeExecutor {
    pub fn new(
        market: MarketDataClient,
        sizer: PositionSizer,
        broker: Arc<dyn BrokerageApi>,
        audit: AuditLog,
        stop_loss_fraction: f64,
        dry_run: bool,
    ) -> Self {
        Self {
            market,
            sizer,
            broker,
            audit,
            stop_loss_fraction,
            dry_run,
        }
    }

    pub async fn execute(&self, signal: &Signal) -> Result<ExecutionOutcome, StorageError> {
        let balance = self.market.account_balance().await?;
        let amount = self.sizer.size_trade(balance);

        let price = match self.market.live_price(&signal.asset).await {
            Ok(price) => price,
            Err(MarketDataError::Audit(e)) => return Err(e),
            Err(MarketDataError::PriceUnavailable { .. }) => {
                self.audit
                    .record_error(&ErrorRecord::new(
                        format!(
                            "could not execute trade for {}: missing live price",
                            signal.asset
                        ),
                        Severity::Critical,
                    ))
                    .await?;
                return Ok(ExecutionOutcome::Aborted);
            }
        };

        let stop_loss = price * (1.0 - self.stop_loss_fraction);
        let record = TradeRecord {
            asset: signal.asset.clone(),
            trade_type: signal.side,
            trade_amount: amount,
            price,
            stop_loss,
            timestamp: Utc::now(),
        };

        // The trade record lands before the order leaves. A crash between the
        // two may over-record, never under-record.
        self.audit.record_trade(&record).await?;

        let ticket = OrderTicket {
            asset: signal.asset.clone(),
            side: signal.side,
            quantity: amount,
            dry_run: self.dry_run,
        };

        match self.broker.place_order(&ticket).await {
            Ok(ack) => {
                info!(
                    "executed {} trade for {}: amount={} price={} stop_loss={} order_id={} status={}",
                    signal.side, signal.asset, amount, price, stop_loss, ack.order_id, ack.status
                );
                Ok(ExecutionOutcome::Completed)
            }
            Err(e) => {
                error!("order submission failed for {}: {e}", signal.asset);
                self.audit
                    .record_error(&ErrorRecord::new(
                        format!("order submission failed for {}: {e}", signal.asset),
                        Severity::Error,
                    ))
                    .await?;
                Ok(ExecutionOutcome::Aborted)
            }
        }
    }
}
