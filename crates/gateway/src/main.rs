use std::sync::Arc;

use dotenvy::dotenv;
use tracing::info;

use common::config::Config;
use common::logger;
use gateway::gate::SignalGate;
use gateway::http::{self, AppState};
use gateway::services::TradeExecutor;
use gateway::sizing::PositionSizer;
use market_data::remote::RestBrokerClient;
use market_data::{BrokerageApi, MarketDataClient};
use storage::AuditLog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::setup_logger();
    dotenv().ok();

    let config = Config::from_env()?;

    let pool = storage::db::connect(&config.database_path).await?;
    let audit = AuditLog::new(pool);

    let broker: Arc<dyn BrokerageApi> = Arc::new(RestBrokerClient::new(
        &config.broker_base_url,
        &config.broker_api_key,
    ));
    let market = MarketDataClient::new(
        broker.clone(),
        audit.clone(),
        config.fallback_capital,
        config.retry_attempts,
        config.retry_delay,
    );

    let gate = Arc::new(SignalGate::new(
        config.max_signal_age,
        config.cooldown_period,
    ));
    let executor = Arc::new(TradeExecutor::new(
        market,
        PositionSizer::new(config.allocation_fraction),
        broker,
        audit.clone(),
        config.stop_loss_fraction,
        config.dry_run,
    ));

    let state = AppState {
        gate,
        executor,
        audit,
        api_token: config.api_token.clone(),
    };
    let app = http::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!(
        "signal gateway listening on {} (dry_run={})",
        config.bind_addr, config.dry_run
    );
    axum::serve(listener, app).await?;
    Ok(())
}
