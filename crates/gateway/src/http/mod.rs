pub mod auth;
pub mod signal;

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use storage::AuditLog;

use crate::gate::SignalGate;
use crate::services::TradeExecutor;

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<SignalGate>,
    pub executor: Arc<TradeExecutor>,
    pub audit: AuditLog,
    pub api_token: String,
}

/// `/signal` sits behind the bearer-token middleware; `/health` does not.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/signal", post(signal::receive_signal))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_token,
        ))
        .route("/health", get(health))
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
