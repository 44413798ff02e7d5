use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use common::models::{ErrorRecord, Severity, Signal, TradeSide};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::gate::{Decision, RejectReason};
use crate::http::AppState;

#[derive(Debug, Deserialize)]
pub struct SignalPayload {
    pub asset: String,
    #[serde(rename = "type")]
    pub side: TradeSide,
    /// Epoch seconds as declared by the producer; fractional values allowed.
    pub timestamp: f64,
}

/// `POST /signal`. Stale and cooldown rejections are successfully processed
/// no-ops, so they answer 200 like an executed trade; only malformed input
/// is a client error.
pub async fn receive_signal(
    State(state): State<AppState>,
    payload: Result<Json<SignalPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return invalid(&state, format!("received invalid signal data: {rejection}")).await;
        }
    };

    let signal = match Signal::from_epoch(payload.asset, payload.side, payload.timestamp) {
        Ok(signal) => signal,
        Err(e) => return invalid(&state, format!("received invalid signal data: {e}")).await,
    };

    match state.gate.evaluate(&signal, Utc::now()) {
        Decision::Reject(reason) => {
            let message = match reason {
                RejectReason::Stale => format!("ignoring stale signal for {}", signal.asset),
                RejectReason::Cooldown => format!(
                    "ignoring {} signal for {} due to cooldown",
                    signal.side, signal.asset
                ),
            };
            info!("{message}");
            if let Err(e) = state
                .audit
                .record_error(&ErrorRecord::new(message, Severity::Info))
                .await
            {
                return persistence_failure(e);
            }
            success()
        }
        Decision::Admit => match state.executor.execute(&signal).await {
            Ok(_) => success(),
            Err(e) => persistence_failure(e),
        },
    }
}

fn success() -> Response {
    (
        StatusCode::OK,
        Json(json!({"status": "success", "message": "signal processed"})),
    )
        .into_response()
}

async fn invalid(state: &AppState, message: String) -> Response {
    if let Err(e) = state
        .audit
        .record_error(&ErrorRecord::new(message.as_str(), Severity::Warning))
        .await
    {
        error!("failed to record validation rejection: {e}");
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"status": "error", "message": "invalid signal data"})),
    )
        .into_response()
}

fn persistence_failure(e: storage::StorageError) -> Response {
    // The record itself could not be written; process-level logging is the
    // last resort.
    error!("audit store unavailable: {e}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({"status": "error", "message": "internal error"})),
    )
        .into_response()
}
