use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use common::models::{ErrorRecord, Severity};
use serde_json::json;
use tracing::error;

use crate::http::AppState;

/// Bearer-token check in front of the ingest route. The core pipeline only
/// ever sees authenticated signals; this is the whole authentication surface.
pub async fn require_token(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let supplied = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let Some(supplied) = supplied else {
        return reject(&state, "missing API token").await;
    };

    let token = supplied.strip_prefix("Bearer ").unwrap_or(supplied);
    if token != state.api_token {
        return reject(&state, "invalid API token").await;
    }

    next.run(req).await
}

async fn reject(state: &AppState, reason: &str) -> Response {
    // Audit the refusal, but a broken audit store must not change the 403
    // the caller sees.
    if let Err(e) = state
        .audit
        .record_error(&ErrorRecord::new(reason, Severity::Warning))
        .await
    {
        error!("failed to record auth rejection: {e}");
    }
    (
        StatusCode::FORBIDDEN,
        Json(json!({"status": "error", "message": reason})),
    )
        .into_response()
}
