use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::services::notifier;
use crate::state::AppState;

/// Single-shot queue poll: returns the consumed message, or 404 when the
/// queue had nothing for us.
pub async fn drain(State(state): State<Arc<AppState>>) -> Response {
    match notifier::drain_once(&state).await {
        Some(message) => Json(message).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "statusCode": 404,
                "body": "No requests found",
            })),
        )
            .into_response(),
    }
}
