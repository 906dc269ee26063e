use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::errors::AppError;
use crate::models::{DialogEvent, DialogResponse};
use crate::services::fulfillment;
use crate::state::AppState;

/// Code hook for the dialog engine: one event in, one dialog action out.
pub async fn dialog_hook(
    State(state): State<Arc<AppState>>,
    Json(event): Json<DialogEvent>,
) -> Result<Json<DialogResponse>, AppError> {
    let response = fulfillment::dispatch(&state, &event).await?;
    Ok(Json(response))
}
