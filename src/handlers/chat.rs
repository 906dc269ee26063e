use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use crate::models::ChatEnvelope;
use crate::state::AppState;

const APOLOGY: &str = "Sorry, it seems something went wrong.";

/// Proxy a free-text message to the intent engine and wrap its first reply
/// in the inbound envelope shape. Engine failures never reach the caller as
/// errors; they become a fixed apology reply.
pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(envelope): Json<ChatEnvelope>,
) -> Json<ChatEnvelope> {
    let Some(text) = envelope.first_text() else {
        tracing::warn!("chat envelope carried no message");
        return Json(ChatEnvelope::reply(APOLOGY));
    };

    // Callers that do not supply a session share one engine session.
    let session_id = envelope.session_id.as_deref().unwrap_or("test");

    tracing::info!(session = session_id, text = %text, "forwarding message to intent engine");

    let reply = match state.engine.recognize_text(session_id, text).await {
        Ok(messages) => match messages.into_iter().next() {
            Some(reply) => reply,
            None => {
                tracing::warn!("intent engine returned no messages");
                APOLOGY.to_string()
            }
        },
        Err(e) => {
            tracing::error!(error = %e, "intent engine call failed");
            APOLOGY.to_string()
        }
    };

    Json(ChatEnvelope::reply(reply))
}
