use std::sync::Arc;

use crate::models::{QueueMessage, ReservationRequest};
use crate::state::AppState;

/// Long-poll bound on the single receive call.
pub const POLL_WAIT_SECONDS: u32 = 20;

/// Poll the queue once. On a hit, send the notification email and delete the
/// message whether or not the send worked; the queue's redelivery semantics
/// are not second-guessed here. Returns the consumed message, if any.
pub async fn drain_once(state: &Arc<AppState>) -> Option<QueueMessage> {
    let message = match state.queue.receive(POLL_WAIT_SECONDS).await {
        Ok(Some(message)) => message,
        Ok(None) => {
            tracing::info!("no requests found");
            return None;
        }
        Err(e) => {
            tracing::error!(error = %e, "queue receive failed");
            return None;
        }
    };

    match ReservationRequest::from_attributes(&message.message_attributes) {
        Ok(request) => {
            let subject = format!("{} Cuisine Suggestions", request.cuisine);
            let body = notification_body(&request);
            match state.mailer.send_email(&request.email, &subject, &body).await {
                Ok(()) => tracing::info!(to = %request.email, "notification email sent"),
                Err(e) => {
                    tracing::error!(error = %e, to = %request.email, "failed to send notification email");
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, message_id = %message.message_id, "malformed queue message");
        }
    }

    if let Err(e) = state.queue.delete(&message.receipt_handle).await {
        tracing::error!(error = %e, message_id = %message.message_id, "failed to delete queue message");
    }

    Some(message)
}

fn notification_body(request: &ReservationRequest) -> String {
    format!(
        "Hello! Here are my {} cuisine suggestions.\n\n\
         Location: {}\n\
         Dining date: {}\n\
         Dining time: {}\n\
         Party size: {}\n",
        request.cuisine,
        request.location,
        request.dining_date,
        request.dining_time,
        request.party_size,
    )
}
