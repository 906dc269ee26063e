use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{DialogEvent, DialogResponse, IntentData, InvocationSource, ReservationRequest};
use crate::services::validation::{self, business_now};
use crate::state::AppState;

pub const GREETING_INTENT: &str = "GreetingIntent";
pub const THANK_YOU_INTENT: &str = "ThankYouIntent";
pub const DINING_SUGGESTIONS_INTENT: &str = "DiningSuggestionsIntent";

const QUEUE_MESSAGE_BODY: &str = "Slot information";
const FULFILLED_MESSAGE: &str =
    "Great! Your request has been received. Recommendations will be sent to the email provided.";

/// Route a dialog event to its intent handler and produce the turn's
/// dialog action.
pub async fn dispatch(
    state: &Arc<AppState>,
    event: &DialogEvent,
) -> Result<DialogResponse, AppError> {
    let intent = event
        .intent()
        .ok_or_else(|| AppError::BadEvent("event carries no interpretation".to_string()))?;

    tracing::info!(
        intent = %intent.name,
        source = ?event.invocation_source,
        "dialog event received"
    );

    match intent.name.as_str() {
        GREETING_INTENT => Ok(DialogResponse::elicit_intent("Hi there, how can I help?")),
        THANK_YOU_INTENT => Ok(DialogResponse::elicit_intent("You are welcome!")),
        DINING_SUGGESTIONS_INTENT => Ok(dining_suggestions(state, event, intent).await),
        other => Err(AppError::UnsupportedIntent(other.to_string())),
    }
}

async fn dining_suggestions(
    state: &Arc<AppState>,
    event: &DialogEvent,
    intent: &IntentData,
) -> DialogResponse {
    let session_attributes = event.session_attributes();

    let now = business_now();
    if let Err(err) = validation::validate_slots(&intent.slots, now.date(), now.time()) {
        tracing::info!(slot = err.slot_to_elicit(), "slot failed validation, re-eliciting");
        return DialogResponse::elicit_slot(
            session_attributes,
            &intent.name,
            intent.slots.clone(),
            err.slot_to_elicit(),
            err.to_string(),
        );
    }

    // Mid-dialog the engine still owns the next prompt (including its own
    // confirmation step); only the fulfillment hook finalizes.
    if event.invocation_source == InvocationSource::DialogCodeHook {
        tracing::info!("all collected slots valid, delegating back to engine");
        return DialogResponse::delegate(session_attributes, &intent.name, intent.slots.clone());
    }

    // Enqueue failures are logged and swallowed: the user already got their
    // confirmation and the dialog closes as fulfilled either way.
    match ReservationRequest::from_slots(&intent.slots) {
        Ok(request) => {
            if let Err(e) = state
                .queue
                .send(QUEUE_MESSAGE_BODY, &request.to_attributes())
                .await
            {
                tracing::error!(error = %e, "failed to enqueue reservation request");
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "reservation request incomplete at fulfillment");
        }
    }

    DialogResponse::close(
        session_attributes,
        &intent.name,
        intent.slots.clone(),
        "Fulfilled",
        FULFILLED_MESSAGE,
    )
}
