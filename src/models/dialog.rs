use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub type SessionAttributes = BTreeMap<String, String>;

/// Which hook the dialog engine is invoking: mid-collection or ready to finalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvocationSource {
    DialogCodeHook,
    FulfillmentCodeHook,
}

/// One turn's event as delivered by the dialog engine.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogEvent {
    pub invocation_source: InvocationSource,
    #[serde(default)]
    pub session_state: InboundSessionState,
    #[serde(default)]
    pub interpretations: Vec<Interpretation>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundSessionState {
    #[serde(default)]
    pub session_attributes: Option<SessionAttributes>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Interpretation {
    pub intent: IntentData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntentData {
    pub name: String,
    #[serde(default)]
    pub slots: Slots,
}

/// The six slots the bot collects. Slots the engine has not filled yet
/// arrive as null and are echoed back as null.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Slots {
    #[serde(rename = "Location")]
    pub location: Option<Slot>,
    #[serde(rename = "Cuisine")]
    pub cuisine: Option<Slot>,
    #[serde(rename = "DiningDate")]
    pub dining_date: Option<Slot>,
    #[serde(rename = "DiningTime")]
    pub dining_time: Option<Slot>,
    #[serde(rename = "PartySize")]
    pub party_size: Option<Slot>,
    #[serde(rename = "Email")]
    pub email: Option<Slot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub value: SlotValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotValue {
    pub interpreted_value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resolved_values: Vec<String>,
}

impl Slot {
    pub fn interpreted(&self) -> &str {
        &self.value.interpreted_value
    }
}

impl DialogEvent {
    /// The engine always puts its top interpretation first.
    pub fn intent(&self) -> Option<&IntentData> {
        self.interpretations.first().map(|i| &i.intent)
    }

    pub fn session_attributes(&self) -> SessionAttributes {
        self.session_state
            .session_attributes
            .clone()
            .unwrap_or_default()
    }
}

// ── Responses ──

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DialogActionType {
    ElicitIntent,
    ElicitSlot,
    Delegate,
    Close,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogAction {
    #[serde(rename = "type")]
    pub action_type: DialogActionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slot_to_elicit: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntentEcho {
    pub name: String,
    pub slots: Slots,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundSessionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<SessionAttributes>,
    pub dialog_action: DialogAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentEcho>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BotMessage {
    pub content_type: String,
    pub content: String,
}

impl BotMessage {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Self {
            content_type: "PlainText".to_string(),
            content: content.into(),
        }
    }
}

/// Instruction returned to the dialog engine for this turn.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogResponse {
    pub session_state: OutboundSessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<BotMessage>>,
}

impl DialogResponse {
    /// Ask the engine to re-prompt one named slot.
    pub fn elicit_slot(
        session_attributes: SessionAttributes,
        intent_name: &str,
        slots: Slots,
        slot_to_elicit: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            session_state: OutboundSessionState {
                session_attributes: Some(session_attributes),
                dialog_action: DialogAction {
                    action_type: DialogActionType::ElicitSlot,
                    slot_to_elicit: Some(slot_to_elicit.to_string()),
                },
                intent: Some(IntentEcho {
                    name: intent_name.to_string(),
                    slots,
                    state: None,
                }),
            },
            messages: Some(vec![BotMessage::plain_text(message)]),
        }
    }

    /// Hand control back to the engine to decide the next prompt.
    pub fn delegate(
        session_attributes: SessionAttributes,
        intent_name: &str,
        slots: Slots,
    ) -> Self {
        Self {
            session_state: OutboundSessionState {
                session_attributes: Some(session_attributes),
                dialog_action: DialogAction {
                    action_type: DialogActionType::Delegate,
                    slot_to_elicit: None,
                },
                intent: Some(IntentEcho {
                    name: intent_name.to_string(),
                    slots,
                    state: None,
                }),
            },
            messages: None,
        }
    }

    /// End the dialog with a fulfillment state.
    pub fn close(
        session_attributes: SessionAttributes,
        intent_name: &str,
        slots: Slots,
        fulfillment_state: &str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            session_state: OutboundSessionState {
                session_attributes: Some(session_attributes),
                dialog_action: DialogAction {
                    action_type: DialogActionType::Close,
                    slot_to_elicit: None,
                },
                intent: Some(IntentEcho {
                    name: intent_name.to_string(),
                    slots,
                    state: Some(fulfillment_state.to_string()),
                }),
            },
            messages: Some(vec![BotMessage::plain_text(message)]),
        }
    }

    /// Return to open elicitation with a fixed reply (greeting / thank-you).
    pub fn elicit_intent(message: impl Into<String>) -> Self {
        Self {
            session_state: OutboundSessionState {
                session_attributes: None,
                dialog_action: DialogAction {
                    action_type: DialogActionType::ElicitIntent,
                    slot_to_elicit: None,
                },
                intent: None,
            },
            messages: Some(vec![BotMessage::plain_text(message)]),
        }
    }
}
