use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A typed attribute attached to a queue message.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MessageAttribute {
    pub data_type: String,
    pub string_value: String,
}

impl MessageAttribute {
    pub fn string(value: impl Into<String>) -> Self {
        Self {
            data_type: "String".to_string(),
            string_value: value.into(),
        }
    }

    pub fn number(value: impl Into<String>) -> Self {
        Self {
            data_type: "Number".to_string(),
            string_value: value.into(),
        }
    }
}

pub type MessageAttributes = BTreeMap<String, MessageAttribute>;

/// One message as consumed from the queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueueMessage {
    #[serde(default)]
    pub message_id: String,
    pub receipt_handle: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub message_attributes: MessageAttributes,
}
