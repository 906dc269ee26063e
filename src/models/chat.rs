use serde::{Deserialize, Serialize};

/// Frontend message envelope: `{ messages: [{ type: "unstructured", unstructured: { text } }] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatEnvelope {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(rename = "sessionId", default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type", default = "unstructured_kind")]
    pub kind: String,
    pub unstructured: UnstructuredMessage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnstructuredMessage {
    pub text: String,
}

fn unstructured_kind() -> String {
    "unstructured".to_string()
}

impl ChatEnvelope {
    pub fn reply(text: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage {
                kind: "unstructured".to_string(),
                unstructured: UnstructuredMessage { text: text.into() },
            }],
            session_id: None,
        }
    }

    pub fn first_text(&self) -> Option<&str> {
        self.messages.first().map(|m| m.unstructured.text.as_str())
    }
}
