pub mod http;

use async_trait::async_trait;

/// The managed conversational-understanding service.
#[async_trait]
pub trait IntentEngine: Send + Sync {
    /// Run one user utterance through the engine and return its reply texts.
    async fn recognize_text(&self, session_id: &str, text: &str) -> anyhow::Result<Vec<String>>;
}
