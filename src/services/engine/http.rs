use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::IntentEngine;

pub struct HttpIntentEngine {
    base_url: String,
    bot_id: String,
    bot_alias_id: String,
    locale_id: String,
    client: reqwest::Client,
}

impl HttpIntentEngine {
    pub fn new(base_url: String, bot_id: String, bot_alias_id: String, locale_id: String) -> Self {
        Self {
            base_url,
            bot_id,
            bot_alias_id,
            locale_id,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
struct RecognizeTextResponse {
    #[serde(default)]
    messages: Vec<EngineMessage>,
}

#[derive(Deserialize)]
struct EngineMessage {
    content: String,
}

#[async_trait]
impl IntentEngine for HttpIntentEngine {
    async fn recognize_text(&self, session_id: &str, text: &str) -> anyhow::Result<Vec<String>> {
        let url = format!(
            "{}/bots/{}/aliases/{}/locales/{}/sessions/{}/text",
            self.base_url, self.bot_id, self.bot_alias_id, self.locale_id, session_id
        );

        let resp = self
            .client
            .post(&url)
            .json(&json!({ "text": text }))
            .send()
            .await
            .context("failed to call intent engine")?
            .error_for_status()
            .context("intent engine returned error")?;

        let data: RecognizeTextResponse = resp
            .json()
            .await
            .context("failed to parse intent engine response")?;

        Ok(data.messages.into_iter().map(|m| m.content).collect())
    }
}
