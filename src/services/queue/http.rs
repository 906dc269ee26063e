use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::RequestQueue;
use crate::models::{MessageAttributes, QueueMessage};

pub struct HttpRequestQueue {
    queue_url: String,
    client: reqwest::Client,
}

impl HttpRequestQueue {
    pub fn new(queue_url: String) -> Self {
        Self {
            queue_url,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ReceiveResponse {
    #[serde(default)]
    messages: Vec<QueueMessage>,
}

#[async_trait]
impl RequestQueue for HttpRequestQueue {
    async fn send(&self, body: &str, attributes: &MessageAttributes) -> anyhow::Result<()> {
        self.client
            .post(format!("{}/messages", self.queue_url))
            .json(&json!({
                "MessageBody": body,
                "MessageAttributes": attributes,
            }))
            .send()
            .await
            .context("failed to send queue message")?
            .error_for_status()
            .context("queue rejected send")?;

        Ok(())
    }

    async fn receive(&self, wait_time_seconds: u32) -> anyhow::Result<Option<QueueMessage>> {
        let resp = self
            .client
            .post(format!("{}/receive", self.queue_url))
            .json(&json!({
                "MaxNumberOfMessages": 1,
                "WaitTimeSeconds": wait_time_seconds,
                "MessageAttributeNames": ["All"],
            }))
            .send()
            .await
            .context("failed to receive from queue")?
            .error_for_status()
            .context("queue rejected receive")?;

        let mut data: ReceiveResponse = resp
            .json()
            .await
            .context("failed to parse queue receive response")?;

        Ok(if data.messages.is_empty() {
            None
        } else {
            Some(data.messages.remove(0))
        })
    }

    async fn delete(&self, receipt_handle: &str) -> anyhow::Result<()> {
        self.client
            .post(format!("{}/delete", self.queue_url))
            .json(&json!({ "ReceiptHandle": receipt_handle }))
            .send()
            .await
            .context("failed to delete queue message")?
            .error_for_status()
            .context("queue rejected delete")?;

        Ok(())
    }
}
