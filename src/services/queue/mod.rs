pub mod http;

use async_trait::async_trait;

use crate::models::{MessageAttributes, QueueMessage};

/// The managed message queue carrying fulfilled requests to the notifier.
/// Visibility and at-least-once semantics belong to the queue service, not us.
#[async_trait]
pub trait RequestQueue: Send + Sync {
    async fn send(&self, body: &str, attributes: &MessageAttributes) -> anyhow::Result<()>;

    /// Long-poll for at most one message.
    async fn receive(&self, wait_time_seconds: u32) -> anyhow::Result<Option<QueueMessage>>;

    async fn delete(&self, receipt_handle: &str) -> anyhow::Result<()>;
}
