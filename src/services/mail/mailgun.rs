use anyhow::Context;
use async_trait::async_trait;

use super::Mailer;

pub struct MailgunMailer {
    api_url: String,
    domain: String,
    api_key: String,
    sender: String,
    client: reqwest::Client,
}

impl MailgunMailer {
    pub fn new(api_url: String, domain: String, api_key: String, sender: String) -> Self {
        Self {
            api_url,
            domain,
            api_key,
            sender,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for MailgunMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        let url = format!("{}/{}/messages", self.api_url, self.domain);

        self.client
            .post(&url)
            .basic_auth("api", Some(&self.api_key))
            .form(&[
                ("from", self.sender.as_str()),
                ("to", to),
                ("subject", subject),
                ("text", body),
            ])
            .send()
            .await
            .context("failed to send Mailgun email")?
            .error_for_status()
            .context("Mailgun API returned error")?;

        Ok(())
    }
}
