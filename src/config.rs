use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub bot_url: String,
    pub bot_id: String,
    pub bot_alias_id: String,
    pub bot_locale_id: String,
    pub queue_url: String,
    pub sender_email: String,
    pub mailgun_api_url: String,
    pub mailgun_domain: String,
    pub mailgun_api_key: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            bot_url: env::var("BOT_URL").unwrap_or_default(),
            bot_id: env::var("BOT_ID").unwrap_or_default(),
            bot_alias_id: env::var("BOT_ALIAS_ID").unwrap_or_default(),
            bot_locale_id: env::var("BOT_LOCALE_ID").unwrap_or_else(|_| "en_US".to_string()),
            queue_url: env::var("QUEUE_URL").unwrap_or_default(),
            sender_email: env::var("SENDER_EMAIL").unwrap_or_default(),
            mailgun_api_url: env::var("MAILGUN_API_URL")
                .unwrap_or_else(|_| "https://api.mailgun.net/v3".to_string()),
            mailgun_domain: env::var("MAILGUN_DOMAIN").unwrap_or_default(),
            mailgun_api_key: env::var("MAILGUN_API_KEY").unwrap_or_default(),
        }
    }
}
