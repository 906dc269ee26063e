use crate::config::AppConfig;
use crate::services::engine::IntentEngine;
use crate::services::mail::Mailer;
use crate::services::queue::RequestQueue;

pub struct AppState {
    pub config: AppConfig,
    pub engine: Box<dyn IntentEngine>,
    pub queue: Box<dyn RequestQueue>,
    pub mailer: Box<dyn Mailer>,
}
