use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use concierge::config::AppConfig;
use concierge::handlers;
use concierge::services::engine::http::HttpIntentEngine;
use concierge::services::mail::mailgun::MailgunMailer;
use concierge::services::queue::http::HttpRequestQueue;
use concierge::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();

    let engine = HttpIntentEngine::new(
        config.bot_url.clone(),
        config.bot_id.clone(),
        config.bot_alias_id.clone(),
        config.bot_locale_id.clone(),
    );
    let queue = HttpRequestQueue::new(config.queue_url.clone());
    let mailer = MailgunMailer::new(
        config.mailgun_api_url.clone(),
        config.mailgun_domain.clone(),
        config.mailgun_api_key.clone(),
        config.sender_email.clone(),
    );

    let state = Arc::new(AppState {
        config: config.clone(),
        engine: Box::new(engine),
        queue: Box::new(queue),
        mailer: Box::new(mailer),
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/chat", post(handlers::chat::chat))
        .route("/fulfillment", post(handlers::fulfillment::dialog_hook))
        .route("/drain", post(handlers::drain::drain))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
