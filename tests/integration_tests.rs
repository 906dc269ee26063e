use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use chrono::{Duration, Utc};
use chrono_tz::America::New_York;
use serde_json::{json, Value};
use tower::ServiceExt;

use concierge::config::AppConfig;
use concierge::handlers;
use concierge::models::{MessageAttribute, MessageAttributes, QueueMessage};
use concierge::services::engine::IntentEngine;
use concierge::services::mail::Mailer;
use concierge::services::queue::RequestQueue;
use concierge::state::AppState;

// ── Mock Providers ──

struct MockEngine {
    reply: Option<String>,
    sessions: Arc<Mutex<Vec<String>>>,
}

impl MockEngine {
    fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            sessions: Arc::new(Mutex::new(vec![])),
        }
    }

    fn failing() -> Self {
        Self {
            reply: None,
            sessions: Arc::new(Mutex::new(vec![])),
        }
    }
}

#[async_trait]
impl IntentEngine for MockEngine {
    async fn recognize_text(&self, session_id: &str, _text: &str) -> anyhow::Result<Vec<String>> {
        self.sessions.lock().unwrap().push(session_id.to_string());
        match &self.reply {
            Some(reply) => Ok(vec![reply.clone()]),
            None => anyhow::bail!("engine unavailable"),
        }
    }
}

#[derive(Default)]
struct MockQueue {
    queued: Mutex<Vec<QueueMessage>>,
    sent: Arc<Mutex<Vec<(String, MessageAttributes)>>>,
    deleted: Arc<Mutex<Vec<String>>>,
    fail_send: bool,
}

#[async_trait]
impl RequestQueue for MockQueue {
    async fn send(&self, body: &str, attributes: &MessageAttributes) -> anyhow::Result<()> {
        if self.fail_send {
            anyhow::bail!("queue unavailable");
        }
        self.sent
            .lock()
            .unwrap()
            .push((body.to_string(), attributes.clone()));
        Ok(())
    }

    async fn receive(&self, _wait_time_seconds: u32) -> anyhow::Result<Option<QueueMessage>> {
        let mut queued = self.queued.lock().unwrap();
        Ok(if queued.is_empty() {
            None
        } else {
            Some(queued.remove(0))
        })
    }

    async fn delete(&self, receipt_handle: &str) -> anyhow::Result<()> {
        self.deleted.lock().unwrap().push(receipt_handle.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct MockMailer {
    sent: Arc<Mutex<Vec<(String, String, String)>>>,
    fail: bool,
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send_email(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()> {
        if self.fail {
            anyhow::bail!("mailer unavailable");
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_string(), subject.to_string(), body.to_string()));
        Ok(())
    }
}

// ── Helpers ──

fn test_config() -> AppConfig {
    AppConfig {
        port: 3000,
        bot_url: "http://localhost:9999".to_string(),
        bot_id: "test-bot".to_string(),
        bot_alias_id: "test-alias".to_string(),
        bot_locale_id: "en_US".to_string(),
        queue_url: "http://localhost:9998/queue".to_string(),
        sender_email: "concierge@example.com".to_string(),
        mailgun_api_url: "http://localhost:9997".to_string(),
        mailgun_domain: "example.com".to_string(),
        mailgun_api_key: "test-key".to_string(),
    }
}

fn test_state(engine: MockEngine, queue: MockQueue, mailer: MockMailer) -> Arc<AppState> {
    Arc::new(AppState {
        config: test_config(),
        engine: Box::new(engine),
        queue: Box::new(queue),
        mailer: Box::new(mailer),
    })
}

fn test_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/chat", post(handlers::chat::chat))
        .route("/fulfillment", post(handlers::fulfillment::dialog_hook))
        .route("/drain", post(handlers::drain::drain))
        .with_state(state)
}

fn json_request(uri: &str, payload: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

async fn response_json(res: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// Tomorrow on the business clock, so date validation always passes.
fn tomorrow() -> String {
    (Utc::now().with_timezone(&New_York).date_naive() + Duration::days(1))
        .format("%Y-%m-%d")
        .to_string()
}

fn slot(value: &str) -> Value {
    json!({ "value": { "interpretedValue": value } })
}

fn dining_event(invocation_source: &str, cuisine: &str) -> Value {
    json!({
        "invocationSource": invocation_source,
        "sessionState": { "sessionAttributes": { "channel": "web" } },
        "interpretations": [{
            "intent": {
                "name": "DiningSuggestionsIntent",
                "slots": {
                    "Location": slot("Manhattan"),
                    "Cuisine": slot(cuisine),
                    "DiningDate": slot(&tomorrow()),
                    "DiningTime": slot("19:00"),
                    "PartySize": slot("4"),
                    "Email": slot("a@b.com"),
                }
            }
        }]
    })
}

fn intent_event(name: &str) -> Value {
    json!({
        "invocationSource": "DialogCodeHook",
        "sessionState": { "sessionAttributes": null },
        "interpretations": [{ "intent": { "name": name } }]
    })
}

// ── Intent Proxy Tests ──

#[tokio::test]
async fn test_chat_returns_engine_reply_in_envelope() {
    let engine = MockEngine::replying("What city are you dining in?");
    let sessions = Arc::clone(&engine.sessions);
    let app = test_app(test_state(engine, MockQueue::default(), MockMailer::default()));

    let payload = json!({
        "messages": [{ "type": "unstructured", "unstructured": { "text": "I need restaurant suggestions" } }]
    });
    let res = app.oneshot(json_request("/chat", &payload)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(
        body["messages"][0]["unstructured"]["text"],
        "What city are you dining in?"
    );
    assert_eq!(body["messages"][0]["type"], "unstructured");
    // no caller session: the shared fallback session is used
    assert_eq!(sessions.lock().unwrap().as_slice(), ["test"]);
}

#[tokio::test]
async fn test_chat_forwards_caller_session_id() {
    let engine = MockEngine::replying("Hi!");
    let sessions = Arc::clone(&engine.sessions);
    let app = test_app(test_state(engine, MockQueue::default(), MockMailer::default()));

    let payload = json!({
        "sessionId": "user-42",
        "messages": [{ "type": "unstructured", "unstructured": { "text": "hello" } }]
    });
    let res = app.oneshot(json_request("/chat", &payload)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(sessions.lock().unwrap().as_slice(), ["user-42"]);
}

#[tokio::test]
async fn test_chat_engine_failure_yields_apology() {
    let app = test_app(test_state(
        MockEngine::failing(),
        MockQueue::default(),
        MockMailer::default(),
    ));

    let payload = json!({
        "messages": [{ "type": "unstructured", "unstructured": { "text": "hello" } }]
    });
    let res = app.oneshot(json_request("/chat", &payload)).await.unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(
        body["messages"][0]["unstructured"]["text"],
        "Sorry, it seems something went wrong."
    );
}

#[tokio::test]
async fn test_chat_empty_envelope_yields_apology() {
    let app = test_app(test_state(
        MockEngine::replying("unused"),
        MockQueue::default(),
        MockMailer::default(),
    ));

    let res = app
        .oneshot(json_request("/chat", &json!({ "messages": [] })))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(
        body["messages"][0]["unstructured"]["text"],
        "Sorry, it seems something went wrong."
    );
}

// ── Dialog Fulfillment Tests ──

#[tokio::test]
async fn test_greeting_intent_elicits_intent() {
    let app = test_app(test_state(
        MockEngine::failing(),
        MockQueue::default(),
        MockMailer::default(),
    ));

    let res = app
        .oneshot(json_request("/fulfillment", &intent_event("GreetingIntent")))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["sessionState"]["dialogAction"]["type"], "ElicitIntent");
    assert_eq!(body["messages"][0]["content"], "Hi there, how can I help?");
}

#[tokio::test]
async fn test_thank_you_intent_acknowledges() {
    let app = test_app(test_state(
        MockEngine::failing(),
        MockQueue::default(),
        MockMailer::default(),
    ));

    let res = app
        .oneshot(json_request("/fulfillment", &intent_event("ThankYouIntent")))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["sessionState"]["dialogAction"]["type"], "ElicitIntent");
    assert_eq!(body["messages"][0]["content"], "You are welcome!");
}

#[tokio::test]
async fn test_unsupported_intent_is_fatal() {
    let app = test_app(test_state(
        MockEngine::failing(),
        MockQueue::default(),
        MockMailer::default(),
    ));

    let res = app
        .oneshot(json_request("/fulfillment", &intent_event("WeatherIntent")))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(res).await;
    assert_eq!(body["error"], "intent with name WeatherIntent not supported");
}

#[tokio::test]
async fn test_dining_dialog_hook_delegates_without_enqueuing() {
    let queue = MockQueue::default();
    let sent = Arc::clone(&queue.sent);
    let app = test_app(test_state(MockEngine::failing(), queue, MockMailer::default()));

    let res = app
        .oneshot(json_request(
            "/fulfillment",
            &dining_event("DialogCodeHook", "Italian"),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["sessionState"]["dialogAction"]["type"], "Delegate");
    assert_eq!(body["sessionState"]["sessionAttributes"]["channel"], "web");
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_dining_fulfillment_closes_and_enqueues() {
    let queue = MockQueue::default();
    let sent = Arc::clone(&queue.sent);
    let app = test_app(test_state(MockEngine::failing(), queue, MockMailer::default()));

    let res = app
        .oneshot(json_request(
            "/fulfillment",
            &dining_event("FulfillmentCodeHook", "Italian"),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["sessionState"]["dialogAction"]["type"], "Close");
    assert_eq!(body["sessionState"]["intent"]["state"], "Fulfilled");
    assert_eq!(
        body["messages"][0]["content"],
        "Great! Your request has been received. Recommendations will be sent to the email provided."
    );

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (message_body, attributes) = &sent[0];
    assert_eq!(message_body, "Slot information");
    assert_eq!(attributes.len(), 6);
    assert_eq!(attributes["Location"].string_value, "Manhattan");
    assert_eq!(attributes["Cuisine"].string_value, "Italian");
    assert_eq!(attributes["PartySize"].data_type, "Number");
    assert_eq!(attributes["PartySize"].string_value, "4");
    assert_eq!(attributes["Email"].string_value, "a@b.com");
}

#[tokio::test]
async fn test_dining_invalid_cuisine_elicits_cuisine() {
    let queue = MockQueue::default();
    let sent = Arc::clone(&queue.sent);
    let app = test_app(test_state(MockEngine::failing(), queue, MockMailer::default()));

    let res = app
        .oneshot(json_request(
            "/fulfillment",
            &dining_event("FulfillmentCodeHook", "French"),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["sessionState"]["dialogAction"]["type"], "ElicitSlot");
    assert_eq!(body["sessionState"]["dialogAction"]["slotToElicit"], "Cuisine");
    assert_eq!(
        body["messages"][0]["content"],
        "Sorry, French is not supported yet. Please try another cuisine."
    );
    assert!(sent.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_enqueue_failure_still_closes_fulfilled() {
    let queue = MockQueue {
        fail_send: true,
        ..MockQueue::default()
    };
    let app = test_app(test_state(MockEngine::failing(), queue, MockMailer::default()));

    let res = app
        .oneshot(json_request(
            "/fulfillment",
            &dining_event("FulfillmentCodeHook", "Mexican"),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["sessionState"]["dialogAction"]["type"], "Close");
    assert_eq!(body["sessionState"]["intent"]["state"], "Fulfilled");
}

// ── Queue Drainer Tests ──

fn queued_message() -> QueueMessage {
    let mut attributes = MessageAttributes::new();
    attributes.insert("Location".to_string(), MessageAttribute::string("Manhattan"));
    attributes.insert("Cuisine".to_string(), MessageAttribute::string("Italian"));
    attributes.insert("DiningDate".to_string(), MessageAttribute::string("2026-09-01"));
    attributes.insert("DiningTime".to_string(), MessageAttribute::string("19:00"));
    attributes.insert("PartySize".to_string(), MessageAttribute::number("4"));
    attributes.insert("Email".to_string(), MessageAttribute::string("a@b.com"));
    QueueMessage {
        message_id: "m-1".to_string(),
        receipt_handle: "rh-1".to_string(),
        body: "Slot information".to_string(),
        message_attributes: attributes,
    }
}

#[tokio::test]
async fn test_drain_empty_queue_returns_not_found() {
    let app = test_app(test_state(
        MockEngine::failing(),
        MockQueue::default(),
        MockMailer::default(),
    ));

    let res = app
        .oneshot(json_request("/drain", &json!({})))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = response_json(res).await;
    assert_eq!(body["statusCode"], 404);
    assert_eq!(body["body"], "No requests found");
}

#[tokio::test]
async fn test_drain_sends_email_and_deletes_message() {
    let queue = MockQueue::default();
    queue.queued.lock().unwrap().push(queued_message());
    let deleted = Arc::clone(&queue.deleted);
    let mailer = MockMailer::default();
    let sent = Arc::clone(&mailer.sent);
    let app = test_app(test_state(MockEngine::failing(), queue, mailer));

    let res = app
        .oneshot(json_request("/drain", &json!({})))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let body = response_json(res).await;
    assert_eq!(body["ReceiptHandle"], "rh-1");
    assert_eq!(body["MessageAttributes"]["Cuisine"]["StringValue"], "Italian");

    let sent = sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (to, subject, text) = &sent[0];
    assert_eq!(to, "a@b.com");
    assert_eq!(subject, "Italian Cuisine Suggestions");
    assert!(text.contains("Location: Manhattan"));

    assert_eq!(deleted.lock().unwrap().as_slice(), ["rh-1"]);
}

#[tokio::test]
async fn test_drain_deletes_message_even_when_email_fails() {
    let queue = MockQueue::default();
    queue.queued.lock().unwrap().push(queued_message());
    let deleted = Arc::clone(&queue.deleted);
    let mailer = MockMailer {
        fail: true,
        ..MockMailer::default()
    };
    let app = test_app(test_state(MockEngine::failing(), queue, mailer));

    let res = app
        .oneshot(json_request("/drain", &json!({})))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(deleted.lock().unwrap().as_slice(), ["rh-1"]);
}

// ── Health ──

#[tokio::test]
async fn test_health() {
    let app = test_app(test_state(
        MockEngine::failing(),
        MockQueue::default(),
        MockMailer::default(),
    ));

    let res = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}
