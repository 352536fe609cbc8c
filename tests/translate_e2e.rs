use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{body::Body, routing::post, Json, Router};
use http_body_util::BodyExt;
use prompt_relay::agent::{AIMessage, LlmError, Message, StatelessLLM, StatelessLLMFactory};
use prompt_relay::config_manager::stateless_llm::default_translation_llm;
use prompt_relay::config_manager::Config;
use prompt_relay::{build_app, AppState, ConfigurationError};
use serde_json::{json, Value};
use tower::ServiceExt;

use axum::http::{Method, Request, StatusCode};

/// Counts calls; never reached by requests that fail validation
#[derive(Default)]
struct CountingLLM {
    calls: AtomicUsize,
}

#[async_trait]
impl StatelessLLM for CountingLLM {
    async fn chat_completion(&self, messages: &[Message]) -> Result<AIMessage, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(AIMessage::new(format!("[{}]", messages[1].content)))
    }

    fn model_name(&self) -> &str {
        "counting"
    }
}

async fn mock_groq(Json(body): Json<Value>) -> Json<Value> {
    let system = body["messages"][0]["content"].as_str().unwrap_or_default();
    let reply = if system == "Translate the following text into French:" {
        "Bonjour, comment allez-vous ?"
    } else {
        "?"
    };
    Json(json!({
        "id": "chatcmpl-test",
        "model": body["model"],
        "choices": [{"index": 0, "message": {"role": "assistant", "content": reply}, "finish_reason": "stop"}]
    }))
}

async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}/openai/v1", addr)
}

fn groq_state(base_url: &str) -> AppState {
    groq_state_with_timeout(base_url, 5)
}

fn groq_state_with_timeout(base_url: &str, timeout_secs: u64) -> AppState {
    let mut config = Config::default();
    config.translation_llm.base_url = base_url.to_string();
    config.translation_llm.llm_api_key = Some("gsk_test".to_string());
    config.translation_llm.request_timeout_secs = Some(timeout_secs);
    AppState::new(&config).unwrap()
}

fn translate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/translate")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn e2e_translate_returns_model_text() {
    let base_url = spawn_upstream(Router::new().route("/openai/v1/chat/completions", post(mock_groq))).await;
    let app = build_app(groq_state(&base_url));

    let response = app
        .oneshot(translate_request(r#"{"language":"French","text":"Hello, how are you?"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let translation = body["translation"].as_str().unwrap();
    assert!(!translation.is_empty());
    assert_eq!(translation, "Bonjour, comment allez-vous ?");
}

#[tokio::test]
async fn e2e_root_returns_welcome_banner() {
    let app = build_app(AppState::with_llm(Arc::new(CountingLLM::default())));

    let response = app.oneshot(get("/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({"message": "Welcome to the Translation API! Visit /docs for details."})
    );
}

#[tokio::test]
async fn e2e_health_is_ok() {
    let app = build_app(AppState::with_llm(Arc::new(CountingLLM::default())));

    let response = app.oneshot(get("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn e2e_invalid_bodies_are_422_without_model_call() {
    let llm = Arc::new(CountingLLM::default());

    for body in [
        r#"{"text":"Hello"}"#,
        r#"{"language":"French"}"#,
        r#"{"language":"French","text":42}"#,
        r#"{"language":"","text":"Hello"}"#,
        r#"{"language":"French","#,
    ] {
        let app = build_app(AppState::with_llm(llm.clone()));
        let response = app.oneshot(translate_request(body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "body: {body}");
        assert!(body_json(response).await["detail"].is_string());
    }

    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_valid_request_calls_model_once() {
    let llm = Arc::new(CountingLLM::default());
    let app = build_app(AppState::with_llm(llm.clone()));

    let response = app
        .oneshot(translate_request(r#"{"language":"Spanish","text":"Good morning"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"translation": "[Good morning]"}));
    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn e2e_whitespace_text_is_translated() {
    let llm = Arc::new(CountingLLM::default());
    let app = build_app(AppState::with_llm(llm.clone()));

    let response = app
        .oneshot(translate_request(r#"{"language":"French","text":"   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"translation": "[   ]"}));
    assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn e2e_missing_content_type_is_415() {
    let llm = Arc::new(CountingLLM::default());
    let app = build_app(AppState::with_llm(llm.clone()));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/translate")
        .body(Body::from(r#"{"language":"French","text":"Hello"}"#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body_json(response).await["detail"].is_string());
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_oversized_body_is_413() {
    let llm = Arc::new(CountingLLM::default());
    let app = build_app(AppState::with_llm(llm.clone()));

    let text = "a".repeat(3 * 1024 * 1024);
    let body = json!({"language": "French", "text": text}).to_string();
    let response = app.oneshot(translate_request(&body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn e2e_slow_upstream_times_out_as_bad_gateway() {
    async fn stalled() -> Json<Value> {
        tokio::time::sleep(std::time::Duration::from_secs(3)).await;
        Json(json!({"choices": []}))
    }

    let base_url = spawn_upstream(Router::new().route("/openai/v1/chat/completions", post(stalled))).await;
    let app = build_app(groq_state_with_timeout(&base_url, 1));

    let response = app
        .oneshot(translate_request(r#"{"language":"French","text":"Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn e2e_upstream_failure_is_bad_gateway() {
    async fn rate_limited() -> (axum::http::StatusCode, &'static str) {
        (axum::http::StatusCode::TOO_MANY_REQUESTS, "rate limit reached")
    }

    let base_url = spawn_upstream(Router::new().route("/openai/v1/chat/completions", post(rate_limited))).await;
    let app = build_app(groq_state(&base_url));

    let response = app
        .oneshot(translate_request(r#"{"language":"French","text":"Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(body_json(response).await["error"].as_str().unwrap().contains("429"));
}

#[tokio::test]
async fn e2e_unreachable_upstream_is_bad_gateway() {
    let app = build_app(groq_state("http://127.0.0.1:1/openai/v1"));

    let response = app
        .oneshot(translate_request(r#"{"language":"French","text":"Hello"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn e2e_unknown_route_is_404() {
    let app = build_app(AppState::with_llm(Arc::new(CountingLLM::default())));

    let response = app.oneshot(get("/docs/missing")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn missing_credential_prevents_startup() {
    let mut config = Config::default();
    config.translation_llm.llm_api_key = None;

    assert!(matches!(
        AppState::new(&config),
        Err(ConfigurationError::MissingCredential(var)) if var == "GROQ_API_KEY"
    ));
}

#[test]
fn placeholder_credential_counts_as_missing() {
    let mut cfg = default_translation_llm();
    cfg.llm_api_key = Some("${GROQ_API_KEY}".to_string());

    assert!(StatelessLLMFactory::create_llm(&cfg).is_err());
}
