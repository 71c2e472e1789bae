//! End-to-end tests for the generator routes.
//!
//! The router is driven in-process through `tower::ServiceExt::oneshot` with a
//! scripted completion client standing in for the hosted model.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use pitchcraft::clients::{CompletionClient, CompletionError, CompletionRequest};
use pitchcraft::config::Config;
use pitchcraft::pipeline::Pipeline;
use pitchcraft::server::{AppState, build_router};

enum Behavior {
    Reply(String),
    Empty,
    Fail,
}

struct ScriptedClient {
    behavior: Behavior,
    calls: AtomicUsize,
    prompts: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedClient {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<Option<String>, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request);
        match &self.behavior {
            Behavior::Reply(text) => Ok(Some(text.clone())),
            Behavior::Empty => Ok(None),
            Behavior::Fail => Err(CompletionError::Transport("connection refused".to_string())),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

fn app(client: Arc<ScriptedClient>) -> axum::Router {
    let state = AppState::new(Pipeline::new(client), Arc::new(Config::default()));
    build_router(state)
}

async fn post(app: axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

fn valid_bodies() -> Vec<(&'static str, Value)> {
    vec![
        (
            "/api/generate-coldcall",
            json!({"recipientName": "Dana", "company": "Globex", "goal": "book a demo"}),
        ),
        (
            "/api/generate-email",
            json!({"recipientName": "Lee", "company": "Initech", "goal": "intro", "tone": "Friendly"}),
        ),
        (
            "/api/generate-followup",
            json!({"recipientName": "Sam", "context": "sent pricing"}),
        ),
        (
            "/api/generate-objection",
            json!({"objection": "too expensive", "product": "CRM"}),
        ),
        (
            "/api/generate-proposal",
            json!({"clientName": "Priya", "company": "Hooli", "project": "ETL", "details": "migrate"}),
        ),
    ]
}

#[tokio::test]
async fn valid_requests_return_both_outputs() {
    for (path, body) in valid_bodies() {
        let client = ScriptedClient::new(Behavior::Reply(
            "1. Version A: first\n2. Version B: second".to_string(),
        ));
        let (status, json) = post(app(client.clone()), path, body).await;

        assert_eq!(status, StatusCode::OK, "{path}");
        assert!(json["outputA"].is_string(), "{path}");
        assert!(json["outputB"].is_string(), "{path}");
        assert!(json.get("error").is_none(), "{path}");

        let expected_calls = if path.ends_with("coldcall") { 1 } else { 2 };
        assert_eq!(client.calls(), expected_calls, "{path}");
    }
}

#[tokio::test]
async fn cold_call_output_is_split() {
    let client = ScriptedClient::new(Behavior::Reply(
        "1. Version A: Hi Dana\n\n2. Version B: Hey Dana!".to_string(),
    ));
    let (status, json) = post(
        app(client),
        "/api/generate-coldcall",
        json!({"recipientName": "Dana", "company": "Globex", "goal": "demo"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, json!({"outputA": "Hi Dana", "outputB": "Hey Dana!"}));
}

#[tokio::test]
async fn missing_fields_return_400_without_calls() {
    let cases = [
        ("/api/generate-coldcall", json!({"recipientName": "Dana", "company": "Globex"}), "Missing required fields"),
        ("/api/generate-email", json!({"recipientName": "", "company": "Initech", "goal": "x"}), "Missing required fields."),
        ("/api/generate-followup", json!({"recipientName": "Sam"}), "Missing required fields."),
        ("/api/generate-objection", json!({"product": "CRM"}), "Missing required fields"),
        ("/api/generate-proposal", json!({"clientName": "Priya", "company": "Hooli", "project": "ETL"}), "Missing required fields"),
    ];

    for (path, body, message) in cases {
        let client = ScriptedClient::new(Behavior::Reply("unused".to_string()));
        let (status, json) = post(app(client.clone()), path, body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{path}");
        assert_eq!(json["error"], message, "{path}");
        assert_eq!(client.calls(), 0, "{path}");
    }
}

#[tokio::test]
async fn upstream_failure_returns_500_without_outputs() {
    let expectations = [
        ("/api/generate-coldcall", "Failed to generate cold call script"),
        ("/api/generate-email", "Failed to generate cold email"),
        ("/api/generate-followup", "Failed to generate follow-up email"),
        ("/api/generate-objection", "Failed to generate objection responses"),
        ("/api/generate-proposal", "Failed to generate proposals"),
    ];

    for ((path, body), (expected_path, message)) in valid_bodies().into_iter().zip(expectations) {
        assert_eq!(path, expected_path);
        let client = ScriptedClient::new(Behavior::Fail);
        let (status, json) = post(app(client), path, body).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{path}");
        assert_eq!(json["error"], message, "{path}");
        assert!(json.get("outputA").is_none(), "{path}");
        assert!(json.get("outputB").is_none(), "{path}");
    }
}

#[tokio::test]
async fn empty_completions_use_placeholders() {
    let client = ScriptedClient::new(Behavior::Empty);
    let (status, json) = post(
        app(client),
        "/api/generate-email",
        json!({"recipientName": "Lee", "company": "Initech", "goal": "intro"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["outputA"], "Failed to generate Version A.");
    assert_eq!(json["outputB"], "Failed to generate Version B.");
}

#[tokio::test]
async fn prompts_carry_language_and_style() {
    let client = ScriptedClient::new(Behavior::Reply("ok".to_string()));
    let (status, _) = post(
        app(client.clone()),
        "/api/generate-objection",
        json!({
            "objection": "no budget",
            "product": "CRM",
            "language": "French",
            "templateStyle": "Minimalist"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let prompts = client.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 2);
    for p in prompts.iter() {
        assert!(p.prompt.contains("French"));
        assert!(p.prompt.contains("- Minimalist: "));
        assert!(!p.prompt.contains("- Standard: "));
        assert_eq!(p.persona, "You are a skilled objection handler.");
    }
}

#[tokio::test]
async fn malformed_body_is_a_400() {
    let client = ScriptedClient::new(Behavior::Reply("unused".to_string()));
    let response = app(client.clone())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate-coldcall")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(client.calls(), 0);
}

#[tokio::test]
async fn health_info_and_metrics() {
    let client = ScriptedClient::new(Behavior::Reply("ok".to_string()));
    let app = app(client);

    let health = app
        .clone()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(health.status(), StatusCode::OK);

    let info = app
        .clone()
        .oneshot(Request::builder().uri("/info").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(info.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(info.into_body(), usize::MAX).await.unwrap();
    let info: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(info["completion"]["model"], "scripted");
    assert_eq!(info["generators"].as_array().unwrap().len(), 5);

    let (status, _) = post(
        app.clone(),
        "/api/generate-objection",
        json!({"objection": "no budget", "product": "CRM"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let metrics = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let bytes = axum::body::to_bytes(metrics.into_body(), usize::MAX).await.unwrap();
    let metrics: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(metrics["total_requests"], 1);
    assert_eq!(metrics["generators"]["objection"], 1);
}
