//! Integration tests for the HTTP surface
//!
//! Requests go through the full router with `tower::ServiceExt::oneshot`;
//! the model is the offline stub or a scripted double, so no network is used.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use llm::{LanguageModel, LlmError, Prompt, StubClient};
use serde_json::{json, Value};
use server::{build_router, ServerConfig, ServerState};
use tempfile::TempDir;
use tower::ServiceExt;

const TOKEN: &str = "user-42";

struct TestServer {
    state: Arc<ServerState>,
    dir: TempDir,
}

impl TestServer {
    fn with_model(model: Arc<dyn LanguageModel>) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig {
            result_dir: dir.path().join("translate_result"),
            suggestion_log: dir.path().join("suggestions.jsonl"),
            ..Default::default()
        };
        let state = Arc::new(ServerState::with_model(config, model).unwrap());
        Self { state, dir }
    }

    fn stub() -> Self {
        Self::with_model(Arc::new(StubClient::new()))
    }

    async fn send(&self, request: Request<Body>) -> Response {
        build_router(self.state.clone())
            .oneshot(request)
            .await
            .unwrap()
    }

    async fn post(&self, path: &str, token: Option<&str>, body: Value) -> Response {
        let mut builder = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json");
        if let Some(token) = token {
            builder = builder.header("x-user-token", token);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    async fn get(&self, path: &str) -> Response {
        self.send(Request::builder().uri(path).body(Body::empty()).unwrap())
            .await
    }
}

async fn json_body(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Fails every model call.
struct BrokenModel;

#[async_trait]
impl LanguageModel for BrokenModel {
    async fn generate(&self, _prompt: &Prompt<'_>) -> Result<String, LlmError> {
        Err(LlmError::Status {
            status: 503,
            body: "model overloaded".into(),
        })
    }
}

#[tokio::test]
async fn llm_routes_require_a_token() {
    let server = TestServer::stub();

    for path in [
        "/v1/llm/suggestion",
        "/v1/llm/translate",
        "/v1/llm/translate/result",
    ] {
        let response = server.post(path, None, json!({"text": "hi"})).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{path}");
        let body = json_body(response).await;
        assert_eq!(body["error"]["code"], "MISSING_TOKEN");
    }
}

#[tokio::test]
async fn blank_token_is_invalid() {
    let server = TestServer::stub();
    let response = server
        .post("/v1/llm/suggestion", Some("   "), json!({"text": "hi"}))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(response).await["error"]["code"], "INVALID_TOKEN");
}

#[tokio::test]
async fn suggestion_returns_quick_result_first() {
    let server = TestServer::stub();
    let response = server
        .post(
            "/v1/llm/suggestion",
            Some(TOKEN),
            json!({"text": "I went to the stor", "suffixText": "\u{200B}"}),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    assert!(response.headers().contains_key("x-process-time"));

    let body = json_body(response).await;
    let suggestions = body["suggestions"].as_array().unwrap();
    assert_eq!(suggestions.len(), 3);
    assert_eq!(suggestions[0], "stor ...");
}

#[tokio::test]
async fn suggestion_failure_is_a_500_with_message() {
    let server = TestServer::with_model(Arc::new(BrokenModel));
    let response = server
        .post("/v1/llm/suggestion", Some(TOKEN), json!({"text": "Hello"}))
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "INTERNAL_ERROR");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("model overloaded"));
}

#[tokio::test]
async fn translation_becomes_available_after_the_job_finishes() {
    let server = TestServer::stub();

    let response = server
        .post(
            "/v1/llm/translate",
            Some(TOKEN),
            json!({"text": "Hello\nWorld", "language": "German"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let job_id = json_body(response).await["translation"]
        .as_str()
        .unwrap()
        .to_string();

    let mut translation = None;
    for _ in 0..100 {
        let response = server
            .post(
                "/v1/llm/translate/result",
                Some(TOKEN),
                json!({"md5": job_id}),
            )
            .await;
        if response.status() == StatusCode::OK {
            translation = Some(json_body(response).await["translation"].clone());
            break;
        }
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(translation, Some(json!("[German] Hello\nWorld")));
    let on_disk = server
        .dir
        .path()
        .join("translate_result")
        .join(format!("{job_id}.txt"));
    assert_eq!(
        std::fs::read_to_string(on_disk).unwrap(),
        "[German] Hello\nWorld"
    );
}

#[tokio::test]
async fn unknown_or_malformed_job_ids_are_404() {
    let server = TestServer::stub();

    for id in ["00000000-0000-4000-8000-000000000000", "../../etc/passwd"] {
        let response = server
            .post("/v1/llm/translate/result", Some(TOKEN), json!({"md5": id}))
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{id}");
        assert_eq!(json_body(response).await["error"]["code"], "JOB_NOT_FOUND");
    }
}

#[tokio::test]
async fn public_routes_need_no_token() {
    let server = TestServer::stub();

    let health = server.get("/health").await;
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(json_body(health).await["status"], "healthy");

    let ready = server.get("/ready").await;
    assert_eq!(ready.status(), StatusCode::OK);
    assert_eq!(json_body(ready).await["metadata"]["model"], "stub");

    let metrics = server.get("/metrics").await;
    assert_eq!(metrics.status(), StatusCode::OK);
}

#[tokio::test]
async fn request_id_is_echoed() {
    let server = TestServer::stub();
    let response = server
        .send(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await;
    assert_eq!(response.headers()["x-request-id"], "req-abc");
}

#[tokio::test]
async fn unknown_routes_are_404() {
    let server = TestServer::stub();
    let response = server.get("/v2/nothing").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(response).await["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn malformed_bodies_are_400_with_error_envelope() {
    let server = TestServer::stub();

    let response = server
        .post("/v1/llm/translate", Some(TOKEN), json!({"text": "hi"}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("language"));

    let response = server
        .send(
            Request::builder()
                .method("POST")
                .uri("/v1/llm/suggestion")
                .header("content-type", "application/json")
                .header("x-user-token", TOKEN)
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn submitted_jobs_are_counted() {
    let server = TestServer::stub();
    let response = server
        .post(
            "/v1/llm/translate",
            Some(TOKEN),
            json!({"text": "Hello", "language": "German"}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let metrics = server.get("/metrics").await;
    let bytes = metrics.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(
        text.contains(r#"quill_translation_jobs_total{outcome="submitted"}"#),
        "{text}"
    );
}
