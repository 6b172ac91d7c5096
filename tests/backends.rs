// Provider clients against local mock servers that speak each vendor's
// wire format.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{json, Value};

use dilemma_arena::backend::{
    http_client, AnthropicClient, BackendError, ChatCompletionsClient, GeminiClient, ModelBackend,
};

#[derive(Clone, Default)]
struct Seen {
    inner: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

impl Seen {
    fn last(&self) -> (HeaderMap, Value) {
        self.inner.lock().unwrap().last().cloned().unwrap()
    }
}

/// Serve `app` on an ephemeral port and return its base URL.
async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn client() -> reqwest::Client {
    http_client(Duration::from_secs(5)).unwrap()
}

async fn chat_handler(
    State(seen): State<Seen>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    seen.inner.lock().unwrap().push((headers, body));
    Json(json!({
        "choices": [{ "message": { "role": "assistant", "content": "{\"move\": \"D\"}" } }]
    }))
}

#[tokio::test]
async fn test_openai_chat_completions() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(chat_handler))
        .with_state(seen.clone());
    let base = serve(app).await;

    let backend =
        ChatCompletionsClient::openai(client(), &base, Some("sk-test".into()), "o1-preview".into());
    let reply = backend.invoke("hello you are player1").await.unwrap();
    assert_eq!(reply, "{\"move\": \"D\"}");
    assert_eq!(backend.model(), "o1-preview");

    let (headers, body) = seen.last();
    assert_eq!(headers["authorization"], "Bearer sk-test");
    assert_eq!(body["model"], "o1-preview");
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["content"], "hello you are player1");
    assert!(body.get("temperature").is_none());
}

#[tokio::test]
async fn test_ai21_uses_studio_path_and_zero_temperature() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/studio/v1/chat/completions", post(chat_handler))
        .with_state(seen.clone());
    let base = serve(app).await;

    let backend = ChatCompletionsClient::ai21(
        client(),
        &format!("{base}/"),
        Some("ai21-key".into()),
        "jamba-1.5-large".into(),
    );
    backend.invoke("prompt").await.unwrap();

    let (headers, body) = seen.last();
    assert_eq!(headers["authorization"], "Bearer ai21-key");
    assert_eq!(body["model"], "jamba-1.5-large");
    assert_eq!(body["temperature"], 0.0);
}

#[tokio::test]
async fn test_anthropic_messages_concatenates_text_blocks() {
    let seen = Seen::default();
    let app = Router::new()
        .route(
            "/v1/messages",
            post(
                |State(seen): State<Seen>, headers: HeaderMap, Json(body): Json<Value>| async move {
                    seen.inner.lock().unwrap().push((headers, body));
                    Json(json!({
                        "content": [
                            { "type": "text", "text": "{\"move\": " },
                            { "type": "text", "text": "\"C\"}" }
                        ]
                    }))
                },
            ),
        )
        .with_state(seen.clone());
    let base = serve(app).await;

    let backend = AnthropicClient::new(
        client(),
        &base,
        Some("ant-key".into()),
        "claude-3-5-sonnet-20241022".into(),
    );
    let reply = backend.invoke("prompt").await.unwrap();
    assert_eq!(reply, "{\"move\": \"C\"}");

    let (headers, body) = seen.last();
    assert_eq!(headers["x-api-key"], "ant-key");
    assert_eq!(headers["anthropic-version"], "2023-06-01");
    assert_eq!(body["model"], "claude-3-5-sonnet-20241022");
    assert_eq!(body["max_tokens"], 1024);
}

#[tokio::test]
async fn test_gemini_generate_content_skips_thoughts() {
    let seen = Seen::default();
    let app = Router::new()
        .route(
            "/v1beta/models/{model}",
            post(
                |State(seen): State<Seen>,
                 axum::extract::Path(model): axum::extract::Path<String>,
                 Query(query): Query<HashMap<String, String>>,
                 Json(body): Json<Value>| async move {
                    let mut headers = HeaderMap::new();
                    headers.insert("x-model", model.parse().unwrap());
                    headers.insert("x-key", query["key"].parse().unwrap());
                    seen.inner.lock().unwrap().push((headers, body));
                    Json(json!({
                        "candidates": [{
                            "content": { "parts": [
                                { "text": "thinking it over", "thought": true },
                                { "text": "{\"move\": \"D\", \"reason\": \"r\"}" }
                            ]}
                        }]
                    }))
                },
            ),
        )
        .with_state(seen.clone());
    let base = serve(app).await;

    let backend = GeminiClient::new(client(), &base, Some("g-key".into()), "gemini-pro".into());
    let reply = backend.invoke("prompt").await.unwrap();
    assert_eq!(reply, "{\"move\": \"D\", \"reason\": \"r\"}");

    let (headers, body) = seen.last();
    assert_eq!(headers["x-model"], "gemini-pro:generateContent");
    assert_eq!(headers["x-key"], "g-key");
    assert_eq!(body["contents"][0]["parts"][0]["text"], "prompt");
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
    );
    let base = serve(app).await;

    let backend = ChatCompletionsClient::openai(client(), &base, Some("k".into()), "m".into());
    match backend.invoke("prompt").await {
        Err(e @ BackendError::Status { .. }) => {
            assert_eq!(e.to_string(), "HTTP 429");
            let BackendError::Status { status, body } = e else {
                unreachable!()
            };
            assert_eq!(status, 429);
            assert_eq!(body, "slow down");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_reply_is_an_error() {
    let app = Router::new().route(
        "/v1/chat/completions",
        post(|| async { Json(json!({ "choices": [] })) }),
    );
    let base = serve(app).await;

    let backend = ChatCompletionsClient::openai(client(), &base, Some("k".into()), "m".into());
    assert!(matches!(
        backend.invoke("prompt").await,
        Err(BackendError::EmptyReply)
    ));
}

#[tokio::test]
async fn test_missing_key_fails_without_request() {
    // Nothing listens here; a request would fail with a transport error.
    let backend = AnthropicClient::new(client(), "http://127.0.0.1:9", None, "m".into());
    assert!(matches!(
        backend.invoke("prompt").await,
        Err(BackendError::MissingApiKey)
    ));
}

#[tokio::test]
async fn test_transport_error_omits_url() {
    let backend = GeminiClient::new(client(), "http://127.0.0.1:9", Some("g-secret".into()), "m".into());
    let err = backend.invoke("prompt").await.unwrap_err();
    assert!(matches!(err, BackendError::Http(_)));
    let msg = err.to_string();
    assert!(!msg.contains("g-secret"), "got {msg}");
    assert!(!msg.contains("generateContent"), "got {msg}");
}
