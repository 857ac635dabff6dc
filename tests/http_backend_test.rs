//! HTTP backend tests against a mock server
//!
//! Covers each collaborator endpoint, the outcome decoding at the wire
//! boundary, and non-2xx handling.

use buzzbot::api::{BackendClient, ChatOutcome, HttpBackend, FALLBACK_REPLY};
use buzzbot::config::BackendConfig;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(&BackendConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    })
    .expect("failed to build backend")
}

#[tokio::test]
async fn test_create_session_returns_server_issued_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/new"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "21173421201f4e56",
            "model": "gpt-4o-mini",
            "messages": 0
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let id = backend.create_session().await.expect("create failed");
    assert_eq!(id, "21173421201f4e56");
}

#[tokio::test]
async fn test_create_session_http_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/new"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let result = backend.create_session().await;
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("500"));
}

#[tokio::test]
async fn test_send_chat_posts_prompt_and_session_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({
            "prompt": "give me a hook",
            "session_id": "s1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "reply": "Hello" })))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let outcome = backend
        .send_chat("give me a hook", "s1")
        .await
        .expect("chat failed");
    assert_eq!(outcome, ChatOutcome::Reply("Hello".to_string()));
}

#[tokio::test]
async fn test_send_chat_decodes_generating_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "video_status": "generating" })),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let outcome = backend.send_chat("video please", "s1").await.unwrap();
    assert_eq!(outcome, ChatOutcome::VideoGenerating);
}

#[tokio::test]
async fn test_send_chat_decodes_video_reference() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "video_url": "https://cdn.example/clip.mp4"
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let outcome = backend.send_chat("video please", "s1").await.unwrap();
    assert_eq!(
        outcome,
        ChatOutcome::VideoReady("https://cdn.example/clip.mp4".to_string())
    );
}

#[tokio::test]
async fn test_send_chat_empty_body_falls_back_to_placeholder() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let outcome = backend.send_chat("hello", "s1").await.unwrap();
    assert_eq!(outcome, ChatOutcome::Reply(FALLBACK_REPLY.to_string()));
}

#[tokio::test]
async fn test_send_chat_http_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    assert!(backend.send_chat("hello", "s1").await.is_err());
}

#[tokio::test]
async fn test_fetch_title_returns_title() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/s1/title"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "Growth Hacks" })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let title = backend.fetch_title("s1").await.unwrap();
    assert_eq!(title.as_deref(), Some("Growth Hacks"));
}

#[tokio::test]
async fn test_fetch_title_absent_and_empty_are_none() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/session/absent/title"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/session/empty/title"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "title": "" })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    assert!(backend.fetch_title("absent").await.unwrap().is_none());
    assert!(backend.fetch_title("empty").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_sessions_parses_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/sessions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "s1", "title": "One", "updatedAt": 1700000000000u64 },
            { "id": "s2", "title": null, "updatedAt": 1700000100000u64 }
        ])))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let sessions = backend.list_sessions().await.unwrap();
    assert_eq!(sessions.len(), 2);
    assert_eq!(sessions[0].id, "s1");
    assert_eq!(sessions[0].title.as_deref(), Some("One"));
    assert!(sessions[1].title.is_none());
}

#[tokio::test]
async fn test_delete_session_hits_session_path() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/session/s1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    backend.delete_session("s1").await.expect("delete failed");
}

#[tokio::test]
async fn test_delete_session_http_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/session/s1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    assert!(backend.delete_session("s1").await.is_err());
}
