//! Integration tests for `TelegramClient` using wiremock HTTP mocks.

use quakewatch_notify::{NotifyError, TelegramClient};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TelegramClient {
    TelegramClient::with_base_url("test-token", 10, base_url)
        .expect("client construction should not fail")
}

fn ok_envelope() -> serde_json::Value {
    serde_json::json!({ "ok": true, "result": { "message_id": 7 } })
}

#[tokio::test]
async fn send_message_posts_to_token_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .and(body_string_contains("chat_id=42"))
        .and(body_string_contains("parse_mode=Markdown"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .send_message("42", "hello")
        .await
        .expect("send should succeed");
}

#[tokio::test]
async fn send_photo_posts_photo_url() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bottest-token/sendPhoto"))
        .and(body_string_contains("photo=https"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    client
        .send_photo("42", "https://example.com/map.png")
        .await
        .expect("send should succeed");
}

#[tokio::test]
async fn api_level_failure_surfaces_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "ok": false, "description": "Forbidden: bot was blocked" }),
        ))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.send_message("42", "hello").await;
    assert!(
        matches!(result, Err(NotifyError::Api(ref msg)) if msg.contains("blocked")),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn http_failure_is_an_http_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.send_message("42", "hello").await;
    assert!(matches!(result, Err(NotifyError::Http(_))), "got: {result:?}");
}

#[tokio::test]
async fn broadcast_continues_past_failing_recipient() {
    let server = MockServer::start().await;

    // First recipient is rejected at the API level, the rest succeed.
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .and(body_string_contains("chat_id=1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            serde_json::json!({ "ok": false, "description": "Bad Request: chat not found" }),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let recipients = vec!["1".to_string(), "22".to_string(), "33".to_string()];
    let delivered = client.broadcast(&recipients, "alert text", None).await;

    assert_eq!(delivered, 2, "failing recipient must not stop the others");
}

#[tokio::test]
async fn broadcast_with_location_sends_photo_then_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bottest-token/sendPhoto"))
        .and(body_string_contains("staticmap"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let recipients = vec!["42".to_string()];
    let delivered = client
        .broadcast(&recipients, "alert text", Some((11.2, 125.0)))
        .await;

    assert_eq!(delivered, 1);
}

#[tokio::test]
async fn broadcast_photo_failure_still_delivers_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/bottest-token/sendPhoto"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/bottest-token/sendMessage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let recipients = vec!["42".to_string()];
    let delivered = client
        .broadcast(&recipients, "alert text", Some((11.2, 125.0)))
        .await;

    assert_eq!(delivered, 1);
}
