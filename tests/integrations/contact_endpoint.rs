//! End-to-end tests for `POST /api/contact` against mocked provider APIs.

#[path = "../helpers/mod.rs"]
mod helpers;

use anyhow::Result;
use contact_relay::app::App;
use helpers::app::{test_config, TestApp};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ada() -> serde_json::Value {
    json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" })
}

/// A config with only the Telegram channel, pointed at `server`.
fn telegram_only(server: &MockServer) -> contact_relay::config::Config {
    let mut config = test_config();
    config.telegram.bot_token = Some("123:abc".to_string());
    config.telegram.chat_id = Some("42".to_string());
    config.telegram.api_base_url = server.uri();
    config
}

async fn mount_telegram(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path("/bot123:abc/sendMessage"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_telegram_success_returns_200() -> Result<()> {
    let server = MockServer::start().await;
    mount_telegram(&server, ResponseTemplate::new(200).set_body_json(json!({ "ok": true }))).await;

    let app = TestApp::start(App::builder(telegram_only(&server))).await?;
    let (status, body) = app.post_contact(&ada()).await?;

    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({
            "success": true,
            "message": "Notification sent (one or more channels succeeded).",
            "detail": ["telegram:true"],
        })
    );

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_telegram_not_ok_returns_500() -> Result<()> {
    let server = MockServer::start().await;
    mount_telegram(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "ok": false, "description": "chat not found" })),
    )
    .await;

    let app = TestApp::start(App::builder(telegram_only(&server))).await?;
    let (status, body) = app.post_contact(&ada()).await?;

    assert_eq!(status, 500);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Failed to send via any configured channel.");
    assert_eq!(body["detail"], json!(["telegram:false"]));
    assert!(body["errors"][0].as_str().unwrap().contains("chat not found"));

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_telegram_timeout_returns_500() -> Result<()> {
    let server = MockServer::start().await;
    mount_telegram(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "ok": true }))
            .set_delay(Duration::from_secs(3)),
    )
    .await;

    let mut config = telegram_only(&server);
    config.http.timeout_seconds = 1;
    let app = TestApp::start(App::builder(config)).await?;
    let (status, body) = app.post_contact(&ada()).await?;

    assert_eq!(status, 500);
    assert_eq!(body["detail"], json!(["telegram:false"]));

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_no_channels_configured_returns_500() -> Result<()> {
    let app = TestApp::start(App::builder(test_config())).await?;
    let (status, body) = app.post_contact(&ada()).await?;

    assert_eq!(status, 500);
    assert_eq!(
        body,
        json!({
            "success": false,
            "message": "Failed to send via any configured channel.",
            "detail": [],
        })
    );

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_malformed_body_returns_server_error() -> Result<()> {
    let app = TestApp::start(App::builder(test_config())).await?;
    let (status, body) = app.post_raw("{ this is not json").await?;

    assert_eq!(status, 500);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Server error occurred.");
    assert!(!body["error"].as_str().unwrap().is_empty());

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_api_provider_preferred_over_smtp() -> Result<()> {
    let server = MockServer::start().await;
    mount_telegram(&server, ResponseTemplate::new(401).set_body_json(json!({ "ok": false }))).await;
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer re_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "email-1" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = telegram_only(&server);
    config.email.address = Some("owner@example.com".to_string());
    config.email.smtp_password = Some("app-password".to_string());
    config.email.api_key = Some("re_123".to_string());
    config.email.api_base_url = server.uri();

    let app = TestApp::start(App::builder(config)).await?;
    let (status, body) = app.post_contact(&ada()).await?;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["detail"], json!(["telegram:false", "email(resend):true"]));

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_health_lists_configured_channels() -> Result<()> {
    let server = MockServer::start().await;
    let app = TestApp::start(App::builder(telegram_only(&server))).await?;

    let (status, body) = app.get_json("/api/health").await?;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "status": "ok", "channels": ["telegram"] }));

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_profile_is_served() -> Result<()> {
    let mut config = test_config();
    config.profile.designation = "Backend Engineer".to_string();
    let app = TestApp::start(App::builder(config)).await?;

    let (status, body) = app.get_json("/api/profile").await?;

    assert_eq!(status, 200);
    assert_eq!(body["designation"], "Backend Engineer");
    assert_eq!(body["name"], "Luis Antonio");

    app.shutdown(Duration::from_secs(5)).await
}
