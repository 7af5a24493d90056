//! Tests the endpoint's aggregation when individual channels fail.

#[path = "../helpers/mod.rs"]
mod helpers;

use anyhow::Result;
use contact_relay::app::App;
use helpers::app::{test_config, TestApp};
use helpers::mock_notifiers::{MockChat, MockEmail};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_both_channels_failing_returns_500_with_errors() -> Result<()> {
    let chat = MockChat::new(false);
    let email = MockEmail::new(false);
    let builder = App::builder(test_config())
        .chat_notifier_override(Arc::new(chat.clone()))
        .email_notifier_override(Arc::new(email.clone()));
    let app = TestApp::start(builder).await?;

    let (status, body) = app
        .post_contact(&json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }))
        .await?;

    assert_eq!(status, 500);
    assert_eq!(body["success"], false);
    assert_eq!(body["detail"], json!(["telegram:false", "email(smtp):false"]));
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].as_str().unwrap().starts_with("telegram: "));
    assert!(errors[1].as_str().unwrap().starts_with("email(smtp): "));

    assert_eq!(chat.sent().len(), 1);
    assert_eq!(email.sent().len(), 1);

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_chat_failure_with_email_success_returns_200() -> Result<()> {
    let chat = MockChat::new(false);
    let email = MockEmail::new(true);
    let builder = App::builder(test_config())
        .chat_notifier_override(Arc::new(chat.clone()))
        .email_notifier_override(Arc::new(email.clone()));
    let app = TestApp::start(builder).await?;

    let (status, body) = app
        .post_contact(&json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }))
        .await?;

    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["detail"], json!(["telegram:false", "email(smtp):true"]));
    assert!(body.get("errors").is_none());

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_missing_fields_are_relayed_as_empty() -> Result<()> {
    let chat = MockChat::new(true);
    let email = MockEmail::new(true);
    let builder = App::builder(test_config())
        .chat_notifier_override(Arc::new(chat.clone()))
        .email_notifier_override(Arc::new(email.clone()));
    let app = TestApp::start(builder).await?;

    let (status, _) = app.post_contact(&json!({ "message": "Only a message" })).await?;
    assert_eq!(status, 200);

    let texts = chat.sent();
    assert_eq!(texts.len(), 1);
    assert!(texts[0].starts_with("New message from \n\nEmail: \n"));
    assert!(texts[0].contains("Only a message"));

    let submissions = email.sent();
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].name, "");
    assert_eq!(submissions[0].email, "");
    assert_eq!(submissions[0].message, "Only a message");

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_invalid_operator_address_only_fails_email() -> Result<()> {
    let mut config = test_config();
    config.email.address = Some("not-an-address".to_string());
    config.email.smtp_password = Some("app-password".to_string());
    config.email.smtp_host = "localhost".to_string();

    let chat = MockChat::new(true);
    let builder = App::builder(config).chat_notifier_override(Arc::new(chat.clone()));
    let app = TestApp::start(builder).await?;

    let (status, body) = app
        .post_contact(&json!({ "name": "Ada", "email": "ada@example.com", "message": "Hello" }))
        .await?;

    assert_eq!(status, 200);
    assert_eq!(body["detail"], json!(["telegram:true", "email(smtp):false"]));
    assert_eq!(chat.sent().len(), 1);

    app.shutdown(Duration::from_secs(5)).await
}

#[tokio::test]
async fn test_body_without_content_type_is_parsed() -> Result<()> {
    let chat = MockChat::new(true);
    let builder = App::builder(test_config()).chat_notifier_override(Arc::new(chat.clone()));
    let app = TestApp::start(builder).await?;

    let (status, body) = app
        .post_untyped(r#"{"name":"Ada","email":"ada@example.com","message":"Hello"}"#)
        .await?;

    assert_eq!(status, 200);
    assert_eq!(body["detail"], json!(["telegram:true"]));
    assert!(chat.sent()[0].starts_with("New message from Ada"));

    app.shutdown(Duration::from_secs(5)).await
}
