//! Integration tests for `WebhookNotifier` against a local mock server.

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sizewatch_core::StockCheck;
use sizewatch_notify::{format_message, NotifyError, WebhookNotifier};

fn notifier(server: &MockServer) -> WebhookNotifier {
    WebhookNotifier::new(&format!("{}/hook", server.uri()), "Stock Monitor", 5)
        .expect("failed to build test WebhookNotifier")
}

#[tokio::test]
async fn notify_posts_discord_and_slack_compatible_body() {
    let server = MockServer::start().await;
    let message = format_message(
        &StockCheck::in_stock("InStock"),
        "https://shop.example.com/p/tee",
        "L",
    );

    Mock::given(method("POST"))
        .and(path("/hook"))
        .and(body_json(json!({
            "content": message,
            "text": message,
            "username": "Stock Monitor",
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    notifier(&server)
        .notify(&message)
        .await
        .expect("webhook should accept the post");
}

#[tokio::test]
async fn notify_reports_non_success_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let err = notifier(&server).notify("hello").await.unwrap_err();
    assert!(matches!(err, NotifyError::UnexpectedStatus { status: 400 }));
}

#[tokio::test]
async fn notify_best_effort_swallows_failures() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    notifier(&server).notify_best_effort("hello").await;
}

#[tokio::test]
async fn notify_best_effort_survives_unreachable_host() {
    let notifier = WebhookNotifier::new("http://127.0.0.1:9/hook", "Stock Monitor", 1)
        .expect("failed to build test WebhookNotifier");
    notifier.notify_best_effort("hello").await;
}
