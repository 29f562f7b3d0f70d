// Copyright © 2025 rustmailer.com
// Licensed under RustMailer License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use poem::http::StatusCode;
use poem::test::{TestClient, TestForm, TestFormField};
use serde_json::Value;

use crate::modules::rest::build_route;
use crate::modules::rest::state::ContactState;
use crate::modules::submission::orchestrator::SubmissionHandler;
use crate::modules::submission::token::{StagingToken, StagingTokenSource};
use crate::modules::submission::SubmissionRequest;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Received {
    name: String,
    email: String,
    message: String,
    attachments: Vec<(String, String)>,
    token: Option<String>,
}

struct StubHandler {
    outcome: bool,
    received: Mutex<Vec<Received>>,
}

impl StubHandler {
    fn new(outcome: bool) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            received: Mutex::new(Vec::new()),
        })
    }

    fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

impl SubmissionHandler for StubHandler {
    fn handle(
        &self,
        request: SubmissionRequest,
        token: Option<StagingToken>,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + '_>> {
        self.received.lock().unwrap().push(Received {
            name: request.name,
            email: request.email,
            message: request.message,
            attachments: request
                .attachments
                .iter()
                .map(|file| (file.file_name.clone(), file.content_type.clone()))
                .collect(),
            token: token.map(|t| t.to_string()),
        });
        let outcome = self.outcome;
        Box::pin(async move { outcome })
    }
}

#[derive(Default)]
struct CountingTokens(AtomicUsize);

impl StagingTokenSource for CountingTokens {
    fn next_token(&self) -> StagingToken {
        let n = self.0.fetch_add(1, Ordering::SeqCst);
        StagingToken::new(format!("A{:010X}", n)).unwrap()
    }
}

fn client(handler: Arc<StubHandler>) -> TestClient<impl poem::Endpoint> {
    let state = ContactState::new(handler, Arc::new(CountingTokens::default()));
    TestClient::new(build_route(state))
}

fn contact_form(name: &str, email: &str, message: &str) -> TestForm {
    TestForm::new()
        .text("name", name)
        .text("email", email)
        .text("message", message)
}

async fn body_text(response: poem::test::TestResponse) -> String {
    response.0.into_body().into_string().await.unwrap()
}

#[tokio::test]
async fn test_form_page() {
    let cli = client(StubHandler::new(true));
    let response = cli.get("/").send().await;
    response.assert_status_is_ok();
    let page = body_text(response).await;
    assert!(page.contains("<form method=\"post\""));
    assert!(page.contains("name=\"attachments\""));
}

#[tokio::test]
async fn test_static_pages() {
    let cli = client(StubHandler::new(true));
    for (path, heading) in [("/success", "Thank you"), ("/privacy", "Privacy")] {
        let response = cli.get(path).send().await;
        response.assert_status_is_ok();
        assert!(body_text(response).await.contains(heading));
    }
}

#[tokio::test]
async fn test_successful_submission_redirects() {
    let handler = StubHandler::new(true);
    let cli = client(handler.clone());

    let response = cli
        .post("/")
        .multipart(contact_form("Alice", "alice@example.com", "Hello there"))
        .send()
        .await;
    response.assert_status(StatusCode::SEE_OTHER);
    response.assert_header("location", "/success");

    assert_eq!(
        handler.received(),
        vec![Received {
            name: "Alice".into(),
            email: "alice@example.com".into(),
            message: "Hello there".into(),
            attachments: Vec::new(),
            token: None,
        }]
    );
}

#[tokio::test]
async fn test_attachments_draw_a_token() {
    let handler = StubHandler::new(true);
    let cli = client(handler.clone());

    let form = contact_form("Alice", "alice@example.com", "Hello there")
        .field(
            TestFormField::bytes(b"GIF89a".to_vec())
                .name("attachments")
                .filename("cat.gif")
                .content_type("image/gif"),
        )
        .field(
            TestFormField::bytes(Vec::new())
                .name("attachments")
                .filename(""),
        );
    let response = cli.post("/").multipart(form).send().await;
    response.assert_status(StatusCode::SEE_OTHER);

    let received = handler.received();
    assert_eq!(received.len(), 1);
    assert_eq!(
        received[0].attachments,
        vec![("cat.gif".to_string(), "image/gif".to_string())]
    );
    assert_eq!(received[0].token.as_deref(), Some("A0000000000"));
}

#[tokio::test]
async fn test_invalid_form_is_shown_again() {
    let handler = StubHandler::new(true);
    let cli = client(handler.clone());

    let response = cli
        .post("/")
        .multipart(contact_form("<b>Al</b>", "nope", "Hi"))
        .send()
        .await;
    response.assert_status_is_ok();
    let page = body_text(response).await;
    assert!(page.contains("class=\"errors\""));
    assert!(page.contains("&lt;b&gt;Al&lt;/b&gt;"));
    assert!(!page.contains("class=\"alert\""));
    assert!(handler.received().is_empty());
}

#[tokio::test]
async fn test_failed_submission_shows_banner() {
    let cli = client(StubHandler::new(false));

    let response = cli
        .post("/")
        .multipart(contact_form("Alice", "alice@example.com", "Hello there"))
        .send()
        .await;
    response.assert_status_is_ok();
    let page = body_text(response).await;
    assert!(page.contains("could not be sent"));
    assert!(page.contains("value=\"Alice\""));
}

#[tokio::test]
async fn test_api_submission() {
    let handler = StubHandler::new(true);
    let cli = client(handler.clone());

    let form = contact_form("Alice", "alice@example.com", "Hello there").field(
        TestFormField::bytes(b"\xff\xd8\xff".to_vec())
            .name("attachments")
            .filename("photo.JPEG")
            .content_type("image/jpeg"),
    );
    let response = cli.post("/api/v1/contact").multipart(form).send().await;
    response.assert_status_is_ok();
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], Value::Bool(true));

    let received = handler.received();
    assert_eq!(
        received[0].attachments,
        vec![("photo.JPEG".to_string(), "image/jpeg".to_string())]
    );
    assert!(received[0].token.is_some());
}

#[tokio::test]
async fn test_api_reports_failure_as_false() {
    let cli = client(StubHandler::new(false));
    let response = cli
        .post("/api/v1/contact")
        .multipart(contact_form("Al", "alice@example.com", "Hello there"))
        .send()
        .await;
    response.assert_status_is_ok();
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["success"], Value::Bool(false));
}

#[tokio::test]
async fn test_status_endpoint() {
    let cli = client(StubHandler::new(true));
    let response = cli.get("/api/status").send().await;
    response.assert_status_is_ok();
    let json: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["version"], Value::String(env!("CARGO_PKG_VERSION").into()));
}

#[tokio::test]
async fn test_oversized_upload_rejected() {
    let handler = StubHandler::new(true);
    let cli = client(handler.clone());
    let response = cli
        .post("/")
        .header("content-length", (4 * 1024 * 1024).to_string())
        .body("x")
        .send()
        .await;
    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
    assert!(handler.received().is_empty());
}

#[tokio::test]
async fn test_unknown_path() {
    let cli = client(StubHandler::new(true));
    cli.get("/missing").send().await.assert_status(StatusCode::NOT_FOUND);
}
