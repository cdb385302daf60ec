use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

use async_trait::async_trait;
use axum::http::{header, HeaderValue, StatusCode};
use axum_test::TestServer;
use folio::api::{create_router, AppState, ContactReceipt, ErrorBody};
use folio::mail::{MessageSender, SendError};
use folio::models::OutboundMessage;
use serde_json::json;

const OPERATOR: &str = "owner@portfolio.dev";

#[derive(Clone, Default)]
struct RecordingSender {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
}

impl RecordingSender {
    fn sent(&self) -> Vec<OutboundMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for RecordingSender {
    async fn send(&self, message: &OutboundMessage) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

#[derive(Clone, Default)]
struct FailingSender {
    attempts: Arc<AtomicUsize>,
}

#[async_trait]
impl MessageSender for FailingSender {
    async fn send(&self, _message: &OutboundMessage) -> Result<(), SendError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(SendError::Transport(
            "535-5.7.8 Username and Password not accepted for owner@portfolio.dev".to_string(),
        ))
    }
}

fn setup() -> (TestServer, RecordingSender) {
    let sender = RecordingSender::default();
    let app = create_router(AppState::new(Arc::new(sender.clone()), OPERATOR));
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, sender)
}

fn complete_submission() -> serde_json::Value {
    json!({
        "name": "A",
        "email": "a@x.com",
        "subject": "S",
        "message": "M",
    })
}

mod health {
    use super::*;

    #[tokio::test]
    async fn reports_ok() {
        let (server, _) = setup();

        let response = server.get("/health").await;

        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["status"], "ok");
    }
}

mod contact_success {
    use super::*;

    #[tokio::test]
    async fn relays_complete_json_submission_once() {
        let (server, sender) = setup();

        let response = server.post("/contact").json(&complete_submission()).await;

        response.assert_status_ok();
        let receipt: ContactReceipt = response.json();
        assert_eq!(receipt.message, "Email sent successfully!");
        assert_eq!(sender.sent().len(), 1);
    }

    #[tokio::test]
    async fn addresses_message_to_operator_from_visitor() {
        let (server, sender) = setup();

        server.post("/contact").json(&complete_submission()).await;

        let sent = sender.sent();
        assert_eq!(sent[0].to, OPERATOR);
        assert_eq!(sent[0].from, "a@x.com");
        assert_eq!(sent[0].subject, "Portfolio Contact: S");
        assert!(sent[0].html.contains("New message from A"));
        assert!(sent[0].html.contains("<p>M</p>"));
    }

    #[tokio::test]
    async fn accepts_form_encoded_submission() {
        let (server, sender) = setup();

        let response = server
            .post("/contact")
            .form(&[
                ("name", "Grace"),
                ("email", "grace@navy.mil"),
                ("subject", "Hiring"),
                ("message", "Let's talk"),
            ])
            .await;

        response.assert_status_ok();
        let sent = sender.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].subject, "Portfolio Contact: Hiring");
    }

    #[tokio::test]
    async fn duplicate_submissions_send_duplicate_emails() {
        let (server, sender) = setup();

        server.post("/contact").json(&complete_submission()).await;
        server.post("/contact").json(&complete_submission()).await;

        assert_eq!(sender.sent().len(), 2);
    }
}

mod contact_validation {
    use super::*;

    #[tokio::test]
    async fn rejects_missing_message_without_sending() {
        let (server, sender) = setup();

        let response = server
            .post("/contact")
            .json(&json!({ "name": "A", "email": "a@x.com", "subject": "S" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorBody = response.json();
        assert_eq!(body.error, "All fields are required.");
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn rejects_empty_message_without_sending() {
        let (server, sender) = setup();

        let response = server
            .post("/contact")
            .json(&json!({ "name": "A", "email": "a@x.com", "subject": "S", "message": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn rejects_form_with_missing_fields() {
        let (server, sender) = setup();

        let response = server.post("/contact").form(&[("name", "A")]).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorBody = response.json();
        assert_eq!(body.error, "All fields are required.");
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn rejects_undecodable_body() {
        let (server, sender) = setup();

        let response = server.post("/contact").text("name=A&email").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: ErrorBody = response.json();
        assert_eq!(body.error, "All fields are required.");
        assert!(sender.sent().is_empty());
    }

    #[tokio::test]
    async fn does_not_check_email_format() {
        let (server, sender) = setup();

        let response = server
            .post("/contact")
            .json(&json!({ "name": "A", "email": "nope", "subject": "S", "message": "M" }))
            .await;

        response.assert_status_ok();
        assert_eq!(sender.sent().len(), 1);
    }
}

mod contact_failure {
    use super::*;

    fn failing_server() -> (TestServer, FailingSender) {
        let sender = FailingSender::default();
        let app = create_router(AppState::new(Arc::new(sender.clone()), OPERATOR));
        (TestServer::new(app).expect("Failed to create test server"), sender)
    }

    #[tokio::test]
    async fn returns_generic_error_when_transport_fails() {
        let (server, sender) = failing_server();

        let response = server.post("/contact").json(&complete_submission()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let text = response.text();
        assert!(!text.contains("Username and Password"));
        assert!(!text.contains("535"));
        let body: ErrorBody = response.json();
        assert_eq!(body.error, "Failed to send email. Try again later.");
        assert_eq!(sender.attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn smtp_without_credentials_fails_at_send_time() {
        let config = folio::config::RelayConfig::from_lookup(|_| None);
        let app = create_router(AppState::from_config(config));
        let server = TestServer::new(app).expect("Failed to create test server");

        let response = server.post("/contact").json(&complete_submission()).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: ErrorBody = response.json();
        assert_eq!(body.error, "Failed to send email. Try again later.");
    }
}

mod cors {
    use super::*;

    #[tokio::test]
    async fn allows_any_origin() {
        let (server, _) = setup();

        let response = server
            .post("/contact")
            .add_header(
                header::ORIGIN,
                HeaderValue::from_static("https://someone-else.example"),
            )
            .json(&complete_submission())
            .await;

        response.assert_status_ok();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
