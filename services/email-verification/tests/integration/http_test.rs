use std::sync::Arc;

use axum::body::Bytes;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use serde_json::{Value, json};

use sayonika_email_verification::domain::repository::{Mailer, TokenStore};
use sayonika_email_verification::domain::types::PendingPolicy;
use sayonika_email_verification::router::build_router;
use sayonika_email_verification::state::AppState;

use crate::helpers::{FailingTokenStore, MockMailer, MockTokenStore, link_params, test_settings};

fn server<S, M>(store: S, mailer: M, policy: PendingPolicy) -> TestServer
where
    S: TokenStore + Clone + 'static,
    M: Mailer + Clone + 'static,
{
    let state = AppState {
        store,
        mailer,
        settings: Arc::new(test_settings(policy)),
    };
    TestServer::new(build_router(state)).unwrap()
}

#[tokio::test]
async fn should_send_mail_for_json_body() {
    let mailer = MockMailer::new();
    let server = server(MockTokenStore::new(), mailer.clone(), PendingPolicy::Overwrite);

    let resp = server
        .post("/sendmail")
        .json(&json!({ "email": "user@example.com", "name": "Monika" }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    let body: Value = resp.json();
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "Sent to Monika via email (user@example.com).");
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn should_send_mail_for_form_body() {
    let mailer = MockMailer::new();
    let server = server(MockTokenStore::new(), mailer.clone(), PendingPolicy::Overwrite);

    let resp = server
        .post("/sendmail")
        .form(&[("email", "user@example.com"), ("name", "Monika")])
        .await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(mailer.sent()[0].to_address, "user@example.com");
}

#[tokio::test]
async fn should_return_conflict_for_pending_token_under_reject_policy() {
    let server = server(MockTokenStore::new(), MockMailer::new(), PendingPolicy::Reject);
    let body = json!({ "email": "user@example.com", "name": "Monika" });

    server.post("/sendmail").json(&body).await.assert_status_ok();
    let resp = server.post("/sendmail").json(&body).await;

    assert_eq!(resp.status_code(), StatusCode::CONFLICT);
    let json: Value = resp.json();
    assert_eq!(json["code"], 409);
    assert_eq!(json["kind"], "ALREADY_PENDING");
}

#[tokio::test]
async fn should_return_server_error_when_store_is_down() {
    let mailer = MockMailer::new();
    let server = server(FailingTokenStore, mailer.clone(), PendingPolicy::Overwrite);

    let resp = server
        .post("/sendmail")
        .json(&json!({ "email": "user@example.com", "name": "Monika" }))
        .await;

    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = resp.json();
    assert_eq!(json["kind"], "STORE_UNAVAILABLE");
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn should_reject_non_object_payload() {
    let mailer = MockMailer::new();
    let server = server(MockTokenStore::new(), mailer.clone(), PendingPolicy::Overwrite);

    let resp = server.post("/sendmail").json(&json!(["user@example.com"])).await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let json: Value = resp.json();
    assert_eq!(json["kind"], "INVALID_PAYLOAD");
    assert!(mailer.sent().is_empty());
}

#[tokio::test]
async fn should_reject_non_object_payload_on_verify() {
    let store = MockTokenStore::new();
    store.seed("a@x.com", "tok", 86_400);
    let server = server(store.clone(), MockMailer::new(), PendingPolicy::Overwrite);

    let resp = server.post("/verify").json(&json!(["a@x.com", "tok"])).await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
    let json: Value = resp.json();
    assert_eq!(json["kind"], "INVALID_PAYLOAD");
    assert!(store.entry("a@x.com").is_some());
}

#[tokio::test]
async fn should_accept_json_media_type_in_any_case() {
    let mailer = MockMailer::new();
    let server = server(MockTokenStore::new(), mailer.clone(), PendingPolicy::Overwrite);

    let resp = server
        .post("/sendmail")
        .bytes(Bytes::from_static(
            br#"{"email":"user@example.com","name":"Monika"}"#,
        ))
        .content_type("Application/JSON")
        .await;

    assert_eq!(resp.status_code(), StatusCode::OK);
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn should_verify_once_then_report_gone() {
    let mailer = MockMailer::new();
    let server = server(MockTokenStore::new(), mailer.clone(), PendingPolicy::Overwrite);
    server
        .post("/sendmail")
        .json(&json!({ "email": "user@example.com", "name": "Monika" }))
        .await
        .assert_status_ok();
    let (token, email) = link_params(&mailer.sent()[0]);
    let form = [("email", email.as_str()), ("token", token.as_str())];

    let first = server.post("/verify").form(&form).await;
    assert_eq!(first.status_code(), StatusCode::OK);
    let json: Value = first.json();
    assert_eq!(json["code"], 200);
    assert_eq!(json["message"], "Tokens match. Mark as verified in REST.");

    let replay = server.post("/verify").form(&form).await;
    assert_eq!(replay.status_code(), StatusCode::GONE);
    let json: Value = replay.json();
    assert_eq!(json["code"], 410);
}

#[tokio::test]
async fn should_return_forbidden_for_wrong_token() {
    let store = MockTokenStore::new();
    store.seed("user@example.com", "the-real-token", 86_400);
    let server = server(store.clone(), MockMailer::new(), PendingPolicy::Overwrite);

    let resp = server
        .post("/verify")
        .form(&[("email", "user@example.com"), ("token", "a-guess")])
        .await;

    assert_eq!(resp.status_code(), StatusCode::FORBIDDEN);
    let json: Value = resp.json();
    assert_eq!(json["kind"], "TOKEN_MISMATCH");
    assert!(store.entry("user@example.com").is_some());
}

#[tokio::test]
async fn should_return_server_error_when_store_is_down_on_verify() {
    let server = server(FailingTokenStore, MockMailer::new(), PendingPolicy::Overwrite);

    let resp = server
        .post("/verify")
        .form(&[("email", "user@example.com"), ("token", "t")])
        .await;

    assert_eq!(resp.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = resp.json();
    assert_eq!(json["code"], 500);
}

#[tokio::test]
async fn should_reject_verify_without_token() {
    let server = server(MockTokenStore::new(), MockMailer::new(), PendingPolicy::Overwrite);

    let resp = server
        .post("/verify")
        .form(&[("email", "user@example.com")])
        .await;

    assert_eq!(resp.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_report_health_and_readiness() {
    let up = server(MockTokenStore::new(), MockMailer::new(), PendingPolicy::Overwrite);
    up.get("/healthz").await.assert_status_ok();
    up.get("/readyz").await.assert_status_ok();

    let down = server(FailingTokenStore, MockMailer::new(), PendingPolicy::Overwrite);
    down.get("/healthz").await.assert_status_ok();
    let resp = down.get("/readyz").await;
    assert_eq!(resp.status_code(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_echo_request_id() {
    let server = server(MockTokenStore::new(), MockMailer::new(), PendingPolicy::Overwrite);

    let generated = server.get("/healthz").await;
    assert!(!generated.header("x-request-id").is_empty());

    let supplied = server
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("req-123"),
        )
        .await;
    assert_eq!(supplied.header("x-request-id"), "req-123");
}
