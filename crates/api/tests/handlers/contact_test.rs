use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use slotdesk_api::Stores;
use slotdesk_core::{
    errors::{BookingError, BookingResult},
    models::contact::ContactRequest,
    store::ContactStore,
};

use crate::test_utils::TestContext;

/// A contact table that is never reachable.
struct UnavailableContactStore;

#[async_trait]
impl ContactStore for UnavailableContactStore {
    async fn insert(&self, _contact: &ContactRequest) -> BookingResult<()> {
        Err(BookingError::Database(eyre::eyre!("relation \"contact_requests\" does not exist")))
    }

    async fn list(&self, _limit: i64) -> BookingResult<Vec<ContactRequest>> {
        Ok(Vec::new())
    }
}

fn submission() -> Value {
    json!({
        "name": "Giulia Verdi",
        "email": "giulia@verdi.test",
        "phone": "+39 333 1234567",
        "service": "Property photography",
        "message": "Could you shoot three flats in Brera next month?",
    })
}

#[tokio::test]
async fn submission_is_stored_and_listed() {
    let ctx = TestContext::new();

    let response = ctx.server.post("/api/contact").json(&submission()).await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["success"], true);
    let id = body["id"].as_str().unwrap().to_string();

    let listed = ctx.server.get("/api/contacts").await;
    listed.assert_status_ok();
    let contacts: Vec<Value> = listed.json();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["id"], id.as_str());
    assert_eq!(contacts[0]["status"], "new");
    assert_eq!(contacts[0]["service"], "Property photography");
}

#[tokio::test]
async fn phone_is_optional() {
    let ctx = TestContext::new();
    let mut without_phone = submission();
    without_phone.as_object_mut().unwrap().remove("phone");

    ctx.server
        .post("/api/contact")
        .json(&without_phone)
        .await
        .assert_status_ok();
}

#[rstest]
#[case::short_name("name", json!("G"))]
#[case::email_without_at("email", json!("giulia.verdi.test"))]
#[case::long_phone("phone", json!("+39 333 1234567 ext 12345"))]
#[case::empty_service("service", json!("   "))]
#[case::short_message("message", json!("Hi there"))]
#[tokio::test]
async fn invalid_submissions_are_rejected(#[case] field: &str, #[case] value: Value) {
    let ctx = TestContext::new();
    let mut body = submission();
    body[field] = value;

    ctx.server
        .post("/api/contact")
        .json(&body)
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    let contacts: Vec<Value> = ctx.server.get("/api/contacts").await.json();
    assert!(contacts.is_empty());
}

#[tokio::test]
async fn storage_failure_is_a_generic_server_error() {
    let stores = Stores {
        contacts: Arc::new(UnavailableContactStore),
        ..Stores::in_memory()
    };
    let ctx = TestContext::with_stores(TestContext::new().now, stores);

    let response = ctx.server.post("/api/contact").json(&submission()).await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["success"], false);
    assert!(body["id"].is_null());
    assert!(body.get("error").is_none());
    assert!(!body["message"].as_str().unwrap().contains("contact_requests"));
}
