use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotdesk_core::notify::NoticeKind;

use crate::test_utils::{TestContext, verification_token};

#[tokio::test]
async fn register_creates_unverified_account_and_sends_link() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&TestContext::registration("rossi"))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["username"], "rossi");
    assert_eq!(body["verified"], false);

    let notice = ctx
        .notifier
        .wait_for(NoticeKind::AccountVerification, "rossi@agency.test")
        .await;
    assert!(notice.body.contains("http://slotdesk.test/api/auth/verify?token="));
}

#[tokio::test]
async fn register_rejects_duplicate_username_and_email() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/auth/register")
        .json(&TestContext::registration("rossi"))
        .await
        .assert_status(StatusCode::CREATED);

    let same_username = ctx
        .server
        .post("/api/auth/register")
        .json(&TestContext::registration("rossi"))
        .await;
    same_username.assert_status(StatusCode::CONFLICT);

    let mut same_email = TestContext::registration("bianchi");
    same_email["email"] = json!("ROSSI@agency.test");
    ctx.server
        .post("/api/auth/register")
        .json(&same_email)
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn register_validates_fields() {
    let ctx = TestContext::new();

    let mut short_password = TestContext::registration("rossi");
    short_password["password"] = json!("short");

    let response = ctx
        .server
        .post("/api/auth/register")
        .json(&short_password)
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(
        response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .contains("Password")
    );
}

#[tokio::test]
async fn login_accepts_username_or_email() {
    let ctx = TestContext::new();
    ctx.unverified_user("rossi").await;

    let by_email = ctx
        .server
        .post("/api/auth/login")
        .json(&json!({ "login": "rossi@agency.test", "password": "correct-horse-battery" }))
        .await;

    by_email.assert_status_ok();
    let body: Value = by_email.json();
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["user"]["username"], "rossi");
}

#[tokio::test]
async fn login_with_bad_credentials_is_unauthorized() {
    let ctx = TestContext::new();
    ctx.unverified_user("rossi").await;

    ctx.server
        .post("/api/auth/login")
        .json(&json!({ "login": "rossi", "password": "not-the-password" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.server
        .post("/api/auth/login")
        .json(&json!({ "login": "nobody", "password": "correct-horse-battery" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn me_reports_verification_state() {
    let ctx = TestContext::new();
    let token = ctx.unverified_user("rossi").await;

    let before = ctx.get_as("/api/auth/me", &token).await;
    before.assert_status_ok();
    assert_eq!(before.json::<Value>()["verified"], false);

    let notice = ctx
        .notifier
        .wait_for(NoticeKind::AccountVerification, "rossi@agency.test")
        .await;
    ctx.server
        .get("/api/auth/verify")
        .add_query_param("token", verification_token(&notice.body))
        .await
        .assert_status_ok();

    let after = ctx.get_as("/api/auth/me", &token).await;
    assert_eq!(after.json::<Value>()["verified"], true);
}

#[tokio::test]
async fn verify_rejects_access_tokens_and_garbage() {
    let ctx = TestContext::new();
    let access = ctx.unverified_user("rossi").await;

    ctx.server
        .get("/api/auth/verify")
        .add_query_param("token", &access)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.server
        .get("/api/auth/verify")
        .add_query_param("token", "not-a-token")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn protected_routes_require_a_bearer_token() {
    let ctx = TestContext::new();

    ctx.server
        .get("/api/auth/me")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    ctx.get_as("/api/appointments/mine", "garbage")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unverified_accounts_cannot_book() {
    let ctx = TestContext::new();
    let token = ctx.unverified_user("rossi").await;

    ctx.get_as("/api/availability/2030-03-06", &token)
        .await
        .assert_status(StatusCode::FORBIDDEN);
}
