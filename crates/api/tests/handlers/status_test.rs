use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

use crate::test_utils::TestContext;

#[tokio::test]
async fn status_checks_are_recorded_and_listed() {
    let ctx = TestContext::new();

    let created = ctx
        .server
        .post("/api/status")
        .json(&json!({ "client_name": "uptime-probe" }))
        .await;
    created.assert_status_ok();
    let check: Value = created.json();
    assert_eq!(check["client_name"], "uptime-probe");
    assert!(check["id"].is_string());
    assert!(check["timestamp"].is_string());

    let listed: Vec<Value> = ctx.server.get("/api/status").await.json();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0]["id"], check["id"]);
}

#[tokio::test]
async fn blank_client_name_is_rejected() {
    let ctx = TestContext::new();

    ctx.server
        .post("/api/status")
        .json(&json!({ "client_name": "  " }))
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_version_and_banner() {
    let ctx = TestContext::new();

    let health = ctx.server.get("/health").await;
    health.assert_status_ok();
    assert_eq!(health.json::<Value>()["status"], "ok");

    let version = ctx.server.get("/version").await;
    assert_eq!(
        version.json::<Value>()["version"],
        env!("CARGO_PKG_VERSION")
    );

    let banner = ctx.server.get("/api/").await;
    banner.assert_status_ok();
    assert_eq!(banner.json::<Value>()["message"], "SlotDesk booking API");
}
