use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use slotdesk_core::notify::NoticeKind;
use uuid::Uuid;

use crate::test_utils::{ADMIN_EMAIL, SATURDAY, TestContext, WEDNESDAY, booking};

async fn book(ctx: &TestContext, token: &str, date: &str, time: &str) -> Value {
    let response = ctx
        .post_as("/api/appointments", token)
        .json(&booking(date, time))
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()
}

#[test_log::test(tokio::test)]
async fn booking_is_pending_and_notifies_the_admin() {
    let ctx = TestContext::new();
    let token = ctx.verified_user("rossi").await;

    let response = ctx
        .post_as("/api/appointments", &token)
        .json(&json!({ "date": WEDNESDAY, "time": "09:00", "notes": "  keys at reception " }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["status"], "pending");
    assert_eq!(body["date"], WEDNESDAY);
    assert_eq!(body["time"], "09:00");
    assert_eq!(body["duration_minutes"], 45);
    assert_eq!(body["notes"], "keys at reception");
    assert_eq!(body["user_name"], "Ada Rossi");
    assert_eq!(body["agency_name"], "rossi Immobili");

    let id = body["id"].as_str().unwrap();
    let notice = ctx
        .notifier
        .wait_for(NoticeKind::BookingRequested, ADMIN_EMAIL)
        .await;
    assert!(
        notice
            .body
            .contains(&format!("http://slotdesk.test/api/appointments/{id}/confirm"))
    );
    assert!(
        notice
            .body
            .contains(&format!("http://slotdesk.test/api/appointments/{id}/reject"))
    );
}

#[tokio::test]
async fn second_booking_of_a_slot_conflicts() {
    let ctx = TestContext::new();
    let rossi = ctx.verified_user("rossi").await;
    let bianchi = ctx.verified_user("bianchi").await;

    book(&ctx, &rossi, WEDNESDAY, "10:30").await;

    ctx.post_as("/api/appointments", &bianchi)
        .json(&booking(WEDNESDAY, "10:30"))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn booking_inside_the_lead_time_is_unprocessable() {
    let ctx = TestContext::new();
    let token = ctx.verified_user("rossi").await;

    let response = ctx
        .post_as("/api/appointments", &token)
        .json(&booking("2030-03-05", "09:00"))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(
        response.json::<Value>()["error"]
            .as_str()
            .unwrap()
            .starts_with("Lead time violation")
    );
}

#[tokio::test]
async fn off_catalog_times_and_weekends_are_bad_requests() {
    let ctx = TestContext::new();
    let token = ctx.verified_user("rossi").await;

    for (date, time) in [(WEDNESDAY, "09:30"), (WEDNESDAY, "9:00"), (SATURDAY, "09:00")] {
        ctx.post_as("/api/appointments", &token)
            .json(&booking(date, time))
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn same_day_bookings_must_stay_contiguous() {
    let ctx = TestContext::new();
    let token = ctx.verified_user("rossi").await;

    book(&ctx, &token, WEDNESDAY, "11:15").await;

    ctx.post_as("/api/appointments", &token)
        .json(&booking(WEDNESDAY, "15:00"))
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    book(&ctx, &token, WEDNESDAY, "12:00").await;
    book(&ctx, &token, WEDNESDAY, "10:30").await;

    // Other days are independent
    book(&ctx, &token, "2030-03-07", "15:00").await;
}

#[tokio::test]
async fn mine_lists_own_appointments_in_order() {
    let ctx = TestContext::new();
    let rossi = ctx.verified_user("rossi").await;
    let bianchi = ctx.verified_user("bianchi").await;

    book(&ctx, &rossi, "2030-03-07", "09:00").await;
    book(&ctx, &rossi, WEDNESDAY, "14:15").await;
    book(&ctx, &bianchi, WEDNESDAY, "09:00").await;

    let response = ctx.get_as("/api/appointments/mine", &rossi).await;
    response.assert_status_ok();

    let listed: Vec<(String, String)> = response
        .json::<Vec<Value>>()
        .iter()
        .map(|a| {
            (
                a["date"].as_str().unwrap().to_string(),
                a["time"].as_str().unwrap().to_string(),
            )
        })
        .collect();

    assert_eq!(
        listed,
        vec![
            (WEDNESDAY.to_string(), "14:15".to_string()),
            ("2030-03-07".to_string(), "09:00".to_string()),
        ]
    );
}

#[tokio::test]
async fn confirm_settles_once_and_notifies_the_client() {
    let ctx = TestContext::new();
    let token = ctx.verified_user("rossi").await;
    let id = book(&ctx, &token, WEDNESDAY, "09:00").await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = ctx
        .server
        .get(&format!("/api/appointments/{id}/confirm"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "confirmed");
    assert!(body["message"].as_str().unwrap().contains("confirmed"));

    ctx.notifier
        .wait_for(NoticeKind::BookingConfirmed, "rossi@agency.test")
        .await;

    ctx.server
        .get(&format!("/api/appointments/{id}/confirm"))
        .await
        .assert_status(StatusCode::CONFLICT);
    ctx.server
        .get(&format!("/api/appointments/{id}/reject"))
        .await
        .assert_status(StatusCode::CONFLICT);

    assert_eq!(ctx.notifier.count(NoticeKind::BookingConfirmed), 1);
    assert_eq!(ctx.notifier.count(NoticeKind::BookingRejected), 0);
}

#[tokio::test]
async fn reject_keeps_the_slot_held() {
    let ctx = TestContext::new();
    let rossi = ctx.verified_user("rossi").await;
    let bianchi = ctx.verified_user("bianchi").await;
    let id = book(&ctx, &rossi, WEDNESDAY, "09:00").await["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = ctx
        .server
        .get(&format!("/api/appointments/{id}/reject"))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "rejected");

    ctx.notifier
        .wait_for(NoticeKind::BookingRejected, "rossi@agency.test")
        .await;

    ctx.post_as("/api/appointments", &bianchi)
        .json(&booking(WEDNESDAY, "09:00"))
        .await
        .assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn settling_an_unknown_appointment_is_not_found() {
    let ctx = TestContext::new();
    let id = Uuid::new_v4();

    ctx.server
        .get(&format!("/api/appointments/{id}/confirm"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
    ctx.server
        .get(&format!("/api/appointments/{id}/reject"))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_cancellation_frees_the_slot() {
    let ctx = TestContext::new();
    let rossi = ctx.verified_user("rossi").await;
    let bianchi = ctx.verified_user("bianchi").await;
    let id = book(&ctx, &rossi, WEDNESDAY, "09:00").await["id"]
        .as_str()
        .unwrap()
        .to_string();

    // Someone else's appointment looks missing
    ctx.delete_as(&format!("/api/appointments/{id}"), &bianchi)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    let response = ctx
        .delete_as(&format!("/api/appointments/{id}"), &rossi)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "cancelled");

    ctx.delete_as(&format!("/api/appointments/{id}"), &rossi)
        .await
        .assert_status(StatusCode::CONFLICT);

    let mine = ctx.get_as("/api/appointments/mine", &rossi).await;
    assert!(mine.json::<Vec<Value>>().is_empty());

    book(&ctx, &bianchi, WEDNESDAY, "09:00").await;
}
