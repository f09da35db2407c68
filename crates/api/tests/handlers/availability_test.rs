use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

use crate::test_utils::{SATURDAY, TestContext, WEDNESDAY, booking};

fn available_times(body: &Value) -> Vec<String> {
    body["slots"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|slot| slot["available"] == true)
        .map(|slot| slot["time"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn business_day_lists_the_full_catalog() {
    let ctx = TestContext::new();
    let token = ctx.verified_user("rossi").await;

    let response = ctx
        .get_as(&format!("/api/availability/{WEDNESDAY}"), &token)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["date"], WEDNESDAY);

    let slots = body["slots"].as_array().unwrap();
    assert_eq!(slots.len(), 12);
    assert_eq!(slots[0]["time"], "09:00");
    assert_eq!(slots[11]["time"], "17:15");
    assert_eq!(available_times(&body).len(), 12);
}

#[tokio::test]
async fn weekend_has_no_slots() {
    let ctx = TestContext::new();
    let token = ctx.verified_user("rossi").await;

    let response = ctx
        .get_as(&format!("/api/availability/{SATURDAY}"), &token)
        .await;

    response.assert_status_ok();
    assert!(response.json::<Value>()["slots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn slots_inside_the_lead_time_are_unavailable() {
    // Monday 10:00; Tuesday slots become bookable from 10:00 onwards
    let ctx = TestContext::new();
    let token = ctx.verified_user("rossi").await;

    let response = ctx.get_as("/api/availability/2030-03-05", &token).await;

    response.assert_status_ok();
    let available = available_times(&response.json());
    assert!(!available.contains(&"09:00".to_string()));
    assert!(!available.contains(&"09:45".to_string()));
    assert_eq!(available.first().map(String::as_str), Some("10:30"));
}

#[tokio::test]
async fn booked_slot_is_unavailable_to_everyone() {
    let ctx = TestContext::new();
    let rossi = ctx.verified_user("rossi").await;
    let bianchi = ctx.verified_user("bianchi").await;

    ctx.post_as("/api/appointments", &rossi)
        .json(&booking(WEDNESDAY, "11:15"))
        .await
        .assert_status(StatusCode::CREATED);

    let response = ctx
        .get_as(&format!("/api/availability/{WEDNESDAY}"), &bianchi)
        .await;
    let available = available_times(&response.json());

    assert_eq!(available.len(), 11);
    assert!(!available.contains(&"11:15".to_string()));
}

#[rstest]
#[case::past("2030-03-01")]
#[case::malformed("06-03-2030")]
#[case::impossible("2030-02-30")]
#[tokio::test]
async fn bad_dates_are_rejected(#[case] date: &str) {
    let ctx = TestContext::new();
    let token = ctx.verified_user("rossi").await;

    ctx.get_as(&format!("/api/availability/{date}"), &token)
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}
