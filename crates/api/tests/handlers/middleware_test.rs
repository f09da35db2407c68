use argon2::PasswordVerifier;
use axum::{body::to_bytes, http::StatusCode};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use slotdesk_api::middleware::{auth, error_handling::map_error};
use slotdesk_core::errors::BookingError;

#[rstest]
#[case::invalid_input(BookingError::InvalidInput("bad date".into()), StatusCode::BAD_REQUEST)]
#[case::lead_time(
    BookingError::LeadTimeViolation("too soon".into()),
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case::slot_conflict(BookingError::SlotConflict("taken".into()), StatusCode::CONFLICT)]
#[case::adjacency(
    BookingError::AdjacencyViolation("gap".into()),
    StatusCode::UNPROCESSABLE_ENTITY
)]
#[case::not_found(BookingError::NotFound("missing".into()), StatusCode::NOT_FOUND)]
#[case::invalid_state(BookingError::InvalidState("settled".into()), StatusCode::CONFLICT)]
#[case::unauthenticated(
    BookingError::Unauthenticated("no token".into()),
    StatusCode::UNAUTHORIZED
)]
#[case::unverified(BookingError::Unverified("verify first".into()), StatusCode::FORBIDDEN)]
#[case::conflict(BookingError::Conflict("username".into()), StatusCode::CONFLICT)]
#[case::database(
    BookingError::Database(eyre::eyre!("connection refused")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[case::internal(
    BookingError::Internal(Box::new(std::io::Error::other("boom"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn error_maps_to_status(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(map_error(error).status(), expected);
}

#[tokio::test]
async fn domain_errors_carry_their_message() {
    let response = map_error(BookingError::SlotConflict("2030-03-06 at 09:00".into()));
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "Slot conflict: 2030-03-06 at 09:00");
}

#[tokio::test]
async fn database_errors_hide_details() {
    let response = map_error(BookingError::Database(eyre::eyre!(
        "password authentication failed for user postgres"
    )));
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["error"], "Database error");
}

#[test]
fn hash_password_produces_argon2_phc() {
    let password = "test_password";
    let hashed = auth::hash_password(password).unwrap();

    assert_ne!(hashed, password);
    assert!(hashed.starts_with("$argon2"));

    let parsed = argon2::PasswordHash::new(&hashed).unwrap();
    assert!(
        argon2::Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    );
    assert!(auth::verify_password(password, &hashed));
    assert!(!auth::verify_password("wrong_password", &hashed));
}
