//! # Availability Handlers
//!
//! Serves the per-date slot grid. The decision for each slot is made by the
//! booking engine against the current time from the state's clock.

use axum::{
    Json,
    extract::{Path, State},
};
use slotdesk_core::{format::parse_date, models::appointment::AvailabilityResponse};
use std::sync::Arc;

use crate::{
    ApiState,
    middleware::{auth::VerifiedUser, error_handling::AppError},
};

/// Lists every catalog slot on `date` with its availability
///
/// # Endpoint
///
/// ```text
/// GET /api/availability/2030-03-04
/// ```
///
/// # Errors
///
/// * `BookingError::InvalidInput` - Malformed or past date
///
/// Weekends return an empty `slots` list rather than an error.
#[axum::debug_handler]
pub async fn get_availability(
    State(state): State<Arc<ApiState>>,
    _user: VerifiedUser,
    Path(date): Path<String>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let date = parse_date(date.trim())?;
    let slots = state.booking.availability_on(date, state.clock.now()).await?;

    Ok(Json(AvailabilityResponse { date, slots }))
}
