//! # Appointment Handlers
//!
//! Booking, listing and cancelling for signed-in agencies, plus the confirm and
//! reject links the administrator receives by email. The links carry no
//! credentials; possession of the appointment id is what authorizes them.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use slotdesk_core::models::appointment::{
    Appointment, AppointmentActionResponse, CreateAppointmentRequest,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    ApiState,
    middleware::{auth::VerifiedUser, error_handling::AppError},
};

/// Books a slot for the caller
///
/// # Returns
///
/// `201 Created` with the stored appointment in `pending` status.
///
/// # Errors
///
/// * `BookingError::InvalidInput` - Malformed date or time, off-catalog time, weekend
/// * `BookingError::LeadTimeViolation` - Slot starts too soon
/// * `BookingError::SlotConflict` - Slot already held
/// * `BookingError::AdjacencyViolation` - Slot not adjacent to the caller's block that day
#[axum::debug_handler]
pub async fn create_appointment(
    State(state): State<Arc<ApiState>>,
    VerifiedUser(user): VerifiedUser,
    Json(payload): Json<CreateAppointmentRequest>,
) -> Result<(StatusCode, Json<Appointment>), AppError> {
    let appointment = state
        .booking
        .admit(&payload, &user, state.clock.now())
        .await?;

    Ok((StatusCode::CREATED, Json(appointment)))
}

/// The caller's non-cancelled appointments, earliest first
#[axum::debug_handler]
pub async fn list_my_appointments(
    State(state): State<Arc<ApiState>>,
    VerifiedUser(user): VerifiedUser,
) -> Result<Json<Vec<Appointment>>, AppError> {
    let appointments = state.booking.list_mine(user.id).await?;
    Ok(Json(appointments))
}

/// Cancels one of the caller's upcoming appointments, freeing its slot
#[axum::debug_handler]
pub async fn cancel_appointment(
    State(state): State<Arc<ApiState>>,
    VerifiedUser(user): VerifiedUser,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentActionResponse>, AppError> {
    let appointment = state
        .booking
        .cancel(id, user.id, state.clock.now())
        .await?;

    Ok(Json(AppointmentActionResponse {
        id: appointment.id,
        status: appointment.status,
        message: "Appointment cancelled".to_string(),
    }))
}

#[axum::debug_handler]
pub async fn confirm_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentActionResponse>, AppError> {
    let appointment = state.booking.confirm(id).await?;

    Ok(Json(AppointmentActionResponse {
        id: appointment.id,
        status: appointment.status,
        message: format!(
            "Appointment for {} on {} at {} confirmed",
            appointment.agency_name,
            appointment.date,
            appointment.time.format("%H:%M")
        ),
    }))
}

#[axum::debug_handler]
pub async fn reject_appointment(
    State(state): State<Arc<ApiState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<AppointmentActionResponse>, AppError> {
    let appointment = state.booking.reject(id).await?;

    Ok(Json(AppointmentActionResponse {
        id: appointment.id,
        status: appointment.status,
        message: format!(
            "Appointment for {} on {} at {} rejected",
            appointment.agency_name,
            appointment.date,
            appointment.time.format("%H:%M")
        ),
    }))
}
