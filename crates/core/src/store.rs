//! # Storage seams
//!
//! The booking engine never keeps authoritative state of its own; everything
//! goes through these traits. `slotdesk-db` implements them on PostgreSQL and
//! [`crate::memory`] implements them in process.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, AppointmentStatus},
        contact::ContactRequest,
        status::StatusCheck,
        user::{NewUser, User},
    },
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    /// Non-cancelled appointments on `date`, ordered by time.
    async fn active_on_date(&self, date: NaiveDate) -> BookingResult<Vec<Appointment>>;

    /// Persists a new appointment.
    ///
    /// `neighbours` are the catalog slots directly before and after the
    /// appointment's time. Implementations must fail with
    /// `BookingError::SlotConflict` when a non-cancelled appointment already
    /// holds the same date and time, and with `BookingError::AdjacencyViolation`
    /// when the owner already holds slots that day and none of them is a
    /// neighbour. Both checks must be atomic with the write (see
    /// [`check_user_block`]).
    async fn insert(
        &self,
        appointment: &Appointment,
        neighbours: &[NaiveTime],
    ) -> BookingResult<Appointment>;

    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>>;

    /// Non-cancelled appointments owned by `user_id`.
    async fn list_active_for_user(&self, user_id: Uuid) -> BookingResult<Vec<Appointment>>;

    /// Moves the appointment to `to` only if its current status is one of
    /// `from`. Returns `None` when nothing matched.
    async fn transition(
        &self,
        id: Uuid,
        from: &[AppointmentStatus],
        to: AppointmentStatus,
    ) -> BookingResult<Option<Appointment>>;
}

pub(crate) const NOT_CONSECUTIVE: &str =
    "Multiple bookings on the same day must be consecutive slots";

/// Write-time guard on one user's slots for one day.
///
/// `held` are the start times the owner of `appointment` already holds on its
/// date, read under the same lock as the insert that follows.
pub fn check_user_block(
    held: &[NaiveTime],
    appointment: &Appointment,
    neighbours: &[NaiveTime],
) -> BookingResult<()> {
    if held.contains(&appointment.time) {
        return Err(BookingError::SlotConflict(format!(
            "{} at {} is already booked",
            appointment.date,
            appointment.time.format("%H:%M")
        )));
    }
    if held.is_empty() || held.iter().any(|time| neighbours.contains(time)) {
        return Ok(());
    }

    Err(BookingError::AdjacencyViolation(NOT_CONSECUTIVE.to_string()))
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `BookingError::Conflict` if the username or email is taken.
    async fn create(&self, user: NewUser) -> BookingResult<User>;

    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<User>>;

    /// Looks the account up by username or email.
    async fn find_by_login(&self, login: &str) -> BookingResult<Option<User>>;

    async fn exists(&self, username: &str, email: &str) -> BookingResult<bool>;

    async fn mark_verified(&self, id: Uuid) -> BookingResult<Option<User>>;
}

#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn insert(&self, contact: &ContactRequest) -> BookingResult<()>;

    async fn list(&self, limit: i64) -> BookingResult<Vec<ContactRequest>>;
}

#[async_trait]
pub trait StatusStore: Send + Sync {
    async fn insert(&self, check: &StatusCheck) -> BookingResult<()>;

    async fn list(&self, limit: i64) -> BookingResult<Vec<StatusCheck>>;
}
