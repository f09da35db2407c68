use chrono::{NaiveDateTime, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use super::{BookingService, availability::is_business_day};
use crate::{
    errors::{BookingError, BookingResult},
    format::{parse_date, parse_time},
    models::{
        appointment::{Appointment, AppointmentStatus, CreateAppointmentRequest},
        user::User,
    },
    slots::slot_index,
    store::NOT_CONSECUTIVE,
};

/// Checks that `candidate` keeps the user's same-day slots one unbroken run.
///
/// With no slots held yet any index is fine; otherwise the candidate must sit
/// directly next to one of the held indices.
pub fn check_adjacency(held: &[usize], candidate: usize) -> BookingResult<()> {
    if held.is_empty() || held.iter().any(|&index| index.abs_diff(candidate) == 1) {
        return Ok(());
    }

    Err(BookingError::AdjacencyViolation(NOT_CONSECUTIVE.to_string()))
}

impl BookingService {
    /// Runs a booking request through the admission pipeline and, if every
    /// rule passes, stores it as `pending` and notifies the administrator.
    ///
    /// Weekend dates are refused here as well as being left out of
    /// availability. The slot and adjacency checks run once against a
    /// snapshot for an early answer and again inside the store write, so
    /// concurrent requests cannot slip past either rule.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - malformed date or time, time not in the catalog, or a weekend date
    /// * `LeadTimeViolation` - slot starts sooner than the lead time
    /// * `SlotConflict` - slot already held, including a lost race at insert time
    /// * `AdjacencyViolation` - slot would leave a gap in the user's same-day block
    pub async fn admit(
        &self,
        request: &CreateAppointmentRequest,
        user: &User,
        now: NaiveDateTime,
    ) -> BookingResult<Appointment> {
        let date = parse_date(request.date.trim())?;
        let time = parse_time(request.time.trim())?;

        if date.and_time(time) < self.earliest_bookable(now) {
            warn!(user_id = %user.id, %date, %time, "Booking rejected: inside lead time");
            return Err(BookingError::LeadTimeViolation(format!(
                "Appointments must be booked at least {} hours in advance",
                self.config.lead_time.num_hours()
            )));
        }

        let index = slot_index(&self.catalog, time).ok_or_else(|| {
            BookingError::InvalidInput(format!(
                "{} is not a bookable slot",
                time.format("%H:%M")
            ))
        })?;

        if !is_business_day(date) {
            return Err(BookingError::InvalidInput(
                "Appointments can only be booked Monday to Friday".to_string(),
            ));
        }

        let booked = self.store.active_on_date(date).await?;
        if booked.iter().any(|appointment| appointment.time == time) {
            warn!(user_id = %user.id, %date, %time, "Booking rejected: slot taken");
            return Err(BookingError::SlotConflict(format!(
                "{} at {} is already booked",
                date,
                time.format("%H:%M")
            )));
        }

        let held: Vec<usize> = booked
            .iter()
            .filter(|appointment| appointment.user_id == user.id)
            .filter_map(|appointment| slot_index(&self.catalog, appointment.time))
            .collect();
        if let Err(err) = check_adjacency(&held, index) {
            warn!(user_id = %user.id, %date, %time, ?held, "Booking rejected: not adjacent");
            return Err(err);
        }

        let appointment = Appointment {
            id: Uuid::new_v4(),
            user_id: user.id,
            user_name: user.display_name(),
            agency_name: user.agency_name.clone(),
            user_email: user.email.clone(),
            date,
            time,
            duration_minutes: self.config.slot_minutes(),
            notes: request
                .notes
                .as_deref()
                .map(str::trim)
                .filter(|notes| !notes.is_empty())
                .map(str::to_string),
            status: AppointmentStatus::Pending,
            created_at: Utc::now(),
        };

        let neighbours: Vec<_> = [index.checked_sub(1), Some(index + 1)]
            .into_iter()
            .flatten()
            .filter_map(|i| self.catalog.get(i).copied())
            .collect();
        let stored = self.store.insert(&appointment, &neighbours).await?;
        info!(
            appointment_id = %stored.id,
            user_id = %stored.user_id,
            date = %stored.date,
            time = %stored.time.format("%H:%M"),
            "Appointment admitted as pending"
        );

        self.dispatcher
            .dispatch(self.composer.booking_requested(&stored));

        Ok(stored)
    }
}
