use chrono::NaiveDateTime;
use tracing::info;
use uuid::Uuid;

use super::BookingService;
use crate::{
    errors::{BookingError, BookingResult},
    models::appointment::{Appointment, AppointmentStatus},
};

const CANCELLABLE: [AppointmentStatus; 2] =
    [AppointmentStatus::Pending, AppointmentStatus::Confirmed];

impl BookingService {
    /// `pending -> confirmed`, then notifies the client.
    pub async fn confirm(&self, id: Uuid) -> BookingResult<Appointment> {
        let appointment = self.settle(id, AppointmentStatus::Confirmed).await?;
        self.dispatcher
            .dispatch(self.composer.booking_confirmed(&appointment));
        Ok(appointment)
    }

    /// `pending -> rejected`, then notifies the client.
    pub async fn reject(&self, id: Uuid) -> BookingResult<Appointment> {
        let appointment = self.settle(id, AppointmentStatus::Rejected).await?;
        self.dispatcher
            .dispatch(self.composer.booking_rejected(&appointment));
        Ok(appointment)
    }

    /// Single conditional update out of `pending`; the loser of a race sees
    /// `InvalidState`.
    async fn settle(&self, id: Uuid, to: AppointmentStatus) -> BookingResult<Appointment> {
        if let Some(appointment) = self
            .store
            .transition(id, &[AppointmentStatus::Pending], to)
            .await?
        {
            info!(appointment_id = %id, status = %to, "Appointment settled");
            return Ok(appointment);
        }

        match self.store.find_by_id(id).await? {
            None => Err(BookingError::NotFound(format!("Appointment {id} not found"))),
            Some(current) => Err(BookingError::InvalidState(format!(
                "Appointment {id} is already {}",
                current.status
            ))),
        }
    }

    /// Owner-initiated cancellation of a pending or confirmed appointment that
    /// has not started yet.
    ///
    /// Appointments owned by someone else are reported as `NotFound`.
    pub async fn cancel(
        &self,
        id: Uuid,
        user_id: Uuid,
        now: NaiveDateTime,
    ) -> BookingResult<Appointment> {
        let current = self
            .store
            .find_by_id(id)
            .await?
            .filter(|appointment| appointment.user_id == user_id)
            .ok_or_else(|| BookingError::NotFound(format!("Appointment {id} not found")))?;

        if !CANCELLABLE.contains(&current.status) {
            return Err(BookingError::InvalidState(format!(
                "Appointment {id} is {} and cannot be cancelled",
                current.status
            )));
        }

        if current.starts_at() <= now {
            return Err(BookingError::InvalidState(format!(
                "Appointment {id} has already started"
            )));
        }

        let cancelled = self
            .store
            .transition(id, &CANCELLABLE, AppointmentStatus::Cancelled)
            .await?
            .ok_or_else(|| {
                BookingError::InvalidState(format!("Appointment {id} changed while cancelling"))
            })?;

        info!(appointment_id = %id, %user_id, "Appointment cancelled by owner");
        Ok(cancelled)
    }

    /// The user's non-cancelled appointments, earliest first.
    pub async fn list_mine(&self, user_id: Uuid) -> BookingResult<Vec<Appointment>> {
        let mut appointments = self.store.list_active_for_user(user_id).await?;
        appointments.sort_by_key(|appointment| (appointment.date, appointment.time));
        Ok(appointments)
    }
}
