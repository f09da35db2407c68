//! PostgreSQL implementations of the core storage traits.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use eyre::{Report, WrapErr};
use slotdesk_core::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, AppointmentStatus},
        contact::ContactRequest,
        status::StatusCheck,
        user::{NewUser, User},
    },
    store::{AppointmentStore, ContactStore, StatusStore, UserStore, check_user_block},
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::repositories::{appointment, contact, status, user};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &Pool<Postgres> {
        &self.pool
    }
}

/// True when the report wraps a Postgres unique constraint violation.
pub fn is_unique_violation(report: &Report) -> bool {
    report
        .downcast_ref::<sqlx::Error>()
        .and_then(|e| e.as_database_error())
        .and_then(|e| e.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

fn to_appointments(rows: Vec<crate::models::DbAppointment>) -> BookingResult<Vec<Appointment>> {
    rows.into_iter()
        .map(|row| Appointment::try_from(row).map_err(BookingError::from))
        .collect()
}

#[async_trait]
impl AppointmentStore for PgStore {
    async fn active_on_date(&self, date: NaiveDate) -> BookingResult<Vec<Appointment>> {
        let rows = appointment::get_active_appointments_by_date(&self.pool, date).await?;
        to_appointments(rows)
    }

    async fn insert(
        &self,
        new: &Appointment,
        neighbours: &[NaiveTime],
    ) -> BookingResult<Appointment> {
        let mut tx = self
            .pool
            .begin()
            .await
            .wrap_err("Failed to open booking transaction")?;

        appointment::lock_user_day(&mut *tx, new.user_id, new.date).await?;
        let held =
            appointment::get_active_times_for_user_on_date(&mut *tx, new.user_id, new.date)
                .await?;
        check_user_block(&held, new, neighbours)?;

        let row = match appointment::create_appointment(&mut *tx, new).await {
            Ok(row) => row,
            Err(e) if is_unique_violation(&e) => {
                tracing::debug!("Slot {} {} already held", new.date, new.time);
                return Err(BookingError::SlotConflict(format!(
                    "{} at {} is already booked",
                    new.date,
                    new.time.format("%H:%M")
                )));
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit()
            .await
            .wrap_err("Failed to commit booking transaction")?;

        Ok(Appointment::try_from(row)?)
    }

    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        appointment::get_appointment_by_id(&self.pool, id)
            .await?
            .map(Appointment::try_from)
            .transpose()
            .map_err(BookingError::from)
    }

    async fn list_active_for_user(&self, user_id: Uuid) -> BookingResult<Vec<Appointment>> {
        let rows = appointment::get_active_appointments_by_user(&self.pool, user_id).await?;
        to_appointments(rows)
    }

    async fn transition(
        &self,
        id: Uuid,
        from: &[AppointmentStatus],
        to: AppointmentStatus,
    ) -> BookingResult<Option<Appointment>> {
        appointment::update_appointment_status(&self.pool, id, from, to)
            .await?
            .map(Appointment::try_from)
            .transpose()
            .map_err(BookingError::from)
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, new: NewUser) -> BookingResult<User> {
        match user::create_user(&self.pool, &new).await {
            Ok(row) => Ok(row.into()),
            Err(e) if is_unique_violation(&e) => Err(BookingError::Conflict(
                "username or email is already registered".to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<User>> {
        Ok(user::get_user_by_id(&self.pool, id).await?.map(User::from))
    }

    async fn find_by_login(&self, login: &str) -> BookingResult<Option<User>> {
        Ok(user::get_user_by_login(&self.pool, login)
            .await?
            .map(User::from))
    }

    async fn exists(&self, username: &str, email: &str) -> BookingResult<bool> {
        Ok(user::user_exists(&self.pool, username, email).await?)
    }

    async fn mark_verified(&self, id: Uuid) -> BookingResult<Option<User>> {
        Ok(user::mark_user_verified(&self.pool, id).await?.map(User::from))
    }
}

#[async_trait]
impl ContactStore for PgStore {
    async fn insert(&self, request: &ContactRequest) -> BookingResult<()> {
        Ok(contact::create_contact_request(&self.pool, request).await?)
    }

    async fn list(&self, limit: i64) -> BookingResult<Vec<ContactRequest>> {
        let rows = contact::get_contact_requests(&self.pool, limit).await?;
        Ok(rows.into_iter().map(ContactRequest::from).collect())
    }
}

#[async_trait]
impl StatusStore for PgStore {
    async fn insert(&self, check: &StatusCheck) -> BookingResult<()> {
        Ok(status::create_status_check(&self.pool, check).await?)
    }

    async fn list(&self, limit: i64) -> BookingResult<Vec<StatusCheck>> {
        let rows = status::get_status_checks(&self.pool, limit).await?;
        Ok(rows.into_iter().map(StatusCheck::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_reports_are_not_unique_violations() {
        let report = eyre::eyre!("connection reset");
        assert!(!is_unique_violation(&report));
    }

    #[test]
    fn row_not_found_is_not_a_unique_violation() {
        let report = Report::from(sqlx::Error::RowNotFound);
        assert!(!is_unique_violation(&report));
    }
}
