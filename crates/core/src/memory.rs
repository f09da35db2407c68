//! In-process implementations of the storage traits.
//!
//! Each store keeps its records behind a single `RwLock`, so a check and the
//! write that depends on it happen under one write guard.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    errors::{BookingError, BookingResult},
    models::{
        appointment::{Appointment, AppointmentStatus},
        contact::ContactRequest,
        status::StatusCheck,
        user::{NewUser, User},
    },
    store::{AppointmentStore, ContactStore, StatusStore, UserStore, check_user_block},
};

#[derive(Debug, Default)]
pub struct MemoryAppointmentStore {
    appointments: RwLock<HashMap<Uuid, Appointment>>,
}

impl MemoryAppointmentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AppointmentStore for MemoryAppointmentStore {
    async fn active_on_date(&self, date: NaiveDate) -> BookingResult<Vec<Appointment>> {
        let appointments = self.appointments.read().await;
        let mut found: Vec<Appointment> = appointments
            .values()
            .filter(|a| a.date == date && a.status.occupies_slot())
            .cloned()
            .collect();
        found.sort_by_key(|a| a.time);
        Ok(found)
    }

    async fn insert(
        &self,
        appointment: &Appointment,
        neighbours: &[NaiveTime],
    ) -> BookingResult<Appointment> {
        let mut appointments = self.appointments.write().await;
        if appointment.status.occupies_slot() {
            let taken = appointments.values().any(|a| {
                a.date == appointment.date
                    && a.time == appointment.time
                    && a.status.occupies_slot()
            });
            if taken {
                return Err(BookingError::SlotConflict(format!(
                    "{} at {} is already booked",
                    appointment.date,
                    appointment.time.format("%H:%M")
                )));
            }

            let held: Vec<NaiveTime> = appointments
                .values()
                .filter(|a| {
                    a.user_id == appointment.user_id
                        && a.date == appointment.date
                        && a.status.occupies_slot()
                })
                .map(|a| a.time)
                .collect();
            check_user_block(&held, appointment, neighbours)?;
        }
        appointments.insert(appointment.id, appointment.clone());
        Ok(appointment.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<Appointment>> {
        Ok(self.appointments.read().await.get(&id).cloned())
    }

    async fn list_active_for_user(&self, user_id: Uuid) -> BookingResult<Vec<Appointment>> {
        let appointments = self.appointments.read().await;
        let mut found: Vec<Appointment> = appointments
            .values()
            .filter(|a| a.user_id == user_id && a.status.occupies_slot())
            .cloned()
            .collect();
        found.sort_by_key(|a| (a.date, a.time));
        Ok(found)
    }

    async fn transition(
        &self,
        id: Uuid,
        from: &[AppointmentStatus],
        to: AppointmentStatus,
    ) -> BookingResult<Option<Appointment>> {
        let mut appointments = self.appointments.write().await;
        match appointments.get_mut(&id) {
            Some(appointment) if from.contains(&appointment.status) => {
                appointment.status = to;
                Ok(Some(appointment.clone()))
            }
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: NewUser) -> BookingResult<User> {
        let mut users = self.users.write().await;
        let taken = users
            .values()
            .any(|u| u.username == user.username || u.email.eq_ignore_ascii_case(&user.email));
        if taken {
            return Err(BookingError::Conflict(
                "Username or email already registered".to_string(),
            ));
        }

        let created = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            first_name: user.first_name,
            last_name: user.last_name,
            agency_name: user.agency_name,
            verified: false,
            created_at: Utc::now(),
        };
        users.insert(created.id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> BookingResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_login(&self, login: &str) -> BookingResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == login || u.email.eq_ignore_ascii_case(login))
            .cloned())
    }

    async fn exists(&self, username: &str, email: &str) -> BookingResult<bool> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .any(|u| u.username == username || u.email.eq_ignore_ascii_case(email)))
    }

    async fn mark_verified(&self, id: Uuid) -> BookingResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.get_mut(&id).map(|user| {
            user.verified = true;
            user.clone()
        }))
    }
}

#[derive(Debug, Default)]
pub struct MemoryContactStore {
    contacts: RwLock<Vec<ContactRequest>>,
}

impl MemoryContactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn insert(&self, contact: &ContactRequest) -> BookingResult<()> {
        self.contacts.write().await.push(contact.clone());
        Ok(())
    }

    async fn list(&self, limit: i64) -> BookingResult<Vec<ContactRequest>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.contacts.read().await.iter().take(limit).cloned().collect())
    }
}

#[derive(Debug, Default)]
pub struct MemoryStatusStore {
    checks: RwLock<Vec<StatusCheck>>,
}

impl MemoryStatusStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StatusStore for MemoryStatusStore {
    async fn insert(&self, check: &StatusCheck) -> BookingResult<()> {
        self.checks.write().await.push(check.clone());
        Ok(())
    }

    async fn list(&self, limit: i64) -> BookingResult<Vec<StatusCheck>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self.checks.read().await.iter().take(limit).cloned().collect())
    }
}
