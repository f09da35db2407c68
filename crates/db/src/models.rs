use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use eyre::{Report, eyre};
use serde::{Deserialize, Serialize};
use slotdesk_core::models::{
    appointment::{Appointment, AppointmentStatus},
    contact::ContactRequest,
    status::StatusCheck,
    user::User,
};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub agency_name: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        Self {
            id: row.id,
            username: row.username,
            email: row.email,
            password_hash: row.password_hash,
            first_name: row.first_name,
            last_name: row.last_name,
            agency_name: row.agency_name,
            verified: row.verified,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAppointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub agency_name: String,
    pub user_email: String,
    pub slot_date: NaiveDate,
    pub slot_time: NaiveTime,
    pub duration_minutes: i32,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbAppointment> for Appointment {
    type Error = Report;

    fn try_from(row: DbAppointment) -> Result<Self, Self::Error> {
        let status: AppointmentStatus = row
            .status
            .parse()
            .map_err(|e| eyre!("Appointment {} has a corrupt status: {}", row.id, e))?;

        Ok(Self {
            id: row.id,
            user_id: row.user_id,
            user_name: row.user_name,
            agency_name: row.agency_name,
            user_email: row.user_email,
            date: row.slot_date,
            time: row.slot_time,
            duration_minutes: row.duration_minutes,
            notes: row.notes,
            status,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbContactRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

impl From<DbContactRequest> for ContactRequest {
    fn from(row: DbContactRequest) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            service: row.service,
            message: row.message,
            created_at: row.created_at,
            status: row.status,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub checked_at: DateTime<Utc>,
}

impl From<DbStatusCheck> for StatusCheck {
    fn from(row: DbStatusCheck) -> Self {
        Self {
            id: row.id,
            client_name: row.client_name,
            timestamp: row.checked_at,
        }
    }
}
