use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::format::hhmm;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Rejected,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Rejected => "rejected",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the appointment still holds its slot.
    pub fn occupies_slot(self) -> bool {
        self != AppointmentStatus::Cancelled
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(AppointmentStatus::Pending),
            "confirmed" => Ok(AppointmentStatus::Confirmed),
            "rejected" => Ok(AppointmentStatus::Rejected),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            other => Err(format!("unknown appointment status '{other}'")),
        }
    }
}

/// A booked slot.
///
/// `user_name`, `agency_name` and `user_email` are copied from the account when
/// the booking is admitted and are not refreshed if the account changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub agency_name: String,
    pub user_email: String,
    pub date: NaiveDate,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub duration_minutes: i32,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAvailability {
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub date: NaiveDate,
    pub slots: Vec<SlotAvailability>,
}

/// Body returned by the confirm/reject links.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentActionResponse {
    pub id: Uuid,
    pub status: AppointmentStatus,
    pub message: String,
}
