use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
}

impl ContactRequest {
    /// Stamps a validated submission with an id, a timestamp and status `new`.
    ///
    /// Text fields are stored trimmed, the same way they were validated.
    pub fn from_submission(input: CreateContactRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            phone: input
                .phone
                .as_deref()
                .map(str::trim)
                .filter(|phone| !phone.is_empty())
                .map(str::to_string),
            service: input.service.trim().to_string(),
            message: input.message.trim().to_string(),
            created_at: Utc::now(),
            status: "new".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub service: String,
    pub message: String,
}

impl CreateContactRequest {
    pub fn validate(&self) -> BookingResult<()> {
        let name_len = self.name.trim().chars().count();
        if !(2..=100).contains(&name_len) {
            return Err(BookingError::InvalidInput(
                "Name must be between 2 and 100 characters".to_string(),
            ));
        }

        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') || email.chars().count() > 255 {
            return Err(BookingError::InvalidInput(
                "A valid email address is required".to_string(),
            ));
        }

        if let Some(phone) = &self.phone {
            if phone.trim().chars().count() > 20 {
                return Err(BookingError::InvalidInput(
                    "Phone number must be at most 20 characters".to_string(),
                ));
            }
        }

        let service_len = self.service.trim().chars().count();
        if service_len == 0 {
            return Err(BookingError::InvalidInput("Service is required".to_string()));
        }
        if service_len > 255 {
            return Err(BookingError::InvalidInput(
                "Service must be at most 255 characters".to_string(),
            ));
        }

        let message_len = self.message.trim().chars().count();
        if !(10..=2000).contains(&message_len) {
            return Err(BookingError::InvalidInput(
                "Message must be between 10 and 2000 characters".to_string(),
            ));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub id: Option<Uuid>,
}
