use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BookingError, BookingResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub agency_name: String,
    pub verified: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Account fields supplied at registration, password already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub agency_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub agency_name: String,
}

impl RegisterRequest {
    pub fn validate(&self) -> BookingResult<()> {
        let username_len = self.username.chars().count();
        if !(3..=50).contains(&username_len)
            || !self
                .username
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        {
            return Err(BookingError::InvalidInput(
                "Username must be 3 to 50 letters, digits, '.', '_' or '-'".to_string(),
            ));
        }

        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') || email.chars().count() > 255 {
            return Err(BookingError::InvalidInput(
                "A valid email address is required".to_string(),
            ));
        }

        if self.password.chars().count() < 8 {
            return Err(BookingError::InvalidInput(
                "Password must be at least 8 characters".to_string(),
            ));
        }

        for (field, value, max) in [
            ("First name", &self.first_name, 100),
            ("Last name", &self.last_name, 100),
            ("Agency name", &self.agency_name, 255),
        ] {
            let len = value.trim().chars().count();
            if len == 0 {
                return Err(BookingError::InvalidInput(format!("{field} is required")));
            }
            if len > max {
                return Err(BookingError::InvalidInput(format!(
                    "{field} must be at most {max} characters"
                )));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub verified: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Username or email address
    pub login: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: UserProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub agency_name: String,
    pub verified: bool,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            agency_name: user.agency_name.clone(),
            verified: user.verified,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyAccountResponse {
    pub id: Uuid,
    pub verified: bool,
    pub message: String,
}
