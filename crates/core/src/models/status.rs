use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCheck {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl StatusCheck {
    pub fn new(client_name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            client_name: client_name.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStatusCheckRequest {
    pub client_name: String,
}
