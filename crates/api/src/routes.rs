pub mod appointments;
pub mod auth;
pub mod availability;
pub mod contact;
pub mod health;
pub mod status;
