pub mod appointment;
pub mod contact;
pub mod status;
pub mod user;
