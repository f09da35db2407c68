//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the SlotDesk API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! Server:
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Request timeout (default: 30)
//!
//! Authentication:
//!
//! - `JWT_SECRET`: Secret key for signing bearer and verification tokens (required)
//! - `TOKEN_TTL_HOURS`: Bearer token lifetime (default: 24)
//!
//! Booking rules:
//!
//! - `BUSINESS_START` / `BUSINESS_END`: Working day bounds as `HH:MM` (default: 09:00 / 18:00)
//! - `SLOT_MINUTES`: Slot length (default: 45)
//! - `LEAD_TIME_HOURS`: Minimum notice for a booking (default: 24)
//!
//! Notices:
//!
//! - `ADMIN_EMAIL`: Mailbox that receives booking requests
//! - `PUBLIC_BASE_URL`: Base for links in notices (default: "http://localhost:3000")
//! - `VENUE_ADDRESS`, `CONTACT_PHONE`: Included in confirmation notices
//! - `MAIL_WEBHOOK_URL`: Mail relay endpoint; notices are only logged when unset

use chrono::{Duration, NaiveTime};
use eyre::{Result, WrapErr, eyre};
use slotdesk_core::config::{BookingConfig, NoticeConfig};
use std::env;
use tracing::Level;

/// Configuration for the SlotDesk API server
///
/// # Example
///
/// ```no_run
/// use eyre::Result;
/// use slotdesk_api::config::ApiConfig;
///
/// fn example() -> Result<()> {
///     let config = ApiConfig::from_env()?;
///     println!("Starting server on {}", config.server_addr());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Secret used to sign and verify tokens
    pub jwt_secret: String,

    /// Bearer token lifetime in hours
    pub token_ttl_hours: i64,

    /// Request timeout in seconds
    pub request_timeout: u64,

    pub business_start: NaiveTime,
    pub business_end: NaiveTime,
    pub slot_minutes: i64,
    pub lead_time_hours: i64,

    pub admin_email: String,
    pub public_base_url: String,
    pub venue_address: String,
    pub contact_phone: String,

    /// Mail relay endpoint (optional)
    pub mail_webhook_url: Option<String>,
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_clock(key: &str, default: &str) -> Result<NaiveTime> {
    let raw = var_or(key, default);
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .wrap_err_with(|| format!("Invalid {key} value '{raw}', expected HH:MM"))
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - `DATABASE_URL` or `JWT_SECRET` is not set
    /// - A numeric or `HH:MM` value cannot be parsed
    /// - The business day bounds or slot length are inconsistent
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = var_or("API_HOST", "0.0.0.0");
        let port = var_or("API_PORT", "3000")
            .parse()
            .wrap_err("Invalid API_PORT value")?;

        // Database settings
        let database_url =
            env::var("DATABASE_URL").wrap_err("DATABASE_URL environment variable must be set")?;

        // Logging settings
        let log_level = match var_or("LOG_LEVEL", "info").as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS")
            .ok()
            .map(|origins| origins.split(',').map(|s| s.trim().to_string()).collect());

        // Security settings
        let jwt_secret =
            env::var("JWT_SECRET").wrap_err("JWT_SECRET environment variable must be set")?;
        let token_ttl_hours = var_or("TOKEN_TTL_HOURS", "24")
            .parse()
            .wrap_err("Invalid TOKEN_TTL_HOURS value")?;

        // Performance settings
        let request_timeout = var_or("API_REQUEST_TIMEOUT_SECONDS", "30")
            .parse()
            .unwrap_or(30);

        // Booking rules
        let business_start = parse_clock("BUSINESS_START", "09:00")?;
        let business_end = parse_clock("BUSINESS_END", "18:00")?;
        let slot_minutes = var_or("SLOT_MINUTES", "45")
            .parse()
            .wrap_err("Invalid SLOT_MINUTES value")?;
        let lead_time_hours = var_or("LEAD_TIME_HOURS", "24")
            .parse()
            .wrap_err("Invalid LEAD_TIME_HOURS value")?;

        // Notices
        let admin_email = var_or("ADMIN_EMAIL", "admin@localhost");
        let public_base_url = var_or("PUBLIC_BASE_URL", "http://localhost:3000");
        let venue_address = var_or("VENUE_ADDRESS", "");
        let contact_phone = var_or("CONTACT_PHONE", "");
        let mail_webhook_url = env::var("MAIL_WEBHOOK_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let config = Self {
            host,
            port,
            database_url,
            log_level,
            cors_origins,
            jwt_secret,
            token_ttl_hours,
            request_timeout,
            business_start,
            business_end,
            slot_minutes,
            lead_time_hours,
            admin_email,
            public_base_url,
            venue_address,
            contact_phone,
            mail_webhook_url,
        };
        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.business_start >= self.business_end {
            return Err(eyre!("BUSINESS_START must be before BUSINESS_END"));
        }
        if self.slot_minutes <= 0 {
            return Err(eyre!("SLOT_MINUTES must be positive"));
        }
        if self.lead_time_hours < 0 {
            return Err(eyre!("LEAD_TIME_HOURS must not be negative"));
        }
        if self.token_ttl_hours <= 0 {
            return Err(eyre!("TOKEN_TTL_HOURS must be positive"));
        }
        Ok(())
    }

    /// Returns the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn booking_config(&self) -> BookingConfig {
        BookingConfig::new(
            self.business_start,
            self.business_end,
            Duration::minutes(self.slot_minutes),
            Duration::hours(self.lead_time_hours),
        )
    }

    pub fn notice_config(&self) -> NoticeConfig {
        NoticeConfig {
            admin_email: self.admin_email.clone(),
            public_base_url: self.public_base_url.clone(),
            venue_address: self.venue_address.clone(),
            contact_phone: self.contact_phone.clone(),
            ..NoticeConfig::default()
        }
    }

    pub fn token_ttl(&self) -> Duration {
        Duration::hours(self.token_ttl_hours)
    }
}
