//! Booking rules and notification settings.
//!
//! Both structures are plain values handed to [`crate::booking::BookingService`]
//! at construction so that tests can run the engine against any business-hours
//! grid without touching the environment.

use chrono::{Duration, NaiveTime};

/// Parameters of the daily slot grid and the admission rules.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// First bookable start time of the day
    pub business_start: NaiveTime,

    /// Closing time; no slot may end after it
    pub business_end: NaiveTime,

    /// Length of every appointment
    pub slot_duration: Duration,

    /// Minimum interval between the booking instant and the slot start
    pub lead_time: Duration,
}

impl BookingConfig {
    pub fn new(
        business_start: NaiveTime,
        business_end: NaiveTime,
        slot_duration: Duration,
        lead_time: Duration,
    ) -> Self {
        Self {
            business_start,
            business_end,
            slot_duration,
            lead_time,
        }
    }

    /// Slot length in whole minutes, as stored on appointments.
    pub fn slot_minutes(&self) -> i32 {
        i32::try_from(self.slot_duration.num_minutes()).unwrap_or(i32::MAX)
    }
}

impl Default for BookingConfig {
    /// 09:00 to 18:00, 45 minute slots, 24 hour lead time.
    fn default() -> Self {
        Self {
            business_start: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            business_end: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or(NaiveTime::MIN),
            slot_duration: Duration::minutes(45),
            lead_time: Duration::hours(24),
        }
    }
}

/// Addresses and wording baked into outbound notices.
#[derive(Debug, Clone)]
pub struct NoticeConfig {
    /// Mailbox that receives new booking requests
    pub admin_email: String,

    /// Public base URL used to build confirm/reject/verify links
    pub public_base_url: String,

    /// Where the appointment takes place
    pub venue_address: String,

    /// Phone number clients can call about their appointment
    pub contact_phone: String,

    /// Display name used in greetings and signatures
    pub service_name: String,
}

impl NoticeConfig {
    /// Builds an absolute link under the public `/api` prefix.
    pub fn link(&self, path: &str) -> String {
        format!(
            "{}/api{}",
            self.public_base_url.trim_end_matches('/'),
            path
        )
    }
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@localhost".to_string(),
            public_base_url: "http://localhost:3000".to_string(),
            venue_address: String::new(),
            contact_phone: String::new(),
            service_name: "SlotDesk".to_string(),
        }
    }
}
