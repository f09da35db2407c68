//! # Booking engine
//!
//! [`BookingService`] owns the slot catalog and the rules that decide which
//! slots are offered and which requests are admitted:
//!
//! - `availability`: per-date (time, available) grid
//! - `admission`: validation pipeline for new bookings
//! - `lifecycle`: confirm, reject and cancel transitions
//!
//! The service holds no booking state; every decision is re-derived from the
//! [`AppointmentStore`] at call time, and `now` is always supplied by the caller.

mod admission;
mod availability;
mod lifecycle;

pub use admission::check_adjacency;
pub use availability::is_business_day;

use std::sync::Arc;

use chrono::{NaiveDateTime, NaiveTime};

use crate::{
    config::BookingConfig,
    notify::{NoticeComposer, NotificationDispatcher},
    slots::catalog_for,
    store::AppointmentStore,
};

pub struct BookingService {
    config: BookingConfig,
    catalog: Vec<NaiveTime>,
    store: Arc<dyn AppointmentStore>,
    dispatcher: NotificationDispatcher,
    composer: NoticeComposer,
}

impl BookingService {
    pub fn new(
        config: BookingConfig,
        store: Arc<dyn AppointmentStore>,
        dispatcher: NotificationDispatcher,
        composer: NoticeComposer,
    ) -> Self {
        let catalog = catalog_for(&config);
        Self {
            config,
            catalog,
            store,
            dispatcher,
            composer,
        }
    }

    pub fn config(&self) -> &BookingConfig {
        &self.config
    }

    pub fn catalog(&self) -> &[NaiveTime] {
        &self.catalog
    }

    /// Earliest slot start that still respects the lead time.
    fn earliest_bookable(&self, now: NaiveDateTime) -> NaiveDateTime {
        now.checked_add_signed(self.config.lead_time)
            .unwrap_or(NaiveDateTime::MAX)
    }
}
