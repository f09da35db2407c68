//! # Slot Catalog
//!
//! The fixed daily grid of bookable start times. The grid is never stored;
//! it is recomputed from the business hours and slot length whenever it is
//! needed.

use chrono::{Duration, NaiveTime};

use crate::config::BookingConfig;

/// Walks from `business_start` in steps of `slot_duration` and keeps every
/// start whose slot ends no later than `business_end`.
///
/// A non-positive duration produces an empty grid, and the walk never wraps
/// past midnight.
///
/// # Example
///
/// ```
/// use chrono::{Duration, NaiveTime};
/// use slotdesk_core::slots::generate_slots;
///
/// let start = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
/// let end = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
/// let slots = generate_slots(start, end, Duration::minutes(45));
///
/// assert_eq!(slots.len(), 12);
/// assert_eq!(slots[11], NaiveTime::from_hms_opt(17, 15, 0).unwrap());
/// ```
pub fn generate_slots(
    business_start: NaiveTime,
    business_end: NaiveTime,
    slot_duration: Duration,
) -> Vec<NaiveTime> {
    let mut slots = Vec::new();
    if slot_duration <= Duration::zero() {
        return slots;
    }

    let mut current = business_start;
    while current < business_end {
        let (slot_end, wrapped) = current.overflowing_add_signed(slot_duration);
        // Every later slot would end even further out, so stop at the first misfit.
        if wrapped != 0 || slot_end > business_end {
            break;
        }
        slots.push(current);
        current = slot_end;
    }

    slots
}

/// Position of `time` within the catalog, if it is a slot start.
pub fn slot_index(catalog: &[NaiveTime], time: NaiveTime) -> Option<usize> {
    catalog.iter().position(|slot| *slot == time)
}

/// Catalog for the configured business hours.
pub fn catalog_for(config: &BookingConfig) -> Vec<NaiveTime> {
    generate_slots(
        config.business_start,
        config.business_end,
        config.slot_duration,
    )
}
