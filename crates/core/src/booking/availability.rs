use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use tracing::debug;

use super::BookingService;
use crate::{
    errors::{BookingError, BookingResult},
    format::parse_date,
    models::appointment::SlotAvailability,
};

/// Monday to Friday.
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl BookingService {
    /// Availability grid for a `YYYY-MM-DD` date as seen at `now`.
    ///
    /// Past dates are rejected, weekends yield an empty grid, and a slot is
    /// available when nobody holds it and it starts at least one lead time
    /// after `now`.
    pub async fn availability(
        &self,
        raw_date: &str,
        now: NaiveDateTime,
    ) -> BookingResult<Vec<SlotAvailability>> {
        let date = parse_date(raw_date)?;
        self.availability_on(date, now).await
    }

    pub async fn availability_on(
        &self,
        date: NaiveDate,
        now: NaiveDateTime,
    ) -> BookingResult<Vec<SlotAvailability>> {
        if date < now.date() {
            return Err(BookingError::InvalidInput(format!(
                "Cannot check availability for past date {date}"
            )));
        }

        if !is_business_day(date) {
            debug!("{date} is not a business day, no slots offered");
            return Ok(Vec::new());
        }

        let booked: HashSet<NaiveTime> = self
            .store
            .active_on_date(date)
            .await?
            .into_iter()
            .map(|appointment| appointment.time)
            .collect();
        let threshold = self.earliest_bookable(now);

        Ok(self
            .catalog
            .iter()
            .map(|&time| SlotAvailability {
                time,
                available: !booked.contains(&time) && date.and_time(time) >= threshold,
            })
            .collect())
    }
}
