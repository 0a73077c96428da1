use super::domain::PICKUP_WINDOW_DAYS;
use super::locale::OrderLocale;
use chrono::{Duration, FixedOffset, Local, NaiveDate, Utc};
use std::fmt;
use std::sync::{Mutex, PoisonError};

/// Source of "today" for pickup-date generation.
pub trait Clock: Send + Sync + fmt::Debug {
    fn today(&self) -> NaiveDate;
}

/// Calendar date in the process's local timezone.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Calendar date at a fixed UTC offset, independent of the host timezone.
#[derive(Debug, Clone, Copy)]
pub struct OffsetClock {
    offset: FixedOffset,
}

impl OffsetClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for OffsetClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    today: Mutex<NaiveDate>,
}

impl ManualClock {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today: Mutex::new(today),
        }
    }

    pub fn set(&self, today: NaiveDate) {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner) = today;
    }

    pub fn advance_days(&self, days: i64) {
        let mut guard = self.today.lock().unwrap_or_else(PoisonError::into_inner);
        *guard += Duration::days(days);
    }
}

impl Clock for ManualClock {
    fn today(&self) -> NaiveDate {
        *self.today.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Consecutive pickup days starting at `today`.
pub fn pickup_dates(today: NaiveDate) -> Vec<NaiveDate> {
    today.iter_days().take(PICKUP_WINDOW_DAYS).collect()
}

pub fn pickup_labels(today: NaiveDate, locale: &OrderLocale) -> Vec<String> {
    pickup_dates(today)
        .into_iter()
        .map(|date| locale.format_date(date))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date")
    }

    #[test]
    fn pickup_labels_cover_four_consecutive_days() {
        let labels = pickup_labels(monday(), &OrderLocale::en_us());
        assert_eq!(labels, vec!["Mon Jan 5", "Tue Jan 6", "Wed Jan 7", "Thu Jan 8"]);
    }

    #[test]
    fn pickup_dates_roll_over_month_and_year() {
        let new_years_eve = NaiveDate::from_ymd_opt(2025, 12, 30).expect("valid date");
        let dates = pickup_dates(new_years_eve);
        assert_eq!(dates.len(), PICKUP_WINDOW_DAYS);
        assert_eq!(
            dates.last().copied(),
            NaiveDate::from_ymd_opt(2026, 1, 2)
        );
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], Duration::days(1));
        }
    }

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(monday());
        clock.advance_days(2);
        assert_eq!(clock.today(), monday() + Duration::days(2));
        clock.set(monday());
        assert_eq!(clock.today(), monday());
    }
}
