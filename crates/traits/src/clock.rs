//! Time source for report footers and "still in the workshop" day counts.

use chrono::{Local, NaiveDate, NaiveDateTime};
use std::fmt::Debug;

pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Midday on the given date. `None` for an invalid date.
    pub fn on(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_opt(12, 0, 0))
            .map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_instant() {
        let clock = FixedClock::on(2025, 3, 15).unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(clock.now().format("%H:%M").to_string(), "12:00");
        assert!(FixedClock::on(2025, 2, 30).is_none());
    }
}
