use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A member's booking count for the day of their last booking.
///
/// The count only means anything for `last_booked_on`; on any later day
/// the member starts again from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingUsage {
    pub loads_booked: u32,
    pub last_booked_on: Option<NaiveDate>,
}

impl BookingUsage {
    pub fn new(loads_booked: u32, last_booked_on: Option<NaiveDate>) -> Self {
        BookingUsage {
            loads_booked,
            last_booked_on,
        }
    }

    /// Loads booked on `today`.
    pub fn loads_on(&self, today: NaiveDate) -> u32 {
        match self.last_booked_on {
            Some(day) if day < today => 0,
            _ => self.loads_booked,
        }
    }

    /// Usage after one more booking on `today`.
    pub fn record_booking(&self, today: NaiveDate) -> Self {
        BookingUsage {
            loads_booked: self.loads_on(today).saturating_add(1),
            last_booked_on: Some(today),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_count_carries_within_the_day() {
        let usage = BookingUsage::new(2, Some(day(10)));
        assert_eq!(usage.loads_on(day(10)), 2);
        assert_eq!(usage.record_booking(day(10)), BookingUsage::new(3, Some(day(10))));
    }

    #[test]
    fn test_count_resets_on_a_new_day() {
        let usage = BookingUsage::new(3, Some(day(10)));
        assert_eq!(usage.loads_on(day(11)), 0);
        assert_eq!(usage.record_booking(day(11)), BookingUsage::new(1, Some(day(11))));
    }

    #[test]
    fn test_unknown_day_keeps_reported_count() {
        let usage = BookingUsage::new(1, None);
        assert_eq!(usage.loads_on(day(1)), 1);
        assert_eq!(BookingUsage::default().record_booking(day(1)).loads_booked, 1);
    }
}
