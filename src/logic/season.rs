use crate::models::Season;
use chrono::{Datelike, NaiveDate};

/// Maps calendar dates onto sowing seasons.
///
/// - Rabi: October through March
/// - Kharif: June through September
/// - Zaid: April and May
pub struct SeasonCalendar;

impl SeasonCalendar {
    pub fn resolve(date: NaiveDate) -> Season {
        Self::for_month(date.month())
    }

    pub fn for_month(month: u32) -> Season {
        match month {
            6..=9 => Season::Kharif,
            4 | 5 => Season::Zaid,
            _ => Season::Rabi,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(month: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, month, 15).unwrap()
    }

    #[test]
    fn winter_months_are_rabi() {
        for month in [10, 11, 12, 1, 2, 3] {
            assert_eq!(SeasonCalendar::resolve(date(month)), Season::Rabi);
        }
    }

    #[test]
    fn monsoon_months_are_kharif() {
        for month in 6..=9 {
            assert_eq!(SeasonCalendar::resolve(date(month)), Season::Kharif);
        }
    }

    #[test]
    fn april_and_may_are_zaid() {
        assert_eq!(SeasonCalendar::resolve(date(4)), Season::Zaid);
        assert_eq!(SeasonCalendar::resolve(date(5)), Season::Zaid);
    }

    #[test]
    fn boundaries() {
        let last_of_march = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
        let first_of_april = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        assert_eq!(SeasonCalendar::resolve(last_of_march), Season::Rabi);
        assert_eq!(SeasonCalendar::resolve(first_of_april), Season::Zaid);
    }
}
