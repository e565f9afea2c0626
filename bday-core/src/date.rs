//! Calendar date values for birthdays.
//!
//! All date math works on whole calendar days (`NaiveDate`), never on
//! 24-hour durations, so "days until" does not drift around midnight or
//! daylight-saving changes.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::error::BdayError;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Today's date in the local timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse YYYY-MM-DD (a trailing `T...` time part is ignored).
pub fn parse_date(s: &str) -> Result<NaiveDate, BdayError> {
    let trimmed = s.trim();
    let date_part = trimmed.split_once('T').map_or(trimmed, |(date, _)| date);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| BdayError::InvalidDate(s.to_string()))
}

/// A birth date: a calendar date with no time component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BirthDate(NaiveDate);

impl BirthDate {
    pub fn new(date: NaiveDate) -> Self {
        BirthDate(date)
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(BirthDate)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn month_day(&self) -> MonthDay {
        MonthDay {
            month: self.0.month(),
            day: self.0.day(),
        }
    }

    pub fn is_after(&self, today: NaiveDate) -> bool {
        self.0 > today
    }

    /// The anniversary in the given year.
    ///
    /// February 29 falls on March 1 in non-leap years.
    pub fn anniversary_in(&self, year: i32) -> NaiveDate {
        self.0
            .with_year(year)
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
            .unwrap_or(NaiveDate::MAX)
    }

    /// The next anniversary on or after `today`.
    pub fn next_anniversary(&self, today: NaiveDate) -> NaiveDate {
        let this_year = self.anniversary_in(today.year());
        if this_year < today {
            self.anniversary_in(today.year() + 1)
        } else {
            this_year
        }
    }

    /// Whole calendar days from `today` to the next anniversary (0 on the day).
    pub fn days_until(&self, today: NaiveDate) -> i64 {
        (self.next_anniversary(today) - today).num_days()
    }

    /// Completed years on `today`.
    pub fn age_on(&self, today: NaiveDate) -> i32 {
        let years = today.year() - self.0.year();
        if (today.month(), today.day()) < (self.0.month(), self.0.day()) {
            years - 1
        } else {
            years
        }
    }

    /// Long human form, e.g. "April 15, 1990".
    pub fn long_format(&self) -> String {
        self.0.format("%B %-d, %Y").to_string()
    }
}

impl FromStr for BirthDate {
    type Err = BdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_date(s).map(BirthDate)
    }
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_FORMAT))
    }
}

impl From<NaiveDate> for BirthDate {
    fn from(date: NaiveDate) -> Self {
        BirthDate(date)
    }
}

/// Month and day of a birth date, formatted as MM-DD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl FromStr for MonthDay {
    type Err = BdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BdayError::InvalidDate(s.to_string());
        let (month, day) = s.trim().split_once('-').ok_or_else(invalid)?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        let day: u32 = day.parse().map_err(|_| invalid())?;

        // 2000 is a leap year, so Feb 29 is accepted
        NaiveDate::from_ymd_opt(2000, month, day).ok_or_else(invalid)?;
        Ok(MonthDay { month, day })
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}", self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn birth(s: &str) -> BirthDate {
        s.parse().unwrap()
    }

    #[test]
    fn parses_plain_and_timestamped_dates() {
        assert_eq!(birth("1990-04-15").to_string(), "1990-04-15");
        assert_eq!(birth(" 1990-04-15 ").to_string(), "1990-04-15");
        assert_eq!(birth("1990-04-15T00:00:00.000Z").to_string(), "1990-04-15");
    }

    #[test]
    fn rejects_malformed_dates() {
        for bad in ["", "04-15", "1990/04/15", "1990-13-01", "1990-02-30", "yesterday"] {
            assert!(
                matches!(bad.parse::<BirthDate>(), Err(BdayError::InvalidDate(_))),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn age_and_days_until_before_birthday() {
        let b = birth("1990-04-15");
        let today = date("2024-04-10");
        assert_eq!(b.age_on(today), 33);
        assert_eq!(b.days_until(today), 5);
    }

    #[test]
    fn anniversary_rolls_to_next_year_once_passed() {
        let b = birth("1990-04-15");
        let today = date("2024-04-20");
        assert_eq!(b.next_anniversary(today), date("2025-04-15"));
        assert_eq!(b.age_on(today), 34);
    }

    #[test]
    fn birthday_today_is_zero_days_away() {
        let b = birth("1990-04-15");
        assert_eq!(b.days_until(date("2024-04-15")), 0);
        assert_eq!(b.next_anniversary(date("2024-04-15")), date("2024-04-15"));
    }

    #[test]
    fn leap_day_birthdays() {
        let b = birth("2000-02-29");
        assert_eq!(b.anniversary_in(2024), date("2024-02-29"));
        assert_eq!(b.anniversary_in(2023), date("2023-03-01"));
        assert_eq!(b.age_on(date("2023-02-28")), 22);
        assert_eq!(b.age_on(date("2023-03-01")), 23);
        assert_eq!(b.days_until(date("2023-02-28")), 1);
    }

    #[test]
    fn age_is_zero_on_birth_date() {
        for s in ["1990-04-15", "2000-02-29", "1985-12-31", "2020-01-01"] {
            let b = birth(s);
            assert_eq!(b.age_on(b.date()), 0, "{s}");
        }
    }

    #[test]
    fn age_ticks_over_on_the_anniversary() {
        let today = date("2024-06-01");
        for s in ["1990-04-15", "2000-02-29", "1985-12-31", "2019-06-01", "1970-06-02"] {
            let b = birth(s);
            let anniversary = b.next_anniversary(today);
            let day_before = anniversary - Duration::days(1);
            assert_eq!(b.age_on(day_before), b.age_on(anniversary) - 1, "{s}");
        }
    }

    #[test]
    fn long_format_matches_display_style() {
        assert_eq!(birth("1990-04-05").long_format(), "April 5, 1990");
    }

    #[test]
    fn month_day_round_trip() {
        let md = birth("1990-04-05").month_day();
        assert_eq!(md.to_string(), "04-05");
        assert_eq!("04-05".parse::<MonthDay>().unwrap(), md);
        assert!("02-29".parse::<MonthDay>().is_ok());
        assert!("02-30".parse::<MonthDay>().is_err());
        assert!("0405".parse::<MonthDay>().is_err());
    }
}
