use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use num_integer::Integer;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

use crate::gregorian_normalized_date::GregorianNormalizedDate;

const GREGORIAN_MONTH_LENGTHS_NON_LEAP_YEAR: [u8; 12] =
    [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub fn is_leap_year(year: i32) -> bool {
    // Get offset into cycle first so we can do this with smaller integers.
    let year = year.mod_floor(&400) as u16;
    year % 4 == 0 && (year % 100 != 0 || year == 0)
}

pub fn days_in_month(year: i32, month: u8) -> u8 {
    assert!((1..=12).contains(&month), "Month must be in range 1-12");
    if month == 2 && is_leap_year(year) {
        29
    } else {
        GREGORIAN_MONTH_LENGTHS_NON_LEAP_YEAR[(month - 1) as usize]
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidDate {
    #[error("month {0} is not in range 1-12")]
    Month(u8),
    #[error("day {day} does not exist in {year:04}-{month:02}")]
    Day { year: i32, month: u8, day: u8 },
    #[error("time {hour:02}:{minute:02}:{second:02} is not a valid time of day")]
    Time { hour: u8, minute: u8, second: u8 },
    #[error("cannot parse {0:?} as YYYY-MM-DD")]
    Syntax(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    fn from_monday_index(index: u8) -> Self {
        match index {
            0 => Weekday::Monday,
            1 => Weekday::Tuesday,
            2 => Weekday::Wednesday,
            3 => Weekday::Thursday,
            4 => Weekday::Friday,
            5 => Weekday::Saturday,
            _ => Weekday::Sunday,
        }
    }
}

/// A day in the proleptic Gregorian calendar, with no time of day attached.
///
/// Day numbers used by [`Date::days_since_epoch`] count from 2000-01-01, the civil day on
/// which the J2000 epoch falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date {
    year: i32,
    month: u8,
    day: u8,
}

impl Date {
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, InvalidDate> {
        if !(1..=12).contains(&month) {
            return Err(InvalidDate::Month(month));
        }
        if day == 0 || day > days_in_month(year, month) {
            return Err(InvalidDate::Day { year, month, day });
        }
        Ok(Date { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn from_days_since_epoch(days: i64) -> Self {
        let (year, month, day) = GregorianNormalizedDate::from_day(days).to_date();
        Date {
            year: year as i32,
            month,
            day,
        }
    }

    pub fn days_since_epoch(&self) -> i64 {
        GregorianNormalizedDate::from_date(self.year as i64, self.month, self.day).to_day()
    }

    pub fn weekday(&self) -> Weekday {
        // 2000-01-01 was a Saturday.
        let index = (self.days_since_epoch() + 5).mod_floor(&7);
        Weekday::from_monday_index(index as u8)
    }

    pub fn add_days(&self, days: i64) -> Self {
        Date::from_days_since_epoch(self.days_since_epoch() + days)
    }

    /// First date on or after `self` that falls on `weekday`.
    pub fn next_weekday(&self, weekday: Weekday) -> Self {
        let from = self.weekday() as i64;
        let to = weekday as i64;
        self.add_days((to - from).mod_floor(&7))
    }

    /// `DD/MM`, the form used in comparison reports.
    pub fn day_month(&self) -> String {
        format!("{:02}/{:02}", self.day, self.month)
    }
}

impl Sub for Date {
    type Output = i64;

    /// Whole days from `rhs` to `self`.
    fn sub(self, rhs: Self) -> Self::Output {
        self.days_since_epoch() - rhs.days_since_epoch()
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for Date {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let syntax = || InvalidDate::Syntax(s.to_string());
        // A leading minus belongs to the year, so split from the right.
        let mut parts = s.rsplitn(3, '-');
        let day = parts.next().ok_or_else(syntax)?;
        let month = parts.next().ok_or_else(syntax)?;
        let year = parts.next().ok_or_else(syntax)?;
        let year: i32 = year.parse().map_err(|_| syntax())?;
        let month: u8 = month.parse().map_err(|_| syntax())?;
        let day: u8 = day.parse().map_err(|_| syntax())?;
        Date::new(year, month, day)
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Date {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
