use std::fmt;
use std::ops::{Add, Sub};

use num_integer::Integer;

use crate::duration::{Duration, SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::gregorian::{Date, InvalidDate};

/// Julian Date of the epoch, 2000-01-01T12:00:00.
pub const J2000_JULIAN_DATE: f64 = 2_451_545.0;

// The epoch is at noon, day numbers start at midnight.
const EPOCH_SECONDS_INTO_DAY: i64 = SECONDS_PER_DAY / 2;

/// A point on the UTC time line, in whole seconds since the J2000 epoch.
///
/// Ephemeris data is indexed by Julian Date; the two are related by the fixed linear map
/// `JD = 2451545.0 + seconds / 86400`.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct Instant {
    seconds: i64,
}

impl Instant {
    pub const J2000: Instant = Instant { seconds: 0 };

    pub const fn from_seconds_since_epoch(seconds: i64) -> Self {
        Instant { seconds }
    }

    pub fn seconds_since_epoch(&self) -> i64 {
        self.seconds
    }

    /// Midnight UTC at the start of `date`.
    pub fn from_date(date: Date) -> Self {
        Instant {
            seconds: date.days_since_epoch() * SECONDS_PER_DAY - EPOCH_SECONDS_INTO_DAY,
        }
    }

    pub fn from_ymd_hms(
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Result<Self, InvalidDate> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(InvalidDate::Time {
                hour,
                minute,
                second,
            });
        }
        let seconds_into_day = hour as i64 * SECONDS_PER_HOUR
            + minute as i64 * SECONDS_PER_MINUTE
            + second as i64;
        Ok(Instant::from_date(Date::new(year, month, day)?) + Duration::seconds(seconds_into_day))
    }

    /// The UTC calendar day this instant falls on.
    pub fn date(&self) -> Date {
        let (day, _) = self.day_and_offset();
        Date::from_days_since_epoch(day)
    }

    pub fn seconds_into_day(&self) -> i64 {
        let (_, into_day) = self.day_and_offset();
        into_day
    }

    fn day_and_offset(&self) -> (i64, i64) {
        (self.seconds + EPOCH_SECONDS_INTO_DAY).div_mod_floor(&SECONDS_PER_DAY)
    }

    pub fn julian_date(&self) -> f64 {
        J2000_JULIAN_DATE + self.seconds as f64 / SECONDS_PER_DAY as f64
    }

    /// Nearest whole second to the given Julian Date.
    pub fn from_julian_date(jd: f64) -> Self {
        let seconds = ((jd - J2000_JULIAN_DATE) * SECONDS_PER_DAY as f64).round();
        Instant {
            seconds: seconds as i64,
        }
    }

    pub fn midpoint(&self, other: Instant) -> Instant {
        Instant {
            seconds: self.seconds + Integer::div_floor(&(other.seconds - self.seconds), &2),
        }
    }
}

impl Add<Duration> for Instant {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Instant {
            seconds: self
                .seconds
                .checked_add(rhs.as_seconds())
                .expect("instant addition overflow"),
        }
    }
}

impl Sub<Duration> for Instant {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Instant {
            seconds: self
                .seconds
                .checked_sub(rhs.as_seconds())
                .expect("instant subtraction overflow"),
        }
    }
}

impl Sub for Instant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration::seconds(
            self.seconds
                .checked_sub(rhs.seconds)
                .expect("instant subtraction underflow"),
        )
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hour, into_hour) = self.seconds_into_day().div_rem(&SECONDS_PER_HOUR);
        let (minute, second) = into_hour.div_rem(&SECONDS_PER_MINUTE);
        write!(
            f,
            "{}T{:02}:{:02}:{:02}Z",
            self.date(),
            hour,
            minute,
            second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::new(year, month, day).unwrap()
    }

    #[test]
    fn test_epoch() {
        assert_eq!(Instant::J2000.julian_date(), 2_451_545.0);
        assert_eq!(Instant::J2000.date(), date(2000, 1, 1));
        assert_eq!(Instant::J2000.seconds_into_day(), 43_200);
        assert_eq!(Instant::J2000.to_string(), "2000-01-01T12:00:00Z");
    }

    #[test]
    fn test_from_date() {
        let midnight = Instant::from_date(date(2000, 1, 1));
        assert_eq!(midnight.seconds_since_epoch(), -43_200);
        assert_eq!(midnight.julian_date(), 2_451_544.5);
        assert_eq!(midnight.date(), date(2000, 1, 1));
        assert_eq!(midnight.seconds_into_day(), 0);

        // One second before midnight belongs to the previous day.
        let before = midnight - Duration::seconds(1);
        assert_eq!(before.date(), date(1999, 12, 31));
        assert_eq!(before.to_string(), "1999-12-31T23:59:59Z");
    }

    #[test]
    fn test_julian_date_round_trip() {
        // Coverage bounds of a long-span planetary ephemeris (1549-12-21 in the Julian calendar).
        let start = Instant::from_julian_date(2_287_184.5);
        assert_eq!(start.date(), date(1549, 12, 31));
        assert_eq!(start.seconds_into_day(), 0);
        let end = Instant::from_julian_date(2_688_976.5);
        assert_eq!(end.date(), date(2650, 1, 25));

        let t = Instant::from_date(date(2019, 3, 20)) + Duration::hours(21) + Duration::minutes(58);
        assert_eq!(Instant::from_julian_date(t.julian_date()), t);
    }

    #[test]
    fn test_date_and_midpoint() {
        let t = Instant::from_date(date(2019, 4, 19)) + Duration::hours(11) + Duration::minutes(12);
        assert_eq!(t.date(), date(2019, 4, 19));
        assert_eq!(t.seconds_into_day(), 11 * 3_600 + 12 * 60);
        assert_eq!(t.to_string(), "2019-04-19T11:12:00Z");

        let a = Instant::from_seconds_since_epoch(-3);
        let b = Instant::from_seconds_since_epoch(4);
        assert_eq!(a.midpoint(b), Instant::from_seconds_since_epoch(0));
        assert_eq!(b - a, Duration::seconds(7));
    }

    #[test]
    fn test_from_ymd_hms() {
        let t = Instant::from_ymd_hms(2019, 3, 20, 21, 58, 27).unwrap();
        assert_eq!(t.to_string(), "2019-03-20T21:58:27Z");
        assert_eq!(
            Instant::from_ymd_hms(2019, 3, 20, 24, 0, 0),
            Err(InvalidDate::Time {
                hour: 24,
                minute: 0,
                second: 0
            })
        );
        assert_eq!(
            Instant::from_ymd_hms(2019, 2, 29, 0, 0, 0),
            Err(InvalidDate::Day {
                year: 2019,
                month: 2,
                day: 29
            })
        );
    }
}
