use std::ops::{Add, Sub};

pub const SECONDS_PER_MINUTE: i64 = 60;
pub const SECONDS_PER_HOUR: i64 = 3_600;
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Elapsed time in whole seconds. Every day is exactly 86,400 seconds long; leap seconds
/// are not modelled.
#[derive(Debug, Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Duration {
    seconds: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration { seconds: 0 };

    pub const fn seconds(seconds: i64) -> Self {
        Duration { seconds }
    }

    pub const fn minutes(minutes: i64) -> Self {
        Duration::seconds(minutes * SECONDS_PER_MINUTE)
    }

    pub const fn hours(hours: i64) -> Self {
        Duration::seconds(hours * SECONDS_PER_HOUR)
    }

    pub const fn days(days: i64) -> Self {
        Duration::seconds(days * SECONDS_PER_DAY)
    }

    pub fn as_seconds(&self) -> i64 {
        self.seconds
    }

    pub fn as_days_f64(&self) -> f64 {
        self.seconds as f64 / SECONDS_PER_DAY as f64
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Duration::seconds(self.seconds + rhs.seconds)
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Duration::seconds(self.seconds - rhs.seconds)
    }
}
