// Conversion between day numbers and proleptic Gregorian dates.
//
// Day numbers count from 2000-01-01, the civil day on which J2000 falls, so day 0 is a
// Saturday and day 60 is 2000-03-01. Internally a day number is split into a position in
// the 400-year cycle (146,097 days: 97 leap years, 303 common years), then a century, a
// quadrennium, a year and a day within that year.
//
// The split is done in years that run from 1 March to the end of February. That puts
// every leap day at the very end of its year, every leap year at the end of its
// quadrennium, and the leap century (the one ending in a year divisible by 400) at the end
// of its cycle. An extra day then only ever overflows the last sub-period, which the
// clamped division absorbs:
//
//   cycle 0       2000-03-01 ..= 2400-02-29
//   century 3     2300-03-01 ..= 2400-02-29  (ends with 2400-02-29)
//   quadrennium   2000-03-01 ..= 2004-02-29  (ends with 2004-02-29)
//
// Months within such a year are numbered from March = 0 to February = 11.

use crate::div_rem::ClampedDivRem;
use num_integer::Integer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct GregorianNormalizedDate {
    // Number of 400-year cycles since 2000-03-01.
    cycle: i64,
    // Number of centuries since the start of the cycle (0-3)
    century: u8,
    // Number of quadrennia (4-year periods) since the start of the century (0-24).
    quadrennium: u8,
    // Number of years since the start of the quadrennium (0-3).
    year: u8,
    // Number of days since the start of the year (0-365, where the year starts March 1).
    day: u16,
}

const GREGORIAN_CYCLE_DAYS: u32 = 97 * 366 + 303 * 365;
const GREGORIAN_CENTURY_DAYS: u16 = 24 * 366 + 76 * 365;
#[allow(clippy::identity_op)]
const GREGORIAN_QUADRENNIUM_DAYS: u16 = 3 * 365 + 1 * 366;
const GREGORIAN_YEAR_DAYS: u16 = 365;
const GREGORIAN_CYCLE_YEARS: u16 = 400;
const GREGORIAN_CENTURY_YEARS: u8 = 100;
const GREGORIAN_QUADRENNIUM_YEARS: u8 = 4;

const GREGORIAN_NORMALIZED_DATE_OFFSET_DAYS: u16 = 60; // 60 days from 2000-01-01 to 2000-03-01
const GREGORIAN_MONTH_STARTS: [u16; 13] =
    [0, 31, 61, 92, 122, 153, 184, 214, 245, 275, 306, 337, 65535]; // Index 0 = March

fn month_from_day_offset(day: u16) -> u8 {
    let mut month = (day / 30) as u8;
    if day < GREGORIAN_MONTH_STARTS[month as usize] {
        // We have overshot the month. Move back.
        month -= 1;
    }
    month
}

impl GregorianNormalizedDate {
    pub(crate) fn from_day(day: i64) -> Self {
        let day = day - GREGORIAN_NORMALIZED_DATE_OFFSET_DAYS as i64;
        let (cycle, days_into_cycle) = day.div_mod_floor(&(GREGORIAN_CYCLE_DAYS as i64));
        let days_into_cycle = days_into_cycle as u32; // 2^18 days per cycle

        // Only the last century of a cycle has the extra leap day.
        let (century, days_into_century) =
            days_into_cycle.clamped_div_rem(GREGORIAN_CENTURY_DAYS as u32, 3_u8);
        let days_into_century = days_into_century as u16; // 2^16 days per century

        // Even the leap century ends inside its 25th quadrennium, so a plain division will do.
        // The last quadrennium of a common century is simply one day short.
        let (quadrennium, days_into_quadrennium) =
            days_into_century.div_rem(&GREGORIAN_QUADRENNIUM_DAYS);
        let quadrennium = quadrennium as u8;

        let (years_into_quadrennium, days_into_year) =
            days_into_quadrennium.clamped_div_rem(GREGORIAN_YEAR_DAYS, 3_u8);

        GregorianNormalizedDate {
            cycle,
            century,
            quadrennium,
            year: years_into_quadrennium,
            day: days_into_year,
        }
    }

    pub(crate) fn to_day(self) -> i64 {
        let century = self.century as i64;
        let quadrennium = self.quadrennium as i64;
        let year = self.year as i64;
        let day = self.day as i64;
        self.cycle * GREGORIAN_CYCLE_DAYS as i64
            + century * GREGORIAN_CENTURY_DAYS as i64
            + quadrennium * GREGORIAN_QUADRENNIUM_DAYS as i64
            + year * GREGORIAN_YEAR_DAYS as i64
            + day
            + GREGORIAN_NORMALIZED_DATE_OFFSET_DAYS as i64
    }

    /// Components must already be validated; see `Date::new`.
    pub(crate) fn from_date(year: i64, month: u8, day: u8) -> Self {
        debug_assert!((1..=12).contains(&month));
        debug_assert!((1..=31).contains(&day));

        let mut year = year;
        let mut month = month - 1;
        let day = day - 1;
        if month < 2 {
            month += 12;
            year -= 1;
        }
        month -= 2;
        year -= 2000;
        let (cycle, years_into_cycle) = year.div_mod_floor(&(GREGORIAN_CYCLE_YEARS as i64));
        let years_into_cycle = years_into_cycle as u16; // 2^9 years per cycle
        let (century, years_into_century) =
            years_into_cycle.clamped_div_rem(GREGORIAN_CENTURY_YEARS as u16, 3_u8);
        let (quadrennium, years_into_quadrennium) =
            years_into_century.clamped_div_rem(GREGORIAN_QUADRENNIUM_YEARS as u16, 24_u8);
        let years_into_quadrennium = years_into_quadrennium as u8; // 2^2 years per quadrennium

        let month_day_offset = GREGORIAN_MONTH_STARTS[month as usize];
        let days_into_year = month_day_offset + day as u16;
        GregorianNormalizedDate {
            cycle,
            century,
            quadrennium,
            year: years_into_quadrennium,
            day: days_into_year,
        }
    }

    pub(crate) fn to_date(self) -> (i64, u8, u8) {
        let mut year = 2000
            + 400 * self.cycle
            + 100 * self.century as i64
            + 4 * self.quadrennium as i64
            + self.year as i64;

        // Month 0 is March; February comes last, so leap days never move a month start.
        let mut month = month_from_day_offset(self.day);
        let days_into_month = (self.day - GREGORIAN_MONTH_STARTS[month as usize]) as u8;

        // Back to January-based months; January and February belong to the next civil year.
        month += 2;
        if month >= 12 {
            month -= 12;
            year += 1;
        }
        (year, month + 1, days_into_month + 1)
    }
}
