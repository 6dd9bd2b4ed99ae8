//! Equinoxes, solstices and lunar phases.

use std::fmt;

use crate::ephemeris::Ephemeris;
use crate::search::{find_discrete, find_first, MoonPhases, SearchExhausted, Seasons};
use crate::{Date, Duration, Instant};

/// Full moons are never further apart than this.
const FULL_MOON_WINDOW: Duration = Duration::days(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Season {
    MarchEquinox,
    JuneSolstice,
    SeptemberEquinox,
    DecemberSolstice,
}

impl Season {
    pub fn from_code(code: u8) -> Self {
        match code % 4 {
            0 => Season::MarchEquinox,
            1 => Season::JuneSolstice,
            2 => Season::SeptemberEquinox,
            _ => Season::DecemberSolstice,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Season::MarchEquinox => "March equinox",
            Season::JuneSolstice => "June solstice",
            Season::SeptemberEquinox => "September equinox",
            Season::DecemberSolstice => "December solstice",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoonPhase {
    New,
    FirstQuarter,
    Full,
    LastQuarter,
}

impl MoonPhase {
    pub fn from_code(code: u8) -> Self {
        match code % 4 {
            0 => MoonPhase::New,
            1 => MoonPhase::FirstQuarter,
            2 => MoonPhase::Full,
            _ => MoonPhase::LastQuarter,
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for MoonPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoonPhase::New => "new moon",
            MoonPhase::FirstQuarter => "first quarter",
            MoonPhase::Full => "full moon",
            MoonPhase::LastQuarter => "last quarter",
        };
        f.write_str(name)
    }
}

fn midnight(year: i32, month: u8, day: u8) -> Instant {
    // Only called with fixed, valid month and day numbers.
    let date = Date::new(year, month, day)
        .unwrap_or_else(|err| unreachable!("fixed calendar date is invalid: {err}"));
    Instant::from_date(date)
}

/// The instant of the March equinox, searched for between 13 and 28 March.
pub fn march_equinox<E: Ephemeris + ?Sized>(ephemeris: &E, year: i32) -> Result<Instant, SearchExhausted> {
    let start = midnight(year, 3, 13);
    let end = midnight(year, 3, 28);
    let equinox = find_first(ephemeris, start, end, &Seasons, Season::MarchEquinox.code())?;
    log::debug!("March equinox {year}: {equinox}");
    Ok(equinox)
}

/// Every equinox and solstice that falls within the calendar year, in order.
pub fn seasons<E: Ephemeris + ?Sized>(ephemeris: &E, year: i32) -> Vec<(Instant, Season)> {
    find_discrete(ephemeris, midnight(year, 1, 1), midnight(year + 1, 1, 1), &Seasons)
        .into_iter()
        .map(|sample| (sample.instant, Season::from_code(sample.code)))
        .collect()
}

/// The first full moon in the 30 days starting at `after`.
pub fn next_full_moon<E: Ephemeris + ?Sized>(ephemeris: &E, after: Instant) -> Result<Instant, SearchExhausted> {
    let full_moon = find_first(
        ephemeris,
        after,
        after + FULL_MOON_WINDOW,
        &MoonPhases,
        MoonPhase::Full.code(),
    )?;
    log::debug!("full moon after {after}: {full_moon}");
    Ok(full_moon)
}

pub fn moon_phases<E: Ephemeris + ?Sized>(ephemeris: &E, start: Instant, end: Instant) -> Vec<(Instant, MoonPhase)> {
    find_discrete(ephemeris, start, end, &MoonPhases)
        .into_iter()
        .map(|sample| (sample.instant, MoonPhase::from_code(sample.code)))
        .collect()
}
