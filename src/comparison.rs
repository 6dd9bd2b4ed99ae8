//! Astronomical against ecclesiastical Easter, for one year or many.

use std::collections::BTreeMap;
use std::fmt;

use rayon::prelude::*;
use serde::Serialize;

use crate::astronomical::{astronomical_easter, AstronomicalEaster, EasterError};
use crate::ephemeris::Ephemeris;
use crate::gregorian::gauss_easter;
use crate::range::{CoverageTooShort, DateRange, YearOutOfRange};
use crate::search::SearchExhausted;
use crate::Date;

/// Per-year outcome of a batch. Years outside the range are recorded, not fatal.
pub type YearResults = BTreeMap<i32, Result<EasterResult, YearOutOfRange>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Early,
    Late,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Early => f.write_str("early"),
            Direction::Late => f.write_str("late"),
        }
    }
}

/// How far, and which way, the Church's Easter is off from the astronomical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Divergence {
    pub days: u64,
    pub direction: Direction,
}

impl fmt::Display for Divergence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.days {
            7 => write!(f, "a week {}", self.direction),
            1 => write!(f, "1 day {}", self.direction),
            days => write!(f, "{} days {}", days, self.direction),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EasterResult {
    pub year: i32,
    pub astronomical: Date,
    pub ecclesiastical: Date,
    /// `astronomical - ecclesiastical` in days.
    pub difference_days: i64,
}

impl EasterResult {
    pub fn new(year: i32, astronomical: Date, ecclesiastical: Date) -> Self {
        EasterResult {
            year,
            astronomical,
            ecclesiastical,
            difference_days: astronomical - ecclesiastical,
        }
    }

    /// `None` when both methods give the same Sunday. A positive difference means the
    /// Church celebrates before the astronomical date, so its Easter is early.
    pub fn divergence(&self) -> Option<Divergence> {
        let direction = match self.difference_days {
            0 => return None,
            d if d > 0 => Direction::Early,
            _ => Direction::Late,
        };
        Some(Divergence {
            days: self.difference_days.unsigned_abs(),
            direction,
        })
    }

    /// `YYYY - DD/MM vs. DD/MM - Easter is <divergence>.`, astronomical date first.
    pub fn report_line(&self) -> Option<String> {
        self.divergence().map(|divergence| {
            format!(
                "{} - {} vs. {} - Easter is {}.",
                self.year,
                self.astronomical.day_month(),
                self.ecclesiastical.day_month(),
                divergence
            )
        })
    }
}

/// Tallies over a batch of years.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub agreeing: usize,
    pub early: usize,
    pub late: usize,
    pub out_of_range: usize,
}

impl Summary {
    pub fn from_results(results: &YearResults) -> Self {
        let mut summary = Summary::default();
        for result in results.values() {
            match result.as_ref().map(EasterResult::divergence) {
                Err(_) => summary.out_of_range += 1,
                Ok(None) => summary.agreeing += 1,
                Ok(Some(Divergence {
                    direction: Direction::Early,
                    ..
                })) => summary.early += 1,
                Ok(Some(Divergence {
                    direction: Direction::Late,
                    ..
                })) => summary.late += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.agreeing + self.early + self.late + self.out_of_range
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years: {} agree, {} early, {} late, {} out of range",
            self.total(),
            self.agreeing,
            self.early,
            self.late,
            self.out_of_range
        )
    }
}

/// An ephemeris together with the range of years it can answer for.
pub struct Comparison<E> {
    ephemeris: E,
    range: DateRange,
}

impl<E: Ephemeris> Comparison<E> {
    pub fn new(ephemeris: E) -> Result<Self, CoverageTooShort> {
        let range = DateRange::from_ephemeris(&ephemeris)?;
        Ok(Comparison { ephemeris, range })
    }

    pub fn range(&self) -> &DateRange {
        &self.range
    }

    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    pub fn astronomical(&self, year: i32) -> Result<AstronomicalEaster, EasterError> {
        astronomical_easter(&self.ephemeris, &self.range, year)
    }

    pub fn compare_one(&self, year: i32) -> Result<EasterResult, EasterError> {
        let astronomical = self.astronomical(year)?.sunday;
        Ok(EasterResult::new(year, astronomical, gauss_easter(year)))
    }

    /// Compares every year from `first` to `last` inclusive.
    pub fn compare_range(&self, first: i32, last: i32) -> Result<YearResults, SearchExhausted> {
        let mut results = BTreeMap::new();
        for year in first..=last {
            results.insert(year, self.compare_recoverable(year)?);
        }
        log_batch(first, last, &results);
        Ok(results)
    }

    fn compare_recoverable(&self, year: i32) -> Result<Result<EasterResult, YearOutOfRange>, SearchExhausted> {
        match self.compare_one(year) {
            Ok(result) => Ok(Ok(result)),
            Err(EasterError::OutOfRange(err)) => {
                log::warn!("skipping {year}: {err}");
                Ok(Err(err))
            }
            Err(EasterError::SearchExhausted(err)) => Err(err),
        }
    }
}

impl<E: Ephemeris + Sync> Comparison<E> {
    /// Same as [`Comparison::compare_range`], with years spread over the rayon thread pool.
    pub fn compare_range_parallel(&self, first: i32, last: i32) -> Result<YearResults, SearchExhausted> {
        let results = (first..=last)
            .into_par_iter()
            .map(|year| self.compare_recoverable(year).map(|result| (year, result)))
            .collect::<Result<YearResults, SearchExhausted>>()?;
        log_batch(first, last, &results);
        Ok(results)
    }
}

fn log_batch(first: i32, last: i32, results: &YearResults) {
    if !results.is_empty() {
        log::info!("compared {first} to {last}: {}", Summary::from_results(results));
    }
}
