use std::fmt;
use std::ops::RangeInclusive;

use thiserror::Error;

use crate::ephemeris::Ephemeris;
use crate::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum YearClassification {
    BeforeRange,
    InRange,
    AfterRange,
}

impl fmt::Display for YearClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            YearClassification::BeforeRange => "before",
            YearClassification::InRange => "inside",
            YearClassification::AfterRange => "after",
        };
        f.write_str(text)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("year {year} falls {classification} the supported range {start_year}-{end_year}")]
pub struct YearOutOfRange {
    pub year: i32,
    pub classification: YearClassification,
    pub start_year: i32,
    pub end_year: i32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("ephemeris coverage {start} to {end} does not contain a whole year")]
pub struct CoverageTooShort {
    pub start: Instant,
    pub end: Instant,
}

/// The years for which Easter can be computed from a given ephemeris.
///
/// The first and last calendar years touched by the coverage are dropped, since a search
/// window near the edge of coverage would run off the end of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start_year: i32,
    end_year: i32,
    start_instant: Instant,
    end_instant: Instant,
}

impl DateRange {
    pub fn from_coverage(start: Instant, end: Instant) -> Result<Self, CoverageTooShort> {
        let start_year = start.date().year() + 1;
        let end_year = end.date().year() - 1;
        if start_year >= end_year {
            return Err(CoverageTooShort { start, end });
        }
        Ok(DateRange {
            start_year,
            end_year,
            start_instant: start,
            end_instant: end,
        })
    }

    pub fn from_ephemeris<E: Ephemeris + ?Sized>(ephemeris: &E) -> Result<Self, CoverageTooShort> {
        let (start, end) = ephemeris.coverage();
        let range = DateRange::from_coverage(start, end)?;
        log::info!(
            "ephemeris covers {} to {}, years {} to {} are usable",
            start,
            end,
            range.start_year,
            range.end_year
        );
        Ok(range)
    }

    pub fn start_year(&self) -> i32 {
        self.start_year
    }

    pub fn end_year(&self) -> i32 {
        self.end_year
    }

    pub fn start_instant(&self) -> Instant {
        self.start_instant
    }

    pub fn end_instant(&self) -> Instant {
        self.end_instant
    }

    pub fn classify(&self, year: i32) -> YearClassification {
        if year > self.end_year {
            YearClassification::AfterRange
        } else if year < self.start_year {
            YearClassification::BeforeRange
        } else {
            YearClassification::InRange
        }
    }

    pub fn require_in_range(&self, year: i32) -> Result<(), YearOutOfRange> {
        match self.classify(year) {
            YearClassification::InRange => Ok(()),
            classification => Err(YearOutOfRange {
                year,
                classification,
                start_year: self.start_year,
                end_year: self.end_year,
            }),
        }
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start_year..=self.end_year
    }
}
