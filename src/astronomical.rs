use thiserror::Error;

use crate::almanac::{march_equinox, next_full_moon};
use crate::ephemeris::Ephemeris;
use crate::gregorian::Weekday;
use crate::range::{DateRange, YearOutOfRange};
use crate::search::SearchExhausted;
use crate::{Date, Duration, Instant};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EasterError {
    #[error(transparent)]
    OutOfRange(#[from] YearOutOfRange),
    #[error(transparent)]
    SearchExhausted(#[from] SearchExhausted),
}

impl EasterError {
    /// Whether the error indicates broken data or a broken search rather than a bad
    /// request. A batch skips years that are out of range but stops on a fatal error.
    pub fn is_fatal(&self) -> bool {
        matches!(self, EasterError::SearchExhausted(_))
    }
}

/// Easter as the Sunday after the first full moon following the March equinox, with the
/// two events that determined it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AstronomicalEaster {
    pub equinox: Instant,
    pub full_moon: Instant,
    pub sunday: Date,
}

pub fn astronomical_easter<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    range: &DateRange,
    year: i32,
) -> Result<AstronomicalEaster, EasterError> {
    range.require_in_range(year)?;
    let equinox = march_equinox(ephemeris, year)?;
    let full_moon = next_full_moon(ephemeris, equinox + Duration::days(1))?;
    // A full moon on a Sunday makes that same day Easter.
    let sunday = full_moon.date().next_weekday(Weekday::Sunday);
    log::debug!("astronomical Easter {year}: {sunday} (equinox {equinox}, full moon {full_moon})");
    Ok(AstronomicalEaster {
        equinox,
        full_moon,
        sunday,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::MeanElements;
    use crate::range::YearClassification;

    fn date(year: i32, month: u8, day: u8) -> Date {
        Date::new(year, month, day).unwrap()
    }

    fn setup() -> (MeanElements, DateRange) {
        let model = MeanElements::new();
        let range = DateRange::from_ephemeris(&model).unwrap();
        (model, range)
    }

    #[test]
    fn test_known_years() {
        let (model, range) = setup();
        // Full moon on Friday 2019-04-19.
        let easter = astronomical_easter(&model, &range, 2019).unwrap();
        assert_eq!(easter.full_moon.date(), date(2019, 4, 19));
        assert_eq!(easter.equinox.date(), date(2019, 3, 20));
        assert_eq!(easter.sunday, date(2019, 4, 21));

        // Full moon on Tuesday 2000-04-18.
        assert_eq!(
            astronomical_easter(&model, &range, 2000).unwrap().sunday,
            date(2000, 4, 23)
        );
    }

    #[test]
    fn test_full_moon_on_sunday() {
        let (model, range) = setup();
        // Full moon on Sunday 2025-04-13 at 00:22 UTC.
        let easter = astronomical_easter(&model, &range, 2025).unwrap();
        assert_eq!(easter.full_moon.date(), date(2025, 4, 13));
        assert_eq!(easter.sunday, date(2025, 4, 13));
    }

    #[test]
    fn test_out_of_range_is_recoverable() {
        let (model, range) = setup();
        let err = astronomical_easter(&model, &range, 1549).unwrap_err();
        assert!(!err.is_fatal());
        assert!(matches!(
            err,
            EasterError::OutOfRange(YearOutOfRange {
                year: 1549,
                classification: YearClassification::BeforeRange,
                ..
            })
        ));
        assert!(astronomical_easter(&model, &range, 2650).is_err());
    }
}
