//! Sources of solar and lunar positions.
//!
//! The Easter calculations only need two things from an ephemeris: the interval it covers
//! and the apparent geocentric ecliptic longitudes of the Sun and the Moon inside that
//! interval. Everything else (equinoxes, lunar phases) is derived from those.

pub use mean_elements::MeanElements;
pub use tabulated::{EphemerisSample, TabulatedEphemeris};

use thiserror::Error;

use crate::Instant;

mod mean_elements;
mod tabulated;

pub trait Ephemeris {
    /// First and last instant at which the ephemeris can be queried.
    fn coverage(&self) -> (Instant, Instant);

    /// Apparent ecliptic longitude of the Sun in degrees, in `[0, 360)`.
    fn sun_longitude(&self, t: Instant) -> f64;

    /// Apparent ecliptic longitude of the Moon in degrees, in `[0, 360)`.
    fn moon_longitude(&self, t: Instant) -> f64;

    /// Moon minus Sun longitude in degrees, in `[0, 360)`. 0 is new moon, 180 full moon.
    fn elongation(&self, t: Instant) -> f64 {
        (self.moon_longitude(t) - self.sun_longitude(t)).rem_euclid(360.0)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn coverage(&self) -> (Instant, Instant) {
        (**self).coverage()
    }

    fn sun_longitude(&self, t: Instant) -> f64 {
        (**self).sun_longitude(t)
    }

    fn moon_longitude(&self, t: Instant) -> f64 {
        (**self).moon_longitude(t)
    }

    fn elongation(&self, t: Instant) -> f64 {
        (**self).elongation(t)
    }
}

impl<E: Ephemeris + ?Sized> Ephemeris for Box<E> {
    fn coverage(&self) -> (Instant, Instant) {
        (**self).coverage()
    }

    fn sun_longitude(&self, t: Instant) -> f64 {
        (**self).sun_longitude(t)
    }

    fn moon_longitude(&self, t: Instant) -> f64 {
        (**self).moon_longitude(t)
    }

    fn elongation(&self, t: Instant) -> f64 {
        (**self).elongation(t)
    }
}

#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("failed to access ephemeris table")]
    Io(#[from] std::io::Error),
    #[error("malformed ephemeris table")]
    Json(#[from] serde_json::Error),
    #[error("an ephemeris table needs at least two samples, got {0}")]
    TooFewSamples(usize),
    #[error("sample {index} at JD {jd} does not come after JD {previous}")]
    NotIncreasing { index: usize, jd: f64, previous: f64 },
    #[error("sample {index} has a non-finite value")]
    NonFinite { index: usize },
    #[error("sampling step must be positive, got {0} seconds")]
    InvalidStep(i64),
}
