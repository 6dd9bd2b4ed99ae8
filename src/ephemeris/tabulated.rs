use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ephemeris::{Ephemeris, EphemerisError};
use crate::{Duration, Instant};

/// Sun and Moon longitudes (degrees) at one Julian Date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EphemerisSample {
    pub jd: f64,
    pub sun: f64,
    pub moon: f64,
}

#[derive(Serialize, Deserialize)]
struct TableFile {
    samples: Vec<EphemerisSample>,
}

/// An ephemeris backed by a precomputed time-series, linearly interpolated between
/// samples. Coverage is the span from the first to the last sample.
#[derive(Debug, Clone)]
pub struct TabulatedEphemeris {
    samples: Vec<EphemerisSample>,
}

impl TabulatedEphemeris {
    pub fn new(samples: Vec<EphemerisSample>) -> Result<Self, EphemerisError> {
        if samples.len() < 2 {
            return Err(EphemerisError::TooFewSamples(samples.len()));
        }
        for (index, sample) in samples.iter().enumerate() {
            if !(sample.jd.is_finite() && sample.sun.is_finite() && sample.moon.is_finite()) {
                return Err(EphemerisError::NonFinite { index });
            }
            if index > 0 {
                let previous = samples[index - 1].jd;
                if sample.jd <= previous {
                    return Err(EphemerisError::NotIncreasing {
                        index,
                        jd: sample.jd,
                        previous,
                    });
                }
            }
        }
        Ok(TabulatedEphemeris { samples })
    }

    /// Tabulates `source` from `start` to `end` inclusive, every `step`. The last sample is
    /// always at `end` even when the span is not a whole number of steps.
    pub fn sample<E: Ephemeris>(
        source: &E,
        start: Instant,
        end: Instant,
        step: Duration,
    ) -> Result<Self, EphemerisError> {
        if step <= Duration::ZERO {
            return Err(EphemerisError::InvalidStep(step.as_seconds()));
        }
        let mut samples = Vec::new();
        let mut t = start;
        while t < end {
            samples.push(sample_at(source, t));
            t = t + step;
        }
        samples.push(sample_at(source, end));
        log::debug!(
            "tabulated {} samples from {} to {}",
            samples.len(),
            start,
            end
        );
        TabulatedEphemeris::new(samples)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, EphemerisError> {
        let table: TableFile = serde_json::from_reader(reader)?;
        TabulatedEphemeris::new(table.samples)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EphemerisError> {
        let file = File::open(path.as_ref())?;
        let table = TabulatedEphemeris::from_reader(BufReader::new(file))?;
        log::info!(
            "loaded {} ephemeris samples from {}",
            table.samples.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    pub fn to_writer<W: Write>(&self, writer: W) -> Result<(), EphemerisError> {
        // Borrowing would need a second struct; tables are written rarely.
        let table = TableFile {
            samples: self.samples.clone(),
        };
        serde_json::to_writer(writer, &table)?;
        Ok(())
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), EphemerisError> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn samples(&self) -> &[EphemerisSample] {
        &self.samples
    }

    fn interpolate(&self, t: Instant, value: impl Fn(&EphemerisSample) -> f64) -> f64 {
        let jd = t.julian_date();
        // Index of the segment [i, i+1] containing jd. Queries outside the table extrapolate
        // from the nearest segment.
        let after = self.samples.partition_point(|s| s.jd <= jd);
        let i = after.saturating_sub(1).min(self.samples.len() - 2);
        let a = &self.samples[i];
        let b = &self.samples[i + 1];
        let fraction = (jd - a.jd) / (b.jd - a.jd);
        let from = value(a);
        // Shortest way round the circle, so 359 -> 1 goes through 0 rather than 180.
        let delta = (value(b) - from + 180.0).rem_euclid(360.0) - 180.0;
        (from + fraction * delta).rem_euclid(360.0)
    }
}

fn sample_at<E: Ephemeris>(source: &E, t: Instant) -> EphemerisSample {
    EphemerisSample {
        jd: t.julian_date(),
        sun: source.sun_longitude(t),
        moon: source.moon_longitude(t),
    }
}

impl Ephemeris for TabulatedEphemeris {
    fn coverage(&self) -> (Instant, Instant) {
        let first = self.samples[0].jd;
        let last = self.samples[self.samples.len() - 1].jd;
        (Instant::from_julian_date(first), Instant::from_julian_date(last))
    }

    fn sun_longitude(&self, t: Instant) -> f64 {
        self.interpolate(t, |s| s.sun)
    }

    fn moon_longitude(&self, t: Instant) -> f64 {
        self.interpolate(t, |s| s.moon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::MeanElements;
    use crate::Date;

    fn midnight(year: i32, month: u8, day: u8) -> Instant {
        Instant::from_date(Date::new(year, month, day).unwrap())
    }

    fn angle_between(a: f64, b: f64) -> f64 {
        ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
    }

    fn sample(jd: f64, sun: f64, moon: f64) -> EphemerisSample {
        EphemerisSample { jd, sun, moon }
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(matches!(
            TabulatedEphemeris::new(vec![sample(2_451_545.0, 0.0, 0.0)]),
            Err(EphemerisError::TooFewSamples(1))
        ));
        assert!(matches!(
            TabulatedEphemeris::new(vec![
                sample(2_451_545.0, 0.0, 0.0),
                sample(2_451_545.0, 1.0, 1.0)
            ]),
            Err(EphemerisError::NotIncreasing { index: 1, .. })
        ));
        assert!(matches!(
            TabulatedEphemeris::new(vec![
                sample(2_451_545.0, 0.0, 0.0),
                sample(2_451_546.0, f64::NAN, 1.0)
            ]),
            Err(EphemerisError::NonFinite { index: 1 })
        ));
        let model = MeanElements::new();
        assert!(matches!(
            TabulatedEphemeris::sample(&model, Instant::J2000, Instant::J2000, Duration::ZERO),
            Err(EphemerisError::InvalidStep(0))
        ));
    }

    #[test]
    fn test_interpolation_wraps_through_zero() {
        let table = TabulatedEphemeris::new(vec![
            sample(2_451_545.0, 359.0, 350.0),
            sample(2_451_546.0, 1.0, 10.0),
        ])
        .unwrap();
        let half = Instant::J2000 + Duration::hours(12);
        assert!(angle_between(table.sun_longitude(half), 0.0) < 1e-9);
        assert!(angle_between(table.moon_longitude(half), 0.0) < 1e-9);
        assert!(angle_between(table.elongation(half), 0.0) < 1e-9);
    }

    #[test]
    fn test_coverage_matches_samples() {
        let model = MeanElements::new();
        let start = midnight(2019, 1, 1);
        let end = midnight(2019, 1, 10) + Duration::hours(5);
        let table = TabulatedEphemeris::sample(&model, start, end, Duration::days(1)).unwrap();
        assert_eq!(table.coverage(), (start, end));
        // 9 whole days plus the trailing partial step.
        assert_eq!(table.samples().len(), 11);
    }

    #[test]
    fn test_agrees_with_source_model() {
        let model = MeanElements::new();
        let start = midnight(2019, 3, 1);
        let end = midnight(2019, 5, 1);
        let table = TabulatedEphemeris::sample(&model, start, end, Duration::hours(6)).unwrap();

        let mut t = start + Duration::minutes(17);
        while t < end {
            assert!(angle_between(table.sun_longitude(t), model.sun_longitude(t)) < 1e-3);
            assert!(angle_between(table.moon_longitude(t), model.moon_longitude(t)) < 0.01);
            t = t + Duration::hours(7) + Duration::minutes(13);
        }
    }

    #[test]
    fn test_file_round_trip() {
        let model = MeanElements::new();
        let start = midnight(2000, 1, 1);
        let table =
            TabulatedEphemeris::sample(&model, start, start + Duration::days(3), Duration::days(1))
                .unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ephemeris.json");
        table.save(&path).unwrap();
        let loaded = TabulatedEphemeris::load(&path).unwrap();
        assert_eq!(loaded.samples(), table.samples());
    }

    #[test]
    fn test_reader_rejects_garbage() {
        let result = TabulatedEphemeris::from_reader("{\"samples\": 3}".as_bytes());
        assert!(matches!(result, Err(EphemerisError::Json(_))));
        let result = TabulatedEphemeris::from_reader("{\"samples\": []}".as_bytes());
        assert!(matches!(result, Err(EphemerisError::TooFewSamples(0))));
    }
}
