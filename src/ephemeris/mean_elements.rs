// Low-precision analytic positions for the Sun and the Moon.
//
// The Sun uses the mean longitude and mean anomaly of the Earth's orbit with the
// equation of the centre, which is good to about 0.01 degrees. The Moon uses the principal
// periodic terms of the lunar longitude series (all terms with an amplitude above
// 0.002 degrees), good to a few hundredths of a degree. That puts equinoxes within
// roughly a quarter of an hour and lunar phases within a few minutes of their true
// instants, far below the one-day resolution Easter is decided at.
//
// Time arguments are Julian centuries from J2000. No distinction is made between
// dynamical time and UTC.

use crate::ephemeris::Ephemeris;
use crate::Instant;

const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;

// Coverage of the default model, JD 2287184.5 to 2688976.5.
const DEFAULT_COVERAGE_START_JD: f64 = 2_287_184.5;
const DEFAULT_COVERAGE_END_JD: f64 = 2_688_976.5;

// (D, M, M', F, amplitude in 1e-6 degrees), where D is the mean elongation of the Moon,
// M the Sun's mean anomaly, M' the Moon's mean anomaly and F the Moon's argument of
// latitude. Terms that involve M are scaled by the eccentricity factor E per power of M.
#[rustfmt::skip]
const MOON_LONGITUDE_TERMS: [(i8, i8, i8, i8, i32); 35] = [
    (0,  0,  1,  0,  6_288_774),
    (2,  0, -1,  0,  1_274_027),
    (2,  0,  0,  0,    658_314),
    (0,  0,  2,  0,    213_618),
    (0,  1,  0,  0,   -185_116),
    (0,  0,  0,  2,   -114_332),
    (2,  0, -2,  0,     58_793),
    (2, -1, -1,  0,     57_066),
    (2,  0,  1,  0,     53_322),
    (2, -1,  0,  0,     45_758),
    (0,  1, -1,  0,    -40_923),
    (1,  0,  0,  0,    -34_720),
    (0,  1,  1,  0,    -30_383),
    (2,  0,  0, -2,     15_327),
    (0,  0,  1,  2,    -12_528),
    (0,  0,  1, -2,     10_980),
    (4,  0, -1,  0,     10_675),
    (0,  0,  3,  0,     10_034),
    (4,  0, -2,  0,      8_548),
    (2,  1, -1,  0,     -7_888),
    (2,  1,  0,  0,     -6_766),
    (1,  0, -1,  0,     -5_163),
    (1,  1,  0,  0,      4_987),
    (2, -1,  1,  0,      4_036),
    (2,  0,  2,  0,      3_994),
    (4,  0,  0,  0,      3_861),
    (2,  0, -3,  0,      3_665),
    (0,  1, -2,  0,     -2_689),
    (2,  0, -1,  2,     -2_602),
    (2, -1, -2,  0,      2_390),
    (1,  0,  1,  0,     -2_348),
    (2, -2,  0,  0,      2_236),
    (0,  1,  2,  0,     -2_120),
    (0,  2,  0,  0,     -2_069),
    (2, -2, -1,  0,      2_048),
];

/// Analytic Sun and Moon longitudes from mean orbital elements and their principal
/// periodic terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanElements {
    coverage: (Instant, Instant),
}

impl MeanElements {
    pub fn new() -> Self {
        MeanElements {
            coverage: (
                Instant::from_julian_date(DEFAULT_COVERAGE_START_JD),
                Instant::from_julian_date(DEFAULT_COVERAGE_END_JD),
            ),
        }
    }
}

impl Default for MeanElements {
    fn default() -> Self {
        Self::new()
    }
}

fn julian_centuries(t: Instant) -> f64 {
    (t - Instant::J2000).as_days_f64() / DAYS_PER_JULIAN_CENTURY
}

fn normalize_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}

fn sin_deg(angle: f64) -> f64 {
    angle.to_radians().sin()
}

// Nutation in longitude, largest term only.
fn nutation_in_longitude(t: f64) -> f64 {
    let omega = 125.04452 - 1_934.136_261 * t;
    -0.00478 * sin_deg(omega)
}

fn sun_apparent_longitude(t: f64) -> f64 {
    let l0 = 280.46646 + 36_000.76983 * t + 0.000_303_2 * t * t;
    let m = 357.52911 + 35_999.05029 * t - 0.000_153_7 * t * t;
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * sin_deg(m)
        + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * m)
        + 0.000_289 * sin_deg(3.0 * m);
    let aberration = -0.00569;
    normalize_degrees(l0 + c + aberration + nutation_in_longitude(t))
}

fn moon_apparent_longitude(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let l = 218.316_447_7 + 481_267.881_234_21 * t - 0.001_578_6 * t2 + t3 / 538_841.0
        - t4 / 65_194_000.0;
    let d = 297.850_192_1 + 445_267.111_403_4 * t - 0.001_881_9 * t2 + t3 / 545_868.0
        - t4 / 113_065_000.0;
    let m = 357.529_109_2 + 35_999.050_290_9 * t - 0.000_153_6 * t2 + t3 / 24_490_000.0;
    let mp = 134.963_396_4 + 477_198.867_505_5 * t + 0.008_741_4 * t2 + t3 / 69_699.0
        - t4 / 14_712_000.0;
    let f = 93.272_095 + 483_202.017_523_3 * t - 0.003_653_9 * t2 - t3 / 3_526_000.0
        + t4 / 863_310_000.0;
    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;

    let mut sum = 0.0;
    for &(cd, cm, cmp, cf, amplitude) in MOON_LONGITUDE_TERMS.iter() {
        let argument =
            cd as f64 * d + cm as f64 * m + cmp as f64 * mp + cf as f64 * f;
        let scale = match cm.abs() {
            0 => 1.0,
            1 => e,
            _ => e * e,
        };
        sum += amplitude as f64 * scale * sin_deg(argument);
    }

    // Venus, Jupiter and flattening of the Earth.
    let a1 = 119.75 + 131.849 * t;
    let a2 = 53.09 + 479_264.290 * t;
    sum += 3_958.0 * sin_deg(a1) + 1_962.0 * sin_deg(l - f) + 318.0 * sin_deg(a2);

    normalize_degrees(l + sum / 1_000_000.0 + nutation_in_longitude(t))
}

impl Ephemeris for MeanElements {
    fn coverage(&self) -> (Instant, Instant) {
        self.coverage
    }

    fn sun_longitude(&self, t: Instant) -> f64 {
        sun_apparent_longitude(julian_centuries(t))
    }

    fn moon_longitude(&self, t: Instant) -> f64 {
        moon_apparent_longitude(julian_centuries(t))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Date, Duration};

    fn at(year: i32, month: u8, day: u8, hour: i64, minute: i64) -> Instant {
        Instant::from_date(Date::new(year, month, day).unwrap())
            + Duration::hours(hour)
            + Duration::minutes(minute)
    }

    fn angle_between(a: f64, b: f64) -> f64 {
        ((a - b + 180.0).rem_euclid(360.0) - 180.0).abs()
    }

    #[test]
    fn test_default_coverage() {
        let (start, end) = MeanElements::new().coverage();
        assert_eq!(start.julian_date(), 2_287_184.5);
        assert_eq!(end.julian_date(), 2_688_976.5);
    }

    #[test]
    fn test_sun_longitude_reference() {
        // 1992-10-13 00:00 TD: apparent longitude 199.90895 degrees.
        let sun = MeanElements::new().sun_longitude(at(1992, 10, 13, 0, 0));
        assert!(angle_between(sun, 199.90895) < 0.01, "sun longitude {sun}");
    }

    #[test]
    fn test_moon_longitude_reference() {
        // 1992-04-12 00:00 TD: apparent longitude 133.167 degrees.
        let moon = MeanElements::new().moon_longitude(at(1992, 4, 12, 0, 0));
        assert!(angle_between(moon, 133.167) < 0.05, "moon longitude {moon}");
    }

    #[test]
    fn test_equinox_longitude() {
        // March equinox 2019 at 21:58 UTC.
        let sun = MeanElements::new().sun_longitude(at(2019, 3, 20, 21, 58));
        assert!(angle_between(sun, 0.0) < 0.02, "sun longitude {sun}");
    }

    #[test]
    fn test_full_moon_elongation() {
        // Full moon 2019-04-19 at 11:12 UTC.
        let elongation = MeanElements::new().elongation(at(2019, 4, 19, 11, 12));
        assert!(angle_between(elongation, 180.0) < 0.3, "elongation {elongation}");
    }

    #[test]
    fn test_longitudes_are_normalized() {
        let model = MeanElements::new();
        let mut t = at(1600, 1, 1, 0, 0);
        for _ in 0..500 {
            let sun = model.sun_longitude(t);
            let moon = model.moon_longitude(t);
            assert!((0.0..360.0).contains(&sun));
            assert!((0.0..360.0).contains(&moon));
            t = t + Duration::days(731);
        }
    }
}
