//! Search for the instants at which a discrete function of time changes value.
//!
//! An astronomical event such as an equinox or a full moon is the moment some angle
//! crosses a boundary. Dividing the angle into quadrants turns it into a small integer
//! code that is constant between events, so finding events reduces to finding where the
//! code changes. The window is sampled coarsely, at a spacing shorter than the shortest
//! gap between two events, and each change between neighbouring samples is then narrowed
//! down by bisection.

use num_integer::Integer;
use thiserror::Error;

use crate::ephemeris::Ephemeris;
use crate::{Duration, Instant};

/// Bisection stops once the bracket is this narrow.
const RESOLUTION: Duration = Duration::seconds(1);

/// A discrete-valued function of time derived from an ephemeris.
pub trait DiscreteEvent {
    /// Short name used in log and error messages.
    const NAME: &'static str;

    /// Sampling interval that never straddles two changes of code.
    fn step(&self) -> Duration;

    fn code_at<E: Ephemeris + ?Sized>(&self, ephemeris: &E, t: Instant) -> u8;
}

/// The quadrant of the Sun's ecliptic longitude: 0 from the March equinox, 1 from the June
/// solstice, 2 from the September equinox and 3 from the December solstice.
#[derive(Debug, Clone, Copy, Default)]
pub struct Seasons;

/// The quadrant of the Moon-Sun elongation: 0 from new moon, 1 from first quarter, 2 from
/// full moon and 3 from last quarter.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoonPhases;

fn quadrant(angle: f64) -> u8 {
    ((angle.rem_euclid(360.0) / 90.0).floor() as i64).mod_floor(&4) as u8
}

impl DiscreteEvent for Seasons {
    const NAME: &'static str = "season";

    fn step(&self) -> Duration {
        Duration::days(25)
    }

    fn code_at<E: Ephemeris + ?Sized>(&self, ephemeris: &E, t: Instant) -> u8 {
        quadrant(ephemeris.sun_longitude(t))
    }
}

impl DiscreteEvent for MoonPhases {
    const NAME: &'static str = "moon phase";

    fn step(&self) -> Duration {
        Duration::days(6)
    }

    fn code_at<E: Ephemeris + ?Sized>(&self, ephemeris: &E, t: Instant) -> u8 {
        quadrant(ephemeris.elongation(t))
    }
}

/// One change of code: at `instant` the code becomes `code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSample {
    pub instant: Instant,
    pub code: u8,
}

/// A search whose window was sized to always contain an event came back empty. This is
/// a defect in the window sizing or in the ephemeris data, not something to recover from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no {event} event with code {code} between {start} and {end}")]
pub struct SearchExhausted {
    pub event: &'static str,
    pub code: u8,
    pub start: Instant,
    pub end: Instant,
}

/// Every change of `event`'s code within `[start, end]`, in chronological order.
///
/// Changes closer together than the event's step may be missed; a window narrower than
/// the gap between two events may legitimately contain none.
pub fn find_discrete<E, D>(ephemeris: &E, start: Instant, end: Instant, event: &D) -> Vec<EventSample>
where
    E: Ephemeris + ?Sized,
    D: DiscreteEvent,
{
    if end <= start {
        return Vec::new();
    }

    let span = (end - start).as_seconds();
    let step = event.step().as_seconds().max(1);
    let intervals = Integer::div_ceil(&span, &step).max(1);

    let mut found = Vec::new();
    let mut previous_time = start;
    let mut previous_code = event.code_at(ephemeris, start);
    for i in 1..=intervals {
        // Spread the samples evenly so the last one lands exactly on `end`.
        let t = start + Duration::seconds(span * i / intervals);
        let code = event.code_at(ephemeris, t);
        if code != previous_code {
            let instant = bisect(ephemeris, event, previous_time, previous_code, t);
            found.push(EventSample { instant, code });
        }
        previous_time = t;
        previous_code = code;
    }

    log::debug!(
        "{} search {}..{}: {} change(s) from {} samples",
        D::NAME,
        start,
        end,
        found.len(),
        intervals + 1
    );
    found
}

// Narrows [low, high] until it is no wider than RESOLUTION, keeping the change inside it.
// Returns the first instant with the new code.
fn bisect<E, D>(ephemeris: &E, event: &D, mut low: Instant, low_code: u8, mut high: Instant) -> Instant
where
    E: Ephemeris + ?Sized,
    D: DiscreteEvent,
{
    while high - low > RESOLUTION {
        let mid = low.midpoint(high);
        if event.code_at(ephemeris, mid) == low_code {
            low = mid;
        } else {
            high = mid;
        }
    }
    high
}

/// The first change to `code` within `[start, end]`.
pub fn find_first<E, D>(
    ephemeris: &E,
    start: Instant,
    end: Instant,
    event: &D,
    code: u8,
) -> Result<Instant, SearchExhausted>
where
    E: Ephemeris + ?Sized,
    D: DiscreteEvent,
{
    find_discrete(ephemeris, start, end, event)
        .into_iter()
        .find(|sample| sample.code == code)
        .map(|sample| sample.instant)
        .ok_or(SearchExhausted {
            event: D::NAME,
            code,
            start,
            end,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::MeanElements;
    use crate::Date;

    fn midnight(year: i32, month: u8, day: u8) -> Instant {
        Instant::from_date(Date::new(year, month, day).unwrap())
    }

    // Sun and Moon moving at constant rates, which makes event times exact.
    struct Uniform {
        sun_degrees_per_day: f64,
        moon_degrees_per_day: f64,
    }

    impl Ephemeris for Uniform {
        fn coverage(&self) -> (Instant, Instant) {
            (Instant::from_seconds_since_epoch(i64::MIN / 2), Instant::from_seconds_since_epoch(i64::MAX / 2))
        }

        fn sun_longitude(&self, t: Instant) -> f64 {
            ((t - Instant::J2000).as_days_f64() * self.sun_degrees_per_day).rem_euclid(360.0)
        }

        fn moon_longitude(&self, t: Instant) -> f64 {
            ((t - Instant::J2000).as_days_f64() * self.moon_degrees_per_day).rem_euclid(360.0)
        }
    }

    #[test]
    fn test_quadrant() {
        assert_eq!(quadrant(0.0), 0);
        assert_eq!(quadrant(89.999), 0);
        assert_eq!(quadrant(90.0), 1);
        assert_eq!(quadrant(180.0), 2);
        assert_eq!(quadrant(359.9), 3);
        assert_eq!(quadrant(360.0), 0);
        assert_eq!(quadrant(-1.0), 3);
    }

    #[test]
    fn test_exact_crossings() {
        // The Sun crosses a quadrant every 10 days, the Moon not at all.
        let ephemeris = Uniform {
            sun_degrees_per_day: 9.0,
            moon_degrees_per_day: 9.0,
        };
        let start = Instant::J2000 + Duration::days(1);
        let end = Instant::J2000 + Duration::days(35);

        struct Fast;
        impl DiscreteEvent for Fast {
            const NAME: &'static str = "fast season";
            fn step(&self) -> Duration {
                Duration::days(3)
            }
            fn code_at<E: Ephemeris + ?Sized>(&self, ephemeris: &E, t: Instant) -> u8 {
                quadrant(ephemeris.sun_longitude(t))
            }
        }

        let found = find_discrete(&ephemeris, start, end, &Fast);
        let expected: Vec<EventSample> = [(10, 1), (20, 2), (30, 3)]
            .iter()
            .map(|&(day, code)| EventSample {
                instant: Instant::J2000 + Duration::days(day),
                code,
            })
            .collect();
        assert_eq!(found, expected);

        assert!(find_discrete(&ephemeris, start, end, &MoonPhases).is_empty());
    }

    #[test]
    fn test_empty_and_inverted_windows() {
        let model = MeanElements::new();
        let t = midnight(2019, 3, 20);
        assert!(find_discrete(&model, t, t, &Seasons).is_empty());
        assert!(find_discrete(&model, t + Duration::days(5), t, &Seasons).is_empty());
    }

    #[test]
    fn test_moon_phases_in_order() {
        let model = MeanElements::new();
        let start = midnight(2019, 1, 1);
        let end = midnight(2019, 3, 1);
        let found = find_discrete(&model, start, end, &MoonPhases);
        // Two synodic months contain eight phases, give or take one at the edges.
        assert!((7..=9).contains(&found.len()), "found {found:?}");
        for pair in found.windows(2) {
            assert!(pair[0].instant < pair[1].instant);
            assert_eq!(pair[1].code, (pair[0].code + 1) % 4);
        }
    }

    #[test]
    fn test_find_first_reports_exhaustion() {
        let model = MeanElements::new();
        // No solstice in the middle of March.
        let start = midnight(2019, 3, 13);
        let end = midnight(2019, 3, 28);
        let err = find_first(&model, start, end, &Seasons, 1).unwrap_err();
        assert_eq!(
            err,
            SearchExhausted {
                event: "season",
                code: 1,
                start,
                end
            }
        );
        assert_eq!(
            err.to_string(),
            "no season event with code 1 between 2019-03-13T00:00:00Z and 2019-03-28T00:00:00Z"
        );
    }
}
