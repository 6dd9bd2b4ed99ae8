pub use almanac::{march_equinox, moon_phases, next_full_moon, seasons, MoonPhase, Season};
pub use astronomical::{astronomical_easter, AstronomicalEaster, EasterError};
pub use comparison::{Comparison, Direction, Divergence, EasterResult, Summary, YearResults};
pub use duration::Duration;
pub use gregorian::{gauss_easter, Date, InvalidDate, Weekday};
pub use instant::{Instant, J2000_JULIAN_DATE};
pub use range::{CoverageTooShort, DateRange, YearClassification, YearOutOfRange};
pub use search::{find_discrete, find_first, DiscreteEvent, EventSample, MoonPhases, SearchExhausted, Seasons};

mod almanac;
mod astronomical;
mod comparison;
mod div_rem;
mod duration;
pub mod ephemeris;
pub mod gregorian;
mod gregorian_normalized_date;
mod instant;
mod range;
mod search;
