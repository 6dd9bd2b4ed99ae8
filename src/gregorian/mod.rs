pub use date::{days_in_month, is_leap_year, Date, InvalidDate, Weekday};
pub use easter::gauss_easter;

mod date;
mod easter;
