use num_integer::Integer;

use crate::gregorian::Date;

/// Ecclesiastical (Gregorian) Easter Sunday for `year`, by Gauss's congruences.
///
/// Every division and remainder below is a floor operation. The divisions by 4, 1024 and
/// 32 are the arithmetic shifts of the usual bit-twiddled formulation of the algorithm;
/// shifting a negative number rounds towards negative infinity, and so must these.
pub fn gauss_easter(year: i32) -> Date {
    let y = year as i64;
    let a = y.mod_floor(&19);
    let b = Integer::div_floor(&y, &4);
    let c = Integer::div_floor(&b, &25) + 1;
    let d = Integer::div_floor(&(c * 3), &4);
    let mut e = (a * 19 - Integer::div_floor(&(c * 8 + 5), &25) + d + 15).mod_floor(&30);
    e += Integer::div_floor(&(29578 - a - e * 32), &1024);
    e -= (y.mod_floor(&7) + b - d + e + 2).mod_floor(&7);
    let d = Integer::div_floor(&e, &32);
    let day = e - d * 31;
    let month = d + 3;
    // e lands in 22..=56 (March 22 to April 25), so month is 3 or 4 and day is in range.
    Date::new(year, month as u8, day as u8)
        .unwrap_or_else(|err| unreachable!("computus produced an impossible date: {err}"))
}
