use std::cmp::min;

use num_traits::PrimInt;

/// Division where the quotient saturates at `max_quotient` and the excess stays in the
/// remainder. Calendar periods that end with a leap day (a leap year at the end of a
/// quadrennium, a leap century at the end of a cycle) use this so the extra day lands in
/// the last period instead of spilling into a non-existent next one.
pub(crate) trait ClampedDivRem<Q: Ord>: Sized {
    type Quotient;
    fn clamped_div_rem(self, divisor: Self, max_quotient: Q) -> (Q, Self);
}

impl<T, Q> ClampedDivRem<Q> for T
where
    T: PrimInt + TryInto<Q>,
    Q: Ord + Into<T> + Copy,
{
    type Quotient = Q;
    fn clamped_div_rem(self, divisor: T, max_quotient: Self::Quotient) -> (Self::Quotient, Self) {
        let quotient = min(self / divisor, max_quotient.into());
        let remainder = self - quotient * divisor;
        let quotient: Self::Quotient = match quotient.try_into() {
            Ok(x) => x,
            // quotient <= max_quotient, which came from Q in the first place.
            Err(_) => unreachable!("clamped quotient does not fit the quotient type"),
        };
        (quotient, remainder)
    }
}
