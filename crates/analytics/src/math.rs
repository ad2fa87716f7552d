use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Divides, saturating to zero when the divisor is zero or the quotient overflows.
pub(crate) fn safe_div(numerator: Decimal, denominator: Decimal) -> Decimal {
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// `part / whole * 100`, or zero for an empty whole.
pub(crate) fn percentage(part: u32, whole: u32) -> Decimal {
    safe_div(Decimal::from(part), Decimal::from(whole)).saturating_mul(dec!(100))
}

/// Arithmetic mean of `count` values summing to `sum`, or zero when `count` is zero.
pub(crate) fn mean(sum: Decimal, count: u32) -> Decimal {
    safe_div(sum, Decimal::from(count))
}
