//! Money calculation utilities using rust_decimal for precision
//!
//! All monetary arithmetic is done with `Decimal` internally; `f64` is only
//! a storage/serialization format. Results are rounded to 2 decimal places,
//! half-up.

use rust_decimal::prelude::*;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Round a monetary value to 2 decimal places, half-up
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert an f64 price from the wire into a Decimal
///
/// Non-finite values map to zero; prices are validated before they reach
/// money arithmetic, so this is a last-resort guard.
pub fn decimal_from_f64(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Line total: quantity × unit price
pub fn line_total(quantity: i64, unit_price: f64) -> Decimal {
    round_money(Decimal::from(quantity) * decimal_from_f64(unit_price))
}

/// Order total: Σ quantity × unit price over all lines
///
/// Computed at display time, never stored.
pub fn order_total<I>(lines: I) -> Decimal
where
    I: IntoIterator<Item = (i64, f64)>,
{
    let sum = lines
        .into_iter()
        .map(|(quantity, unit_price)| Decimal::from(quantity) * decimal_from_f64(unit_price))
        .sum::<Decimal>();
    round_money(sum)
}
