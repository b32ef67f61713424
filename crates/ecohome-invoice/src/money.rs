//! Monetary formatting.

use rust_decimal::{Decimal, RoundingStrategy};

/// Formats an amount with exactly two decimals, rounding half away from zero.
///
/// No thousands separators; `-0.00` is printed as `0.00`.
pub fn format_money(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    // `rescale` cannot add decimals to values near `Decimal::MAX`.
    format!("{rounded:.2}")
}
