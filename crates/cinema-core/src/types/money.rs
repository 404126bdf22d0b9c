//! Money helpers over [`rust_decimal::Decimal`].
//!
//! All prices are held as `Decimal` and rounded to cents with banker's
//! rounding before they are stored or displayed.

use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to exactly two decimal places.
pub fn round_money(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    rounded.rescale(2);
    rounded
}

/// Render an amount as `$12.00`.
pub fn format_usd(amount: Decimal) -> String {
    format!("${:.2}", round_money(amount))
}
