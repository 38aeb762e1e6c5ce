//! Display formatting for prices.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount for display in Swedish kronor.
///
/// Rounds to the nearest whole krona (halves away from zero) and appends
/// the `kr` suffix: `59.97` becomes `"60 kr"`. Display-only; stored cart
/// state always keeps the exact amounts.
#[must_use]
pub fn format_price_sek(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded} kr")
}
