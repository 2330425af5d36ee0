//! Money parsing and display helpers

use rust_decimal::{Decimal, RoundingStrategy};

/// Default currency symbol for rendered amounts
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Format an amount with two decimal places and a currency symbol
///
/// `format_currency(dec!(310.88), "$")` yields `"$310.88"`.
pub fn format_currency(amount: Decimal, symbol: &str) -> String {
    format!("{}{}", symbol, format_amount(amount))
}

/// Format an amount with exactly two decimal places
pub fn format_amount(amount: Decimal) -> String {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded.to_string()
}

/// Parse user-entered amount text; anything unparseable reads as zero
pub fn parse_amount(text: &str) -> Decimal {
    text.trim().parse::<Decimal>().unwrap_or(Decimal::ZERO)
}
