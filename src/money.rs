use rust_decimal::{Decimal, RoundingStrategy};

/// Round an amount to cents for display. Stored amounts are never rounded.
pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Format as `$1234.50`, or `-$1234.50` for negative amounts
pub fn display_amount(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    if rounded < Decimal::ZERO {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded)
    }
}

/// Plain two-decimal string for machine readable output (JSON, CSV)
pub fn plain_amount(amount: Decimal) -> String {
    format!("{:.2}", round_cents(amount))
}
