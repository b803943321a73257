//! Input checks shared by the order command handlers.

use crate::domain::foundation::{CurrencyCode, Money};
use crate::domain::payment::PaymentError;

/// Builds a strictly positive amount from raw caller input.
pub(crate) fn require_money(
    amount: Option<i64>,
    currency: Option<&str>,
) -> Result<Money, PaymentError> {
    let amount = amount.ok_or_else(|| PaymentError::validation("amount", "Amount is required"))?;
    let currency = currency
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| PaymentError::validation("currency", "Currency is required"))?;

    let currency = CurrencyCode::new(currency)?;
    Ok(Money::positive(amount, currency)?)
}

/// Treats blank optional strings as absent.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
