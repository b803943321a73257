//! Money value objects.
//!
//! Amounts cross the service boundary as integer minor units (cents for USD)
//! and are only rendered as decimal major-unit strings when talking to the
//! payment provider. No floating point is involved at any step.

use std::fmt;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Currencies PayPal settles without a fractional part.
const ZERO_DECIMAL_CURRENCIES: [&str; 3] = ["HUF", "JPY", "TWD"];

/// ISO 4217 currency code, always stored uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses a currency code, accepting any letter case.
    pub fn new(code: impl AsRef<str>) -> Result<Self, ValidationError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(ValidationError::empty_field("currency"));
        }
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "expected a 3-letter ISO 4217 code",
            ));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digits after the decimal point in the provider representation.
    pub fn exponent(&self) -> u32 {
        if ZERO_DECIMAL_CURRENCIES.contains(&self.0.as_str()) {
            0
        } else {
            2
        }
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An amount of money in minor units of a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    minor_units: i64,
    currency: CurrencyCode,
}

impl Money {
    pub fn new(minor_units: i64, currency: CurrencyCode) -> Self {
        Self {
            minor_units,
            currency,
        }
    }

    /// Creates a strictly positive amount, as required for charges and refunds.
    pub fn positive(minor_units: i64, currency: CurrencyCode) -> Result<Self, ValidationError> {
        if minor_units <= 0 {
            return Err(ValidationError::not_positive("amount", minor_units));
        }
        Ok(Self::new(minor_units, currency))
    }

    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    /// Renders the amount in major units, e.g. 1000 USD becomes `"10.00"`.
    pub fn to_major_string(&self) -> String {
        Decimal::new(self.minor_units, self.currency.exponent()).to_string()
    }

    /// Parses a provider decimal string (e.g. `"10.00"`) into minor units.
    ///
    /// Values carrying more precision than the currency allows are rejected
    /// rather than rounded.
    pub fn from_major_str(value: &str, currency: CurrencyCode) -> Result<Self, ValidationError> {
        let decimal = Decimal::from_str(value.trim())
            .map_err(|_| ValidationError::invalid_format("amount", "not a decimal number"))?;

        let scale = Decimal::from(10_i64.pow(currency.exponent()));
        let scaled = decimal
            .checked_mul(scale)
            .ok_or_else(|| ValidationError::invalid_format("amount", "amount out of range"))?;

        if !scaled.fract().is_zero() {
            return Err(ValidationError::invalid_format(
                "amount",
                format!("too many decimal places for {}", currency),
            ));
        }

        let minor_units = scaled
            .to_i64()
            .ok_or_else(|| ValidationError::invalid_format("amount", "amount out of range"))?;

        Ok(Self::new(minor_units, currency))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_major_string(), self.currency)
    }
}
