//! Brazilian Real amounts with precise decimal arithmetic
//!
//! Charges are always denominated in BRL, so the currency is implied and
//! only the amount is stored. Amounts are kept as `rust_decimal::Decimal`
//! with exactly two fractional digits and are written the Brazilian way:
//! `.` groups thousands and `,` separates the cents (`1.234,56`).

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static BRL_LITERAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:R\$ ?)?[0-9]{1,3}(?:\.[0-9]{3})*,[0-9]{2}$")
        .expect("BRL literal pattern compiles")
});

/// Errors that can occur when building an amount
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Malformed BRL amount: {0}")]
    Malformed(String),

    #[error("Amount cannot be negative: {0}")]
    Negative(Decimal),

    #[error("Amount exceeds the maximum of {max}: {amount}")]
    TooLarge { amount: Decimal, max: Decimal },
}

/// A non-negative amount in Brazilian Reais with two fractional digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BrlAmount(Decimal);

impl BrlAmount {
    /// ISO 4217 code of the implied currency
    pub const CURRENCY: &'static str = "BRL";

    /// Currency symbol accepted (and stripped) in literals
    pub const SYMBOL: &'static str = "R$";

    const SCALE: u32 = 2;

    /// Largest storable amount in centavos, `999.999.999.999,99`
    ///
    /// Matches the `NUMERIC(14,2)` column of `billing_records.amount`.
    pub const MAX_CENTS: i64 = 99_999_999_999_999;

    /// Returns true if `text` is a BRL literal such as `R$ 1.234,56` or `150,00`
    pub fn is_valid_literal(text: &str) -> bool {
        BRL_LITERAL.is_match(text)
    }

    /// Removes the currency symbol and surrounding whitespace from a literal
    pub fn strip_symbol(text: &str) -> &str {
        let trimmed = text.trim();
        trimmed
            .strip_prefix(Self::SYMBOL)
            .map(str::trim_start)
            .unwrap_or(trimmed)
    }

    /// Parses a BRL literal
    ///
    /// # Errors
    ///
    /// Returns `MoneyError::Malformed` if the text does not have the
    /// `[R$ ]d{1,3}(.ddd)*,dd` shape, or `MoneyError::TooLarge` above
    /// [`BrlAmount::maximum`].
    pub fn parse(text: &str) -> Result<Self, MoneyError> {
        if !Self::is_valid_literal(text) {
            return Err(MoneyError::Malformed(text.to_string()));
        }

        let normalized: String = Self::strip_symbol(text)
            .chars()
            .filter(|c| *c != '.')
            .map(|c| if c == ',' { '.' } else { c })
            .collect();

        let amount = Decimal::from_str(&normalized)
            .map_err(|_| MoneyError::Malformed(text.to_string()))?;
        Self::from_decimal(amount)
    }

    /// Builds an amount from a decimal, rounding to cents
    pub fn from_decimal(amount: Decimal) -> Result<Self, MoneyError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(MoneyError::Negative(amount));
        }
        let mut cents = amount.round_dp(Self::SCALE);
        cents.rescale(Self::SCALE);

        let max = Self::maximum().0;
        if cents > max {
            return Err(MoneyError::TooLarge { amount: cents, max });
        }
        Ok(Self(cents))
    }

    /// The largest accepted amount
    pub fn maximum() -> Self {
        Self(Decimal::new(Self::MAX_CENTS, Self::SCALE))
    }

    /// Creates an amount from an integer number of centavos
    ///
    /// `cents` must not exceed [`BrlAmount::MAX_CENTS`].
    pub fn from_cents(cents: u64) -> Self {
        debug_assert!(cents <= Self::MAX_CENTS as u64, "{cents} centavos exceeds the maximum");
        Self(Decimal::new(cents as i64, Self::SCALE))
    }

    /// Returns the amount
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for BrlAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plain = format!("{:.2}", self.0);
        let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));

        let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
        for (i, digit) in integer.chars().enumerate() {
            if i > 0 && (integer.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(digit);
        }

        write!(f, "{},{}", grouped, fraction)
    }
}

impl FromStr for BrlAmount {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for BrlAmount {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for BrlAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
