//! Brazilian individual taxpayer number (CPF)
//!
//! A CPF is eleven decimal digits where the last two are mod-11 check
//! digits over the preceding ones. Only the bare digit form is accepted;
//! formatting (`509.744.630-51`) is produced on output but never parsed.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing a CPF
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxIdError {
    #[error("CPF must have {expected} digits, found {found} characters")]
    InvalidLength { expected: usize, found: usize },

    #[error("CPF must contain only digits")]
    NonDigit,

    #[error("CPF cannot be a repeated digit sequence")]
    RepeatedDigits,

    #[error("CPF check digits do not match")]
    ChecksumMismatch,
}

/// A checksum-valid CPF
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaxId(String);

impl TaxId {
    /// Number of digits in a CPF
    pub const LENGTH: usize = 11;

    /// Parses and validates a CPF
    pub fn parse(text: &str) -> Result<Self, TaxIdError> {
        if text.len() != Self::LENGTH {
            return Err(TaxIdError::InvalidLength {
                expected: Self::LENGTH,
                found: text.chars().count(),
            });
        }

        let digits: Vec<u32> = text
            .chars()
            .map(|c| c.to_digit(10))
            .collect::<Option<_>>()
            .ok_or(TaxIdError::NonDigit)?;

        if digits.iter().all(|d| *d == digits[0]) {
            return Err(TaxIdError::RepeatedDigits);
        }

        if check_digit(&digits[..9]) != digits[9] || check_digit(&digits[..10]) != digits[10] {
            return Err(TaxIdError::ChecksumMismatch);
        }

        Ok(Self(text.to_string()))
    }

    /// Returns true if `text` is a valid CPF
    pub fn is_valid(text: &str) -> bool {
        Self::parse(text).is_ok()
    }

    /// The bare eleven digits
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The conventional `ddd.ddd.ddd-dd` rendering
    pub fn formatted(&self) -> String {
        format!(
            "{}.{}.{}-{}",
            &self.0[0..3],
            &self.0[3..6],
            &self.0[6..9],
            &self.0[9..11]
        )
    }
}

/// Computes one CPF check digit over `digits`
///
/// Weights run from `digits.len() + 1` down to 2; a remainder below 2
/// maps to 0.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    match sum % 11 {
        0 | 1 => 0,
        r => 11 - r,
    }
}

impl fmt::Display for TaxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TaxId {
    type Err = TaxIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TaxId {
    type Error = TaxIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaxId> for String {
    fn from(id: TaxId) -> String {
        id.0
    }
}

impl AsRef<str> for TaxId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
