//! Calendar types for billing periods
//!
//! Billing records carry a plain calendar due date. Reference months
//! (`MM/YYYY`) expand to an inclusive [`DateRange`] covering the first
//! through the last day of the month, and "today" is always resolved in
//! the billing timezone rather than the host's.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

static MONTH_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0[1-9]|1[0-2])/([0-9]{4})$").expect("month reference pattern compiles")
});

/// Timezone wrapper used to resolve calendar dates
///
/// Wraps chrono_tz::Tz with custom serialization support.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timezone(pub Tz);

impl Serialize for Timezone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.0.name())
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Tz::from_str(&s)
            .map(Timezone)
            .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {}", s)))
    }
}

impl Timezone {
    pub fn new(tz: Tz) -> Self {
        Self(tz)
    }

    /// The timezone charges are issued in (America/Sao_Paulo)
    pub fn billing() -> Self {
        Self(chrono_tz::America::Sao_Paulo)
    }

    /// Converts a UTC datetime to the local timezone
    pub fn to_local(&self, utc: DateTime<Utc>) -> DateTime<Tz> {
        utc.with_timezone(&self.0)
    }

    /// Returns the local calendar date of the given instant
    pub fn date_of(&self, utc: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc).date_naive()
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::billing()
    }
}

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: String,
        end: String,
    },

    #[error("Invalid reference month: {0}")]
    InvalidMonthReference(String),
}

/// An inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

/// A billing reference month ("mês de referência"), written `MM/YYYY`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthReference {
    year: i32,
    month: u32,
    range: DateRange,
}

impl MonthReference {
    /// Returns true if `text` has the exact `MM/YYYY` shape with a month in 01..=12
    pub fn is_valid(text: &str) -> bool {
        MONTH_REFERENCE.is_match(text)
    }

    /// Parses a `MM/YYYY` reference month
    pub fn parse(text: &str) -> Result<Self, TemporalError> {
        let invalid = || TemporalError::InvalidMonthReference(text.to_string());

        let captures = MONTH_REFERENCE.captures(text).ok_or_else(invalid)?;
        let month: u32 = captures[1].parse().map_err(|_| invalid())?;
        let year: i32 = captures[2].parse().map_err(|_| invalid())?;

        let first_day = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(invalid)?;
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .ok_or_else(invalid)?;

        Ok(Self {
            year,
            month,
            range: DateRange { start: first_day, end: last_day },
        })
    }

    /// The reference month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        let first_day = date.with_day(1).unwrap_or(date);
        let last_day = first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(date);

        Self {
            year: date.year(),
            month: date.month(),
            range: DateRange { start: first_day, end: last_day },
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.range.start
    }

    pub fn last_day(&self) -> NaiveDate {
        self.range.end
    }

    /// The inclusive due-date range covered by this month
    pub fn date_range(&self) -> DateRange {
        self.range
    }
}

impl fmt::Display for MonthReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{:04}", self.month, self.year)
    }
}

impl FromStr for MonthReference {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for MonthReference {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthReference {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}
