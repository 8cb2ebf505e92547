use std::sync::OnceLock;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;

use crate::clock::Clock;

/// Textual date format for records: "DD.MM.YYYY".
pub(crate) const DATE_FORMAT: &str = "%d.%m.%Y";

/// Largest magnitude accepted for amounts and limits. Keeps every sum,
/// difference and conversion well inside `Decimal` range.
const MAX_MAGNITUDE: i64 = 1_000_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Record {
    amount: Decimal,
    comment: String,
    date: NaiveDate,
}

impl Record {
    /// Build a record, parsing `date` as `DD.MM.YYYY` or taking today's date
    /// from `clock` when it is omitted.
    pub(crate) fn new<C: Clock + ?Sized>(
        amount: Decimal,
        comment: impl Into<String>,
        date: Option<&str>,
        clock: &C,
    ) -> Result<Self> {
        let amount = check_magnitude(amount, "Amount")?;
        let date = match date {
            Some(s) => parse_date(s)?,
            None => clock.today(),
        };
        Ok(Self::dated(amount, comment, date))
    }

    pub(crate) fn dated(amount: Decimal, comment: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            amount,
            comment: comment.into(),
            date,
        }
    }

    pub(crate) fn amount(&self) -> Decimal {
        self.amount
    }

    pub(crate) fn comment(&self) -> &str {
        &self.comment
    }

    pub(crate) fn date(&self) -> NaiveDate {
        self.date
    }

    pub(crate) fn formatted_date(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Reject values whose magnitude exceeds [`MAX_MAGNITUDE`].
pub(crate) fn check_magnitude(value: Decimal, what: &str) -> Result<Decimal> {
    let max = Decimal::new(MAX_MAGNITUDE, 0);
    if value.abs() > max {
        anyhow::bail!("{what} {value} is out of range (magnitude must not exceed {max})");
    }
    Ok(value)
}

/// Parse a strict `DD.MM.YYYY` date. Single-digit days or months are rejected
/// so that formatting the result gives back the input.
pub(crate) fn parse_date(s: &str) -> Result<NaiveDate> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let pattern = PATTERN
        .get_or_init(|| Regex::new(r"^[0-9]{2}\.[0-9]{2}\.[0-9]{4}$").ok())
        .as_ref()
        .ok_or_else(|| anyhow::anyhow!("Date pattern failed to compile"))?;

    if !pattern.is_match(s) {
        anyhow::bail!("Could not parse date '{s}': expected DD.MM.YYYY");
    }
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .with_context(|| format!("Could not parse date '{s}': no such calendar day"))
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
