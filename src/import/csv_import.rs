use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::clock::Clock;
use crate::models::Record;

const AMOUNT_COLUMN: usize = 0;
const COMMENT_COLUMN: usize = 1;
const DATE_COLUMN: usize = 2;

/// Loads records from `amount,comment[,date]` CSV files.
pub(crate) struct RecordImporter;

impl RecordImporter {
    /// Read every row of the CSV as strings, dropping a header row if the
    /// first field does not look like an amount.
    pub(crate) fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(false)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in rdr.records() {
            let record = result.context("Failed to read CSV record")?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        let looks_like_header = rows
            .first()
            .and_then(|row| row.get(AMOUNT_COLUMN))
            .is_some_and(|field| !field.trim().is_empty() && parse_amount(field).is_err());
        if looks_like_header {
            rows.remove(0);
        }
        Ok(rows)
    }

    /// Turn rows into records. Blank rows are skipped; any other bad row fails
    /// the whole import.
    pub(crate) fn parse<C: Clock + ?Sized>(rows: &[Vec<String>], clock: &C) -> Result<Vec<Record>> {
        let mut records = Vec::with_capacity(rows.len());

        for (i, row) in rows.iter().enumerate() {
            if row.iter().all(|f| f.trim().is_empty()) {
                tracing::warn!("skipping blank CSV row {}", i + 1);
                continue;
            }
            let fields: Vec<&str> = row.iter().map(String::as_str).collect();
            let record = record_from_fields(&fields, clock)
                .with_context(|| format!("Row {}: invalid record", i + 1))?;
            records.push(record);
        }

        Ok(records)
    }

    pub(crate) fn load<C: Clock + ?Sized>(path: &Path, clock: &C) -> Result<Vec<Record>> {
        let rows = Self::read_rows(path)?;
        let records = Self::parse(&rows, clock)?;
        tracing::debug!("loaded {} records from {}", records.len(), path.display());
        Ok(records)
    }
}

/// Parse a command-line record such as `145,coffee` or `3000,bar,08.11.2019`.
/// The spec is read as one CSV row, so `12,"tea, milk"` keeps its comma.
pub(crate) fn parse_record_spec<C: Clock + ?Sized>(spec: &str, clock: &C) -> Result<Record> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .from_reader(spec.as_bytes());
    let row = match rdr.records().next() {
        Some(result) => result.with_context(|| format!("Invalid record '{spec}'"))?,
        None => csv::StringRecord::new(),
    };
    if row.len() > DATE_COLUMN + 1 {
        anyhow::bail!(
            "Invalid record '{spec}': expected <amount>,<comment>[,<date>]; \
             quote comments containing commas"
        );
    }
    let fields: Vec<&str> = row.iter().collect();
    record_from_fields(&fields, clock).with_context(|| format!("Invalid record '{spec}'"))
}

fn record_from_fields<C: Clock + ?Sized>(fields: &[&str], clock: &C) -> Result<Record> {
    let amount = parse_amount(fields.get(AMOUNT_COLUMN).copied().unwrap_or(""))?;
    let comment = fields.get(COMMENT_COLUMN).map(|s| s.trim()).unwrap_or("");
    let date = fields
        .get(DATE_COLUMN)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty());
    Record::new(amount, comment, date, clock)
}

fn parse_amount(s: &str) -> Result<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        anyhow::bail!("Missing amount");
    }
    Decimal::from_str(trimmed).with_context(|| format!("Failed to parse '{s}' as amount"))
}

#[cfg(test)]
#[path = "csv_import_tests.rs"]
mod tests;
