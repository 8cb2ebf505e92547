mod cli;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::str::FromStr;

use crate::calculator::{Calculator, Currency, Goal, RateTable};
use crate::clock::{Clock, FixedClock, SystemClock};
use crate::import::{parse_record_spec, RecordImporter};
use crate::models::{check_magnitude, parse_date, Record};

pub(crate) use cli::as_cli;

const DEFAULT_CURRENCY: &str = "rub";

/// Flags shared by the `cash`, `calories` and `stats` commands.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Options {
    pub(crate) limit: Decimal,
    pub(crate) currency: String,
    pub(crate) files: Vec<PathBuf>,
    pub(crate) records: Vec<String>,
    pub(crate) today: Option<NaiveDate>,
    pub(crate) rates: RateTable,
    pub(crate) calories: bool,
}

impl Options {
    /// Parse `<limit> [flags...]`.
    pub(crate) fn parse(args: &[String]) -> Result<Self> {
        let Some(raw_limit) = args.first() else {
            anyhow::bail!("Missing daily limit");
        };
        let limit = Decimal::from_str(raw_limit.trim())
            .with_context(|| format!("Invalid limit '{raw_limit}'"))?;
        let limit = check_magnitude(limit, "Limit")?;

        let mut opts = Self {
            limit,
            currency: DEFAULT_CURRENCY.to_string(),
            files: Vec::new(),
            records: Vec::new(),
            today: None,
            rates: RateTable::default(),
            calories: false,
        };

        let mut rest = args[1..].iter();
        while let Some(flag) = rest.next() {
            if flag == "--calories" {
                opts.calories = true;
                continue;
            }
            let value = rest
                .next()
                .ok_or_else(|| anyhow::anyhow!("Missing value for {flag}"))?;
            match flag.as_str() {
                "--currency" | "-c" => opts.currency = value.clone(),
                "--file" | "-f" => opts.files.push(PathBuf::from(value)),
                "--record" | "-r" => opts.records.push(value.clone()),
                "--today" => opts.today = Some(parse_date(value)?),
                "--rates" => opts.rates = parse_rates(value, opts.rates.clone())?,
                other => anyhow::bail!("Unknown option: {other}"),
            }
        }

        Ok(opts)
    }

    pub(crate) fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }

    /// Which report the `stats` command ends with.
    pub(crate) fn goal(&self) -> Goal {
        if self.calories {
            Goal::Calories
        } else {
            Goal::Cash {
                currency: self.currency.clone(),
                rates: self.rates.clone(),
            }
        }
    }

    /// Every record from `--file` and `--record`, in that order.
    pub(crate) fn load_records(&self, clock: &dyn Clock) -> Result<Vec<Record>> {
        let mut records = Vec::new();
        for path in &self.files {
            records.extend(RecordImporter::load(path, clock)?);
        }
        for spec in &self.records {
            records.push(parse_record_spec(spec, clock)?);
        }
        Ok(records)
    }

    /// A calculator holding everything [`Options::load_records`] returns.
    pub(crate) fn build_calculator<'a>(
        &self,
        clock: &'a dyn Clock,
    ) -> Result<Calculator<&'a dyn Clock>> {
        let mut calc = Calculator::with_clock(self.limit, clock);
        for record in self.load_records(clock)? {
            calc.add_record(record);
        }
        tracing::debug!(
            "calculator ready: limit {}, {} records",
            calc.limit(),
            calc.records().len()
        );
        Ok(calc)
    }
}

/// Parse `eur=90.5,usd=75` on top of `base`.
fn parse_rates(s: &str, base: RateTable) -> Result<RateTable> {
    let mut rates = base;
    for pair in s.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (code, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow::anyhow!("Expected <currency>=<rate>, got '{pair}'"))?;
        let currency = Currency::parse(code.trim())
            .ok_or_else(|| anyhow::anyhow!("Unknown currency '{}'", code.trim()))?;
        let rate = Decimal::from_str(raw.trim())
            .with_context(|| format!("Invalid rate '{}' for {currency}", raw.trim()))?;
        rates = rates.with_rate(currency, rate)?;
    }
    Ok(rates)
}

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;
