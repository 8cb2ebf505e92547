mod currency;
mod goal;

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;

use crate::clock::{Clock, SystemClock};
use crate::models::Record;

pub(crate) use currency::{Currency, RateTable};
pub(crate) use goal::{CaloriesCalculator, CashCalculator, Goal};

/// Length of the trailing window used by [`Calculator::week_total`].
const WEEK_DAYS: u64 = 7;

/// Records measured against a fixed daily limit.
///
/// Totals are recomputed on every call against the clock's current date, so
/// they stay correct across midnight.
#[derive(Debug, Clone)]
pub(crate) struct Calculator<C: Clock = SystemClock> {
    limit: Decimal,
    records: Vec<Record>,
    clock: C,
}

impl Calculator<SystemClock> {
    pub(crate) fn new(limit: Decimal) -> Self {
        Self::with_clock(limit, SystemClock)
    }
}

impl<C: Clock> Calculator<C> {
    pub(crate) fn with_clock(limit: Decimal, clock: C) -> Self {
        Self {
            limit,
            records: Vec::new(),
            clock,
        }
    }

    pub(crate) fn add_record(&mut self, record: Record) {
        self.records.push(record);
    }

    pub(crate) fn limit(&self) -> Decimal {
        self.limit
    }

    pub(crate) fn records(&self) -> &[Record] {
        &self.records
    }

    pub(crate) fn clock(&self) -> &C {
        &self.clock
    }

    /// Sum of amounts dated today.
    pub(crate) fn today_total(&self) -> Decimal {
        let today = self.clock.today();
        self.sum_where(|date| date == today)
    }

    /// Sum of amounts in the window `(today - 7 days, today]`.
    pub(crate) fn week_total(&self) -> Decimal {
        let today = self.clock.today();
        let Some(week_ago) = today.checked_sub_days(Days::new(WEEK_DAYS)) else {
            return self.sum_where(|date| date <= today);
        };
        self.sum_where(|date| week_ago < date && date <= today)
    }

    /// `limit - today_total()`; negative when overspent.
    pub(crate) fn balance(&self) -> Decimal {
        self.limit - self.today_total()
    }

    fn sum_where(&self, keep: impl Fn(NaiveDate) -> bool) -> Decimal {
        self.records
            .iter()
            .filter(|r| keep(r.date()))
            .map(Record::amount)
            .sum()
    }
}
