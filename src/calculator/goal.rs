use std::cmp::Ordering;

use rust_decimal::{Decimal, RoundingStrategy};

use super::{Calculator, Currency, RateTable};
use crate::clock::{Clock, SystemClock};
use crate::models::Record;

pub(crate) const INVALID_CURRENCY: &str = "invalid currency format";
pub(crate) const NO_MONEY: &str = "no money left, hang on";
pub(crate) const ENOUGH_EATING: &str = "that's enough eating!";

/// What the balance is measured in, and therefore how it is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Goal {
    Cash { currency: String, rates: RateTable },
    Calories,
}

impl Goal {
    pub(crate) fn message<C: Clock>(&self, calculator: &Calculator<C>) -> String {
        match self {
            Self::Cash { currency, rates } => cash_message(calculator.balance(), currency, rates),
            Self::Calories => calories_message(calculator.balance()),
        }
    }
}

/// Daily money limit in roubles, reported in a chosen currency.
#[derive(Debug, Clone)]
pub(crate) struct CashCalculator<C: Clock = SystemClock> {
    calculator: Calculator<C>,
    rates: RateTable,
}

impl CashCalculator<SystemClock> {
    pub(crate) fn new(limit: Decimal) -> Self {
        Self::from_calculator(Calculator::new(limit))
    }
}

impl<C: Clock> CashCalculator<C> {
    pub(crate) fn from_calculator(calculator: Calculator<C>) -> Self {
        Self {
            calculator,
            rates: RateTable::default(),
        }
    }

    pub(crate) fn with_rates(mut self, rates: RateTable) -> Self {
        self.rates = rates;
        self
    }

    pub(crate) fn add_record(&mut self, record: Record) {
        self.calculator.add_record(record);
    }

    pub(crate) fn calculator(&self) -> &Calculator<C> {
        &self.calculator
    }

    pub(crate) fn remaining_message(&self, currency: &str) -> String {
        cash_message(self.calculator.balance(), currency, &self.rates)
    }
}

/// Daily calorie limit.
#[derive(Debug, Clone)]
pub(crate) struct CaloriesCalculator<C: Clock = SystemClock> {
    calculator: Calculator<C>,
}

impl<C: Clock> CaloriesCalculator<C> {
    pub(crate) fn from_calculator(calculator: Calculator<C>) -> Self {
        Self { calculator }
    }

    pub(crate) fn add_record(&mut self, record: Record) {
        self.calculator.add_record(record);
    }

    pub(crate) fn calculator(&self) -> &Calculator<C> {
        &self.calculator
    }

    pub(crate) fn remaining_message(&self) -> String {
        calories_message(self.calculator.balance())
    }
}

/// Convert `balance` (in roubles) and round half-to-even to 2 places.
pub(crate) fn convert(balance: Decimal, currency: Currency, rates: &RateTable) -> Decimal {
    (balance / rates.rate(currency))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
        .normalize()
}

fn cash_message(balance: Decimal, code: &str, rates: &RateTable) -> String {
    // Validate before touching the rate table.
    let Some(currency) = Currency::parse(code) else {
        return INVALID_CURRENCY.to_string();
    };
    let converted = convert(balance, currency, rates);
    let name = currency.display_name();
    match converted.cmp(&Decimal::ZERO) {
        Ordering::Greater => format!("today you have {converted} {name} remaining."),
        Ordering::Less => format!("{NO_MONEY}: your debt is {} {name}.", converted.abs()),
        Ordering::Equal => NO_MONEY.to_string(),
    }
}

fn calories_message(left: Decimal) -> String {
    if left > Decimal::ZERO {
        format!(
            "you can eat something more today, but no more than {} kcal total.",
            left.normalize()
        )
    } else {
        ENOUGH_EATING.to_string()
    }
}

#[cfg(test)]
#[path = "goal_tests.rs"]
mod tests;
