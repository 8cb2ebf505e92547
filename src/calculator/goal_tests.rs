#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::clock::FixedClock;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn cash_with(limit: Decimal, amounts: &[Decimal]) -> CashCalculator<FixedClock> {
    let mut cash = CashCalculator::from_calculator(Calculator::with_clock(limit, FixedClock(today())));
    for amount in amounts {
        cash.add_record(Record::dated(*amount, "", today()));
    }
    cash
}

fn coffee_lunch_bar(limit: Decimal) -> CashCalculator<FixedClock> {
    let clock = FixedClock(today());
    let mut cash = CashCalculator::from_calculator(Calculator::with_clock(limit, clock));
    cash.add_record(Record::new(dec!(145), "coffee", None, &clock).unwrap());
    cash.add_record(Record::new(dec!(300), "lunch", None, &clock).unwrap());
    cash.add_record(Record::new(dec!(3000), "bar", Some("08.11.2019"), &clock).unwrap());
    cash
}

// ── CashCalculator ────────────────────────────────────────────

#[test]
fn test_cash_remaining_rub() {
    let cash = coffee_lunch_bar(dec!(1000));
    assert_eq!(cash.calculator().today_total(), dec!(445));
    assert_eq!(cash.calculator().balance(), dec!(555));
    assert_eq!(cash.remaining_message("rub"), "today you have 555 руб remaining.");
}

#[test]
fn test_cash_remaining_eur_and_usd() {
    let cash = coffee_lunch_bar(dec!(1000));
    // 555 / 89.91 = 6.1728..., 555 / 73.70 = 7.5305...
    assert_eq!(cash.remaining_message("eur"), "today you have 6.17 Euro remaining.");
    assert_eq!(cash.remaining_message("usd"), "today you have 7.53 USD remaining.");
}

#[test]
fn test_cash_debt() {
    let cash = coffee_lunch_bar(dec!(400));
    assert_eq!(cash.calculator().balance(), dec!(-45));
    assert_eq!(
        cash.remaining_message("rub"),
        "no money left, hang on: your debt is 45 руб."
    );
}

#[test]
fn test_cash_exactly_spent() {
    let cash = cash_with(dec!(445), &[dec!(145), dec!(300)]);
    assert_eq!(cash.remaining_message("rub"), "no money left, hang on");
    assert_eq!(cash.remaining_message("eur"), "no money left, hang on");
}

#[test]
fn test_cash_invalid_currency() {
    assert_eq!(coffee_lunch_bar(dec!(1000)).remaining_message("xyz"), INVALID_CURRENCY);
    assert_eq!(cash_with(dec!(0), &[]).remaining_message("xyz"), INVALID_CURRENCY);
    assert_eq!(cash_with(dec!(10), &[dec!(50)]).remaining_message("RUB"), INVALID_CURRENCY);
}

#[test]
fn test_cash_custom_rates() {
    let rates = RateTable::default().with_rate(Currency::Usd, dec!(100)).unwrap();
    let cash = cash_with(dec!(1000), &[dec!(500)]).with_rates(rates);
    assert_eq!(cash.remaining_message("usd"), "today you have 5 USD remaining.");
}

// ── rounding ──────────────────────────────────────────────────

#[test]
fn test_convert_rounds_half_to_even() {
    let rates = RateTable::default();
    assert_eq!(convert(dec!(0.125), Currency::Rub, &rates), dec!(0.12));
    assert_eq!(convert(dec!(0.135), Currency::Rub, &rates), dec!(0.14));
    assert_eq!(convert(dec!(-0.125), Currency::Rub, &rates), dec!(-0.12));
}

#[test]
fn test_convert_drops_trailing_zeros() {
    let rates = RateTable::default();
    assert_eq!(convert(dec!(555.00), Currency::Rub, &rates).to_string(), "555");
    assert_eq!(convert(dec!(0.50), Currency::Rub, &rates).to_string(), "0.5");
}

#[test]
fn test_half_cent_balance_rounds_to_zero() {
    let cash = cash_with(dec!(0.005), &[]);
    assert_eq!(cash.remaining_message("rub"), "no money left, hang on");

    let cash = cash_with(dec!(0), &[dec!(0.005)]);
    assert_eq!(cash.remaining_message("rub"), "no money left, hang on");
}

#[test]
fn test_fractional_remaining_message() {
    let cash = cash_with(dec!(0.135), &[]);
    assert_eq!(cash.remaining_message("rub"), "today you have 0.14 руб remaining.");
}

// ── CaloriesCalculator ────────────────────────────────────────

fn calories_with(limit: Decimal, amounts: &[Decimal]) -> CaloriesCalculator<FixedClock> {
    let mut calories =
        CaloriesCalculator::from_calculator(Calculator::with_clock(limit, FixedClock(today())));
    for amount in amounts {
        calories.add_record(Record::dated(*amount, "", today()));
    }
    calories
}

#[test]
fn test_calories_remaining() {
    let calories = calories_with(dec!(2000), &[dec!(1200), dec!(300)]);
    assert_eq!(
        calories.remaining_message(),
        "you can eat something more today, but no more than 500 kcal total."
    );
}

#[test]
fn test_calories_over_limit() {
    let calories = calories_with(dec!(2000), &[dec!(2500)]);
    assert_eq!(calories.calculator().balance(), dec!(-500));
    assert_eq!(calories.remaining_message(), ENOUGH_EATING);
}

#[test]
fn test_calories_exactly_at_limit() {
    let calories = calories_with(dec!(2000), &[dec!(2000)]);
    assert_eq!(calories.remaining_message(), "that's enough eating!");
}

#[test]
fn test_calories_ignore_other_days() {
    let mut calories = calories_with(dec!(2000), &[]);
    calories.add_record(Record::dated(dec!(5000), "feast", today().pred_opt().unwrap()));
    assert_eq!(
        calories.remaining_message(),
        "you can eat something more today, but no more than 2000 kcal total."
    );
}

// ── Goal ──────────────────────────────────────────────────────

#[test]
fn test_goal_dispatch() {
    let cash = coffee_lunch_bar(dec!(1000));
    let calc = cash.calculator();

    let goal = Goal::Cash {
        currency: "rub".into(),
        rates: RateTable::default(),
    };
    assert_eq!(goal.message(calc), cash.remaining_message("rub"));

    let goal = Goal::Calories;
    assert_eq!(
        goal.message(calc),
        "you can eat something more today, but no more than 555 kcal total."
    );
}
