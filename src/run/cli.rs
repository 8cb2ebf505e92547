use anyhow::Result;
use rust_decimal::Decimal;

use super::Options;
use crate::calculator::{Calculator, CaloriesCalculator, CashCalculator, Currency};
use crate::models::Record;

pub(crate) fn as_cli(args: &[String]) -> Result<()> {
    let Some(command) = args.get(1) else {
        print_usage();
        return Ok(());
    };
    let rest = &args[2..];
    match command.as_str() {
        "cash" => print_report(cash_report(&Options::parse(rest)?)),
        "calories" | "kcal" => print_report(calories_report(&Options::parse(rest)?)),
        "stats" | "s" => print_report(stats_report(&Options::parse(rest)?)),
        "demo" => print_report(demo_report()),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("dailylimit {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

pub(crate) fn print_usage() {
    println!("dailylimit - daily spending and calorie limits");
    println!();
    println!("Usage: dailylimit <command> <limit> [options]");
    println!();
    println!("Commands:");
    println!("  cash <limit>                  Money left today (limit in rub)");
    println!("  calories <limit>              Calories left today");
    println!("  stats <limit>                 Today, last 7 days and balance");
    println!("  demo                          Run the built-in three-record example");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Options:");
    println!("  --record, -r <amt>,<comment>[,<DD.MM.YYYY>]   Add a record (repeatable)");
    println!("                                Quote comments containing commas: 12,\"tea, milk\"");
    println!("  --file, -f <records.csv>      Load amount,comment[,date] rows (repeatable)");
    println!("  --currency, -c <code>         eur, usd or rub (default: rub)");
    println!("  --rates eur=<r>,usd=<r>       Override conversion rates");
    println!("  --today <DD.MM.YYYY>          Pretend today is this date");
    println!("  --calories                    stats: report calories instead of cash");
    println!();
    println!("Set DAILYLIMIT_LOG=debug for diagnostics on stderr.");
}

fn print_report(report: Result<String>) -> Result<()> {
    println!("{}", report?);
    Ok(())
}

pub(crate) fn cash_report(opts: &Options) -> Result<String> {
    let clock = opts.clock();
    let calc = opts.build_calculator(clock.as_ref())?;
    tracing::debug!("cash goal, currency {}", opts.currency);
    let cash = CashCalculator::from_calculator(calc).with_rates(opts.rates.clone());
    Ok(cash.remaining_message(&opts.currency))
}

pub(crate) fn calories_report(opts: &Options) -> Result<String> {
    let clock = opts.clock();
    let mut calories =
        CaloriesCalculator::from_calculator(Calculator::with_clock(opts.limit, clock.as_ref()));
    for record in opts.load_records(clock.as_ref())? {
        calories.add_record(record);
    }
    tracing::debug!(
        "calories goal, {} eaten today",
        calories.calculator().today_total()
    );
    Ok(calories.remaining_message())
}

pub(crate) fn stats_report(opts: &Options) -> Result<String> {
    let clock = opts.clock();
    let calc = opts.build_calculator(clock.as_ref())?;
    let goal = opts.goal();
    tracing::debug!("stats for {goal:?}");

    let mut lines = vec![
        format!("  Daily limit:  {}", calc.limit()),
        format!("  Today:        {}", calc.today_total()),
        format!("  Last 7 days:  {}", calc.week_total()),
        format!("  Balance:      {}", calc.balance()),
    ];

    if !calc.records().is_empty() {
        lines.push(String::new());
        lines.push("Records:".into());
        for record in calc.records() {
            lines.push(format!(
                "  {}  {:>10}  {}",
                record.formatted_date(),
                record.amount(),
                record.comment()
            ));
        }
    }

    lines.push(String::new());
    lines.push(goal.message(&calc));
    Ok(lines.join("\n"))
}

/// Limit 1000 rub, coffee and lunch today, a bar tab from 2019.
pub(crate) fn demo_report() -> Result<String> {
    let mut cash = CashCalculator::new(Decimal::new(1000, 0));
    for (amount, comment, date) in [
        (145, "coffee", None),
        (300, "lunch", None),
        (3000, "bar", Some("08.11.2019")),
    ] {
        let record = Record::new(Decimal::from(amount), comment, date, cash.calculator().clock())?;
        cash.add_record(record);
    }
    Ok(cash.remaining_message(Currency::Rub.code()))
}
