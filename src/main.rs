mod calculator;
mod clock;
mod import;
mod models;
mod run;

use anyhow::Result;

const LOG_ENV: &str = "DAILYLIMIT_LOG";

fn main() -> Result<()> {
    init_logging();
    let args: Vec<String> = std::env::args().collect();
    run::as_cli(&args)
}

/// Diagnostics go to stderr so stdout carries only the report.
fn init_logging() {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<tracing::Level>().ok())
        .unwrap_or(tracing::Level::WARN);
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}
