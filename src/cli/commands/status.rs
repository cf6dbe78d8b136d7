use crate::cli::commands::open_store;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::logic::Core;
use crate::core::punch::PunchLogic;
use crate::errors::AppResult;
use crate::utils::formatting::{bold, describe_state, format_money};
use crate::utils::time::{format_hours, format_minutes};
use chrono::Datelike;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let mut store = open_store(cfg)?;
    let now = SystemClock.now();

    let state = PunchLogic::state(&store, &cfg.owner)?;
    let report = Core::month_report(&mut store, &cfg.owner, now.year(), now.month(), SystemClock)?;

    println!("{} {}", bold("Owner:"), cfg.owner);
    println!("{} {}", bold("State:"), describe_state(state.state));
    match state.last {
        Some((kind, at)) => println!(
            "{} {} at {}",
            bold("Last punch:"),
            kind.label(),
            at.format("%Y-%m-%d %H:%M")
        ),
        None => println!("{} none", bold("Last punch:")),
    }

    println!();
    println!(
        "{} {}-{:02}: {} sessions, {} worked ({} h)",
        bold("Month"),
        report.year,
        report.month,
        report.totals.session_count,
        format_minutes(report.totals.total_work_minutes),
        format_hours(report.totals.total_work_minutes)
    );
    println!(
        "{} {} (rate {}/h)",
        bold("Estimated earnings:"),
        format_money(report.earnings),
        format_money(report.hourly_rate)
    );
    Ok(())
}
