use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::logic::{Core, MonthReport};
use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::models::event::PunchEvent;
use crate::utils::colors::{RESET, colorize_optional, colorize_start_end};
use crate::utils::date::{month_bounds, parse_month};
use crate::utils::formatting::{bold, describe_status, format_money};
use crate::utils::table::Table;
use crate::utils::time::{format_clock, format_minutes};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { period, events } = cmd {
        let (year, month) = parse_month(period.as_deref())?;
        let mut store = open_store(cfg)?;

        if *events {
            let (from, to) = month_bounds(year, month)?;
            let evs = store.query_events(&cfg.owner, from, to)?;
            print_events(&evs, cfg.separator());
            return Ok(());
        }

        let report = Core::month_report(&mut store, &cfg.owner, year, month, SystemClock)?;
        print_sessions(&report, cfg.separator());
    }
    Ok(())
}

fn print_events(events: &[PunchEvent], sep: char) {
    if events.is_empty() {
        println!("No events for this period.");
        return;
    }

    let mut table = Table::new(&["id", "work date", "time", "kind", "note"], sep);
    for ev in events {
        table.add_row(vec![
            ev.id.to_string(),
            ev.work_date_str(),
            format_clock(ev.timestamp, ev.work_date),
            ev.kind.label().to_string(),
            colorize_optional(ev.note.as_deref().unwrap_or("-")),
        ]);
    }
    print!("{}", table.render());
}

fn print_sessions(report: &MonthReport, sep: char) {
    println!(
        "{}\n",
        bold(&format!("Sessions {}-{:02} ({})", report.year, report.month, report.owner))
    );

    if report.sessions.is_empty() {
        println!("No sessions for this period.");
        return;
    }

    let mut table = Table::new(&["date", "#", "status", "start", "end", "break", "work"], sep);
    for day in report.days() {
        for (i, s) in day.sessions.iter().enumerate() {
            let (label, color) = describe_status(s.status);
            let end = s
                .end
                .map(|e| format_clock(e, s.work_date))
                .unwrap_or_else(|| "-".to_string());

            table.add_row(vec![
                if i == 0 { day.work_date.to_string() } else { String::new() },
                (i + 1).to_string(),
                format!("{color}{label}{RESET}"),
                colorize_start_end(&format_clock(s.start, s.work_date), true),
                colorize_start_end(&end, false),
                colorize_optional(&format_minutes(s.break_minutes)),
                format_minutes(s.work_minutes),
            ]);
        }
    }
    print!("{}", table.render());

    println!();
    println!(
        "{} {} in {} sessions",
        bold("Total:"),
        format_minutes(report.totals.total_work_minutes),
        report.totals.session_count
    );
    println!(
        "{} {} (rate {}/h)",
        bold("Estimated earnings:"),
        format_money(report.earnings),
        format_money(report.hourly_rate)
    );
}
