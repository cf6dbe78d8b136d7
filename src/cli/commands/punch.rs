use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{Clock, SystemClock};
use crate::core::punch::{PunchLogic, PunchRequest};
use crate::errors::{AppError, AppResult};
use crate::models::event_kind::EventKind;
use crate::ui::messages::{confirm, success, warning};
use crate::utils::time::parse_punch_at;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Punch { kind, at, note, yes } = cmd {
        let kind = EventKind::ek_from_str(kind)
            .ok_or_else(|| AppError::InvalidEventKind(kind.clone()))?;

        let now = SystemClock.now();
        let at = match at {
            Some(s) => parse_punch_at(s, now.date())?,
            None => now,
        };

        let mut store = open_store(cfg)?;
        let req = PunchRequest {
            kind,
            at,
            note: note.clone(),
        };

        let saved = PunchLogic::punch(&mut store, &cfg.owner, &req, cfg.long_shift_hours, SystemClock, |warnings| {
            for w in warnings {
                warning(&w.message);
            }
            *yes || confirm("Record this punch anyway?")
        })?;

        success(format!(
            "{} recorded at {} (work date {})",
            saved.kind.label(),
            saved.timestamp.format("%Y-%m-%d %H:%M"),
            saved.work_date
        ));
    }
    Ok(())
}
