use crate::cli::commands::{open_store, parse_breaks};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::logic::Core;
use crate::core::replace::{ReplaceLogic, ReplaceRequest};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::parse_date_arg;
use crate::utils::time::parse_time_arg;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        date,
        session,
        start,
        end,
        next_day,
        breaks,
    } = cmd
    {
        let date = parse_date_arg(date)?;
        let req_start = parse_time_arg(start)?;
        let req_end = parse_time_arg(end)?;
        let breaks = parse_breaks(breaks)?;

        let mut store = open_store(cfg)?;
        let current = Core::session_at(&store, &cfg.owner, date, *session, SystemClock)?;

        let req = ReplaceRequest {
            work_date: date,
            start: req_start,
            end: req_end,
            end_is_next_day: *next_day,
            breaks,
            remove_ids: current.event_ids(),
        };

        let inserted = ReplaceLogic::replace_session(&mut store, &cfg.owner, &req, SystemClock)?.into_result()?;

        success(format!(
            "Session {session} on {date} replaced ({} events removed, {} written)",
            req.remove_ids.len(),
            inserted.len()
        ));
    }
    Ok(())
}
