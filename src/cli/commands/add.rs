use crate::cli::commands::{open_store, parse_breaks};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::clock::SystemClock;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::parse_date_arg;
use crate::utils::time::parse_time_arg;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        end,
        next_day,
        breaks,
    } = cmd
    {
        let date = parse_date_arg(date)?;
        let start = parse_time_arg(start)?;
        let end = parse_time_arg(end)?;
        let breaks = parse_breaks(breaks)?;

        let mut store = open_store(cfg)?;
        let saved = AddLogic::apply(
            &mut store,
            &cfg.owner,
            date,
            start,
            end,
            *next_day,
            breaks,
            SystemClock,
        )?;

        success(format!(
            "Session added on {date}: {} events recorded",
            saved.len()
        ));
    }
    Ok(())
}
