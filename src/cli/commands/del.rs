use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::del::DeleteLogic;
use crate::db::log::ttlog_quiet;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::date::parse_date_arg;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { session, date } = cmd {
        let date = parse_date_arg(date)?;
        let mut store = open_store(cfg)?;

        let removed = DeleteLogic::apply(&mut store, &cfg.owner, date, *session, SystemClock)?;

        let what = match session {
            Some(n) => format!("session {n}"),
            None => "all sessions".to_string(),
        };
        ttlog_quiet(
            &store.pool.conn,
            "del",
            &date.to_string(),
            &format!("{what}: {removed} events removed"),
        );
        info(format!("Deleted {what} for {date} ({removed} events)"));
    }
    Ok(())
}
