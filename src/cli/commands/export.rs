use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SystemClock;
use crate::core::logic::Core;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::parse_month;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        period,
        force,
    } = cmd
    {
        let (year, month) = parse_month(period.as_deref())?;
        let path = match file {
            Some(f) => expand_tilde(f),
            None => format.default_filename(year, month).into(),
        };

        let mut store = open_store(cfg)?;
        let report = Core::month_report(&mut store, &cfg.owner, year, month, SystemClock)?;
        ExportLogic::export(&report, *format, &path, *force)?;
    }
    Ok(())
}
