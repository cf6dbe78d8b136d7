use crate::cli::commands::open_store;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::formatting::format_money;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Rate { value } = cmd {
        let mut store = open_store(cfg)?;

        match value {
            Some(rate) => {
                let s = store.update_hourly_rate(&cfg.owner, *rate)?;
                success(format!(
                    "Hourly rate for {} set to {}",
                    s.owner,
                    format_money(s.hourly_rate)
                ));
            }
            None => {
                let s = store.get_settings(&cfg.owner)?;
                println!("Hourly rate for {}: {}", s.owner, format_money(s.hourly_rate));
            }
        }
    }
    Ok(())
}
