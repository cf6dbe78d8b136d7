pub mod add;
pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod punch;
pub mod rate;
pub mod status;

use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::store::SqliteStore;
use crate::errors::AppResult;
use crate::utils::time::parse_break_range;
use chrono::NaiveTime;

/// Open the configured database as an event store.
pub(crate) fn open_store(cfg: &Config) -> AppResult<SqliteStore> {
    let pool = DbPool::new(&cfg.database)?;
    Ok(SqliteStore::with_default_rate(pool, cfg.default_hourly_rate))
}

pub(crate) fn parse_breaks(raw: &[String]) -> AppResult<Vec<(NaiveTime, NaiveTime)>> {
    raw.iter().map(|b| parse_break_range(b)).collect()
}
