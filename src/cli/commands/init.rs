use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// Creates the configuration file (skipped in test mode) and the
/// database, then applies all pending migrations.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let db_path = match &cli.db {
        Some(custom) => Config::resolve_db_path(Some(custom.as_str())),
        None => std::path::PathBuf::from(&cfg.database),
    };
    if let Some(dir) = db_path.parent()
        && !dir.as_os_str().is_empty()
    {
        std::fs::create_dir_all(dir)?;
    }
    let db_str = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing shiftclock…");

    if !cli.test {
        let file_cfg = Config {
            database: db_str.clone(),
            ..cfg.clone()
        };
        let path = Config::config_file();
        file_cfg.save_to(&path)?;
        println!("📄 Config file : {}", path.display());
    }

    let pool = DbPool::new(&db_str)?;
    println!("🗄️  Database    : {}", db_str);

    ttlog_quiet(&pool.conn, "init", "", &format!("Database initialized at {db_str}"));

    success("shiftclock initialization completed!");
    Ok(())
}
