use crate::core::validator::DEFAULT_LONG_SHIFT_HOURS;
use crate::db::store::DEFAULT_HOURLY_RATE;
use crate::errors::{AppError, AppResult};
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_owner")]
    pub owner: String,
    #[serde(default = "default_hourly_rate")]
    pub default_hourly_rate: f64,
    #[serde(default = "default_long_shift_hours")]
    pub long_shift_hours: f64,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}

fn default_owner() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "default".to_string())
}

fn default_hourly_rate() -> f64 {
    DEFAULT_HOURLY_RATE
}

fn default_long_shift_hours() -> f64 {
    DEFAULT_LONG_SHIFT_HOURS
}

fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            owner: default_owner(),
            default_hourly_rate: default_hourly_rate(),
            long_shift_hours: default_long_shift_hours(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Platform configuration directory (`~/.config/shiftclock` on Linux).
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shiftclock")
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("shiftclock.conf")
    }

    pub fn database_file() -> PathBuf {
        Self::config_dir().join("shiftclock.sqlite")
    }

    /// Load the configuration file, or the defaults when there is none.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut cfg: Config = serde_yaml::from_str(&content)?;
        cfg.database = expand_tilde(&cfg.database).to_string_lossy().to_string();
        cfg.check()?;
        Ok(cfg)
    }

    fn check(&self) -> AppResult<()> {
        if self.owner.trim().is_empty() {
            return Err(AppError::Config("owner must not be empty".into()));
        }
        if !self.default_hourly_rate.is_finite() || self.default_hourly_rate < 0.0 {
            return Err(AppError::Config(format!(
                "default_hourly_rate must be a non-negative number, got {}",
                self.default_hourly_rate
            )));
        }
        if self.long_shift_hours <= 0.0 {
            return Err(AppError::Config(format!(
                "long_shift_hours must be positive, got {}",
                self.long_shift_hours
            )));
        }
        Ok(())
    }

    /// First character of `separator_char`, used to draw table rules.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, serde_yaml::to_string(self)?)?;
        Ok(())
    }

    /// Resolve a database name given to `init`: absolute paths are kept,
    /// bare names land in the configuration directory.
    pub fn resolve_db_path(name: Option<&str>) -> PathBuf {
        match name {
            Some(n) => {
                let p = expand_tilde(n);
                if p.is_absolute() {
                    p
                } else {
                    Self::config_dir().join(p)
                }
            }
            None => Self::database_file(),
        }
    }
}
