//! Unified application error type.
//! All modules (db, core, cli, export) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Event #{0} not found")]
    EventNotFound(i64),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid event kind: {0}")]
    InvalidEventKind(String),

    #[error("Invalid hourly rate: {0}")]
    InvalidRate(String),

    // ---------------------------
    // Logic errors
    // ---------------------------
    #[error("No events found for date {0}")]
    NoEventsForDate(String),

    #[error("Invalid session index: {0}")]
    InvalidSessionIndex(usize),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Punch rejected: {}", .0.join("; "))]
    Rejected(Vec<String>),

    #[error("Punch cancelled by user")]
    Cancelled,

    #[error("Session replace failed, nothing was changed: {0}")]
    ReplaceFailed(String),

    /// The old events are gone but the replacement could not be written.
    #[error("Session replace failed after removing {} event(s): {reason}", removed.len())]
    PartialReplace { removed: Vec<i64>, reason: String },

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Export error: {0}")]
    Export(String),
}

pub type AppResult<T> = Result<T, AppError>;
