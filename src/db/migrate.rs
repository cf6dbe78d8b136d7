//! Versioned schema migrations.
//!
//! Every migration runs once, inside its own transaction, and is recorded in
//! `schema_migrations`. New schema changes are appended to [`MIGRATIONS`].

use crate::errors::{AppError, AppResult};
use chrono::Local;
use rusqlite::{Connection, params};
use tracing::info;

struct Migration {
    version: i64,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        name: "create_events",
        sql: r#"
        CREATE TABLE IF NOT EXISTS events (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            owner       TEXT NOT NULL,
            kind        TEXT NOT NULL
                        CHECK(kind IN ('work_start','work_end','break_start','break_end')),
            timestamp   TEXT NOT NULL,
            work_date   TEXT NOT NULL,
            note        TEXT,
            created_at  TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_events_owner_date
            ON events(owner, work_date, timestamp);
        "#,
    },
    Migration {
        version: 2,
        name: "create_settings",
        sql: r#"
        CREATE TABLE IF NOT EXISTS settings (
            owner        TEXT PRIMARY KEY,
            hourly_rate  REAL NOT NULL CHECK(hourly_rate >= 0),
            updated_at   TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: 3,
        name: "create_log",
        sql: r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    },
];

fn ensure_migrations_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY,
            name        TEXT NOT NULL,
            applied_at  TEXT NOT NULL
        );
        "#,
    )
}

pub fn current_version(conn: &Connection) -> AppResult<i64> {
    ensure_migrations_table(conn)?;
    let v: i64 = conn.query_row(
        "SELECT IFNULL(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(v)
}

/// Apply every migration newer than the recorded version.
/// Returns how many were applied.
pub fn run_pending_migrations(conn: &mut Connection) -> AppResult<usize> {
    let from = current_version(conn)?;
    let mut applied = 0;

    for m in MIGRATIONS.iter().filter(|m| m.version > from) {
        let tx = conn.transaction()?;
        tx.execute_batch(m.sql)
            .map_err(|e| AppError::Migration(format!("{} failed: {e}", m.name)))?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name, applied_at) VALUES (?1, ?2, ?3)",
            params![m.version, m.name, Local::now().to_rfc3339()],
        )?;
        tx.commit()?;

        info!(version = m.version, name = m.name, "migration applied");
        applied += 1;
    }

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(run_pending_migrations(&mut conn).unwrap(), MIGRATIONS.len());
        assert_eq!(run_pending_migrations(&mut conn).unwrap(), 0);
        assert_eq!(current_version(&conn).unwrap(), 3);
    }

    #[test]
    fn kind_is_checked_by_schema() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&mut conn).unwrap();
        let res = conn.execute(
            "INSERT INTO events (owner, kind, timestamp, work_date, created_at)
             VALUES ('me', 'lunch', '2025-01-01 09:00:00', '2025-01-01', '')",
            [],
        );
        assert!(res.is_err());
    }
}
