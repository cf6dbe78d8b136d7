use crate::errors::{AppError, AppResult};
use crate::models::event::{PunchEvent, TIMESTAMP_FORMAT};
use crate::models::event_kind::EventKind;
use crate::models::settings::Settings;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

pub fn map_row(row: &Row) -> Result<PunchEvent> {
    let ts_str: String = row.get("timestamp")?;
    let date_str: String = row.get("work_date")?;
    let kind_str: String = row.get("kind")?;

    let timestamp = NaiveDateTime::parse_from_str(&ts_str, TIMESTAMP_FORMAT)
        .map_err(|_| conversion_error(3, AppError::InvalidTime(ts_str.clone())))?;

    let work_date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d")
        .map_err(|_| conversion_error(4, AppError::InvalidDate(date_str.clone())))?;

    let kind = EventKind::from_db_str(&kind_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidEventKind(kind_str.clone())))?;

    Ok(PunchEvent {
        id: row.get("id")?,
        owner: row.get("owner")?,
        kind,
        timestamp,
        work_date,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    })
}

/// Events of one owner whose work date lies in `[from, to]`.
pub fn load_events(
    conn: &Connection,
    owner: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> AppResult<Vec<PunchEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, owner, kind, timestamp, work_date, note, created_at
         FROM events
         WHERE owner = ?1 AND work_date BETWEEN ?2 AND ?3
         ORDER BY timestamp ASC, id ASC",
    )?;

    let rows = stmt.query_map(
        params![
            owner,
            from.format("%Y-%m-%d").to_string(),
            to.format("%Y-%m-%d").to_string()
        ],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Most recent event of an owner, whatever its work date.
pub fn load_latest_event(conn: &Connection, owner: &str) -> AppResult<Option<PunchEvent>> {
    let ev = conn
        .query_row(
            "SELECT id, owner, kind, timestamp, work_date, note, created_at
             FROM events
             WHERE owner = ?1
             ORDER BY timestamp DESC, id DESC
             LIMIT 1",
            params![owner],
            map_row,
        )
        .optional()?;
    Ok(ev)
}

pub fn load_event(conn: &Connection, id: i64) -> AppResult<Option<PunchEvent>> {
    let ev = conn
        .query_row(
            "SELECT id, owner, kind, timestamp, work_date, note, created_at
             FROM events WHERE id = ?1",
            params![id],
            map_row,
        )
        .optional()?;
    Ok(ev)
}

/// Insert the event as given (work date included) and return its new id.
pub fn insert_event(conn: &Connection, ev: &PunchEvent) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO events (owner, kind, timestamp, work_date, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            ev.owner,
            ev.kind.to_db_str(),
            ev.timestamp_str(),
            ev.work_date_str(),
            ev.note,
            ev.created_at,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update_event_row(conn: &Connection, ev: &PunchEvent) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE events
         SET kind = ?1, timestamp = ?2, work_date = ?3, note = ?4
         WHERE id = ?5",
        params![
            ev.kind.to_db_str(),
            ev.timestamp_str(),
            ev.work_date_str(),
            ev.note,
            ev.id
        ],
    )?;

    if changed == 0 {
        return Err(AppError::EventNotFound(ev.id));
    }
    Ok(())
}

pub fn delete_event(conn: &Connection, id: i64) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM events WHERE id = ?1", params![id])?)
}

pub fn load_settings(conn: &Connection, owner: &str) -> AppResult<Option<Settings>> {
    let s = conn
        .query_row(
            "SELECT owner, hourly_rate, updated_at FROM settings WHERE owner = ?1",
            params![owner],
            |row| {
                Ok(Settings {
                    owner: row.get(0)?,
                    hourly_rate: row.get(1)?,
                    updated_at: row.get(2)?,
                })
            },
        )
        .optional()?;
    Ok(s)
}

/// Insert or overwrite the hourly rate of an owner.
pub fn upsert_settings(conn: &Connection, owner: &str, hourly_rate: f64) -> AppResult<()> {
    conn.execute(
        "INSERT INTO settings (owner, hourly_rate, updated_at)
         VALUES (?1, ?2, ?3)
         ON CONFLICT(owner) DO UPDATE SET
             hourly_rate = excluded.hourly_rate,
             updated_at  = excluded.updated_at",
        params![owner, hourly_rate, Local::now().to_rfc3339()],
    )?;
    Ok(())
}
