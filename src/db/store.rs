//! Persistence seam between the core logic and SQLite.
//!
//! Core operations talk to an [`EventStore`]; [`SqliteStore`] is the
//! production implementation on top of [`DbPool`].

use crate::core::work_date::resolve_work_date;
use crate::db::log::ttlog_quiet;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::event::{EventPatch, PunchEvent};
use crate::models::settings::Settings;
use chrono::NaiveDate;
use tracing::debug;

/// Hourly rate given to owners that have no settings row yet.
pub const DEFAULT_HOURLY_RATE: f64 = 1500.0;

pub trait EventStore {
    /// Events of `owner` whose work date lies in `[from, to]`, ordered by
    /// timestamp.
    fn query_events(&self, owner: &str, from: NaiveDate, to: NaiveDate)
    -> AppResult<Vec<PunchEvent>>;

    /// Most recent event of `owner`, if any.
    fn latest_event(&self, owner: &str) -> AppResult<Option<PunchEvent>>;

    /// Persist events exactly as given, work date included.
    fn insert_anchored(&mut self, events: &[PunchEvent]) -> AppResult<Vec<PunchEvent>>;

    fn update_event(&mut self, id: i64, patch: &EventPatch) -> AppResult<PunchEvent>;

    /// Returns how many rows were removed.
    fn delete_events(&mut self, ids: &[i64]) -> AppResult<usize>;

    fn get_settings(&mut self, owner: &str) -> AppResult<Settings>;

    fn update_hourly_rate(&mut self, owner: &str, rate: f64) -> AppResult<Settings>;

    /// Persist new events, attributing each to its resolved work date.
    fn insert_events(&mut self, events: &[PunchEvent]) -> AppResult<Vec<PunchEvent>> {
        let resolved: Vec<PunchEvent> = events
            .iter()
            .cloned()
            .map(|mut e| {
                e.work_date = resolve_work_date(e.timestamp);
                e
            })
            .collect();
        self.insert_anchored(&resolved)
    }

    /// Remove `remove` and write `insert` in their place.
    ///
    /// Runs delete first. When the insert then fails the old events are
    /// already gone, which is reported as [`AppError::PartialReplace`].
    fn replace_events(&mut self, remove: &[i64], insert: &[PunchEvent]) -> AppResult<Vec<PunchEvent>> {
        self.delete_events(remove)?;
        self.insert_anchored(insert)
            .map_err(|e| AppError::PartialReplace {
                removed: remove.to_vec(),
                reason: e.to_string(),
            })
    }
}

pub struct SqliteStore {
    pub pool: DbPool,
    default_rate: f64,
}

impl SqliteStore {
    pub fn new(pool: DbPool) -> Self {
        Self::with_default_rate(pool, DEFAULT_HOURLY_RATE)
    }

    pub fn with_default_rate(pool: DbPool, default_rate: f64) -> Self {
        Self { pool, default_rate }
    }
}

fn ids_label(ids: &[i64]) -> String {
    ids.iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

impl EventStore for SqliteStore {
    fn query_events(
        &self,
        owner: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> AppResult<Vec<PunchEvent>> {
        queries::load_events(&self.pool.conn, owner, from, to)
    }

    fn latest_event(&self, owner: &str) -> AppResult<Option<PunchEvent>> {
        queries::load_latest_event(&self.pool.conn, owner)
    }

    fn insert_anchored(&mut self, events: &[PunchEvent]) -> AppResult<Vec<PunchEvent>> {
        let tx = self.pool.conn.transaction()?;
        let mut out = Vec::with_capacity(events.len());
        for ev in events {
            let id = queries::insert_event(&tx, ev)?;
            out.push(PunchEvent { id, ..ev.clone() });
        }
        tx.commit()?;

        for ev in &out {
            ttlog_quiet(
                &self.pool.conn,
                "add",
                &ev.id.to_string(),
                &format!("{} at {}", ev.kind, ev.timestamp_str()),
            );
        }
        debug!(count = out.len(), "events inserted");
        Ok(out)
    }

    fn update_event(&mut self, id: i64, patch: &EventPatch) -> AppResult<PunchEvent> {
        let mut ev =
            queries::load_event(&self.pool.conn, id)?.ok_or(AppError::EventNotFound(id))?;
        patch.apply_to(&mut ev);
        queries::update_event_row(&self.pool.conn, &ev)?;

        ttlog_quiet(
            &self.pool.conn,
            "edit",
            &id.to_string(),
            &format!("{} at {}", ev.kind, ev.timestamp_str()),
        );
        Ok(ev)
    }

    fn delete_events(&mut self, ids: &[i64]) -> AppResult<usize> {
        let tx = self.pool.conn.transaction()?;
        let mut removed = 0;
        for id in ids {
            removed += queries::delete_event(&tx, *id)?;
        }
        tx.commit()?;

        debug!(removed, "events deleted");
        Ok(removed)
    }

    fn get_settings(&mut self, owner: &str) -> AppResult<Settings> {
        if let Some(s) = queries::load_settings(&self.pool.conn, owner)? {
            return Ok(s);
        }

        queries::upsert_settings(&self.pool.conn, owner, self.default_rate)?;
        debug!(owner, rate = self.default_rate, "settings provisioned");

        queries::load_settings(&self.pool.conn, owner)?
            .ok_or_else(|| AppError::Store(format!("settings for '{owner}' were not created")))
    }

    fn update_hourly_rate(&mut self, owner: &str, rate: f64) -> AppResult<Settings> {
        if !rate.is_finite() || rate < 0.0 {
            return Err(AppError::InvalidRate(rate.to_string()));
        }

        queries::upsert_settings(&self.pool.conn, owner, rate)?;
        ttlog_quiet(&self.pool.conn, "rate", owner, &format!("hourly rate set to {rate}"));
        self.get_settings(owner)
    }

    /// Delete and insert inside a single transaction.
    fn replace_events(&mut self, remove: &[i64], insert: &[PunchEvent]) -> AppResult<Vec<PunchEvent>> {
        let tx = self.pool.conn.transaction()?;

        for id in remove {
            queries::delete_event(&tx, *id)?;
        }

        let mut out = Vec::with_capacity(insert.len());
        for ev in insert {
            let id = queries::insert_event(&tx, ev)?;
            out.push(PunchEvent { id, ..ev.clone() });
        }

        tx.commit()?;

        ttlog_quiet(
            &self.pool.conn,
            "replace",
            &ids_label(remove),
            &format!("replaced by {}", ids_label(&out.iter().map(|e| e.id).collect::<Vec<_>>())),
        );
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event_kind::EventKind;
    use chrono::NaiveDateTime;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn store() -> SqliteStore {
        SqliteStore::new(DbPool::in_memory().unwrap())
    }

    #[test]
    fn insert_assigns_ids_and_resolves_work_date() {
        let mut s = store();
        let ev = PunchEvent::new("me", EventKind::WorkEnd, at("2025-05-02 02:00"))
            .anchored_to(d("2025-05-02"));
        let saved = s.insert_events(&[ev]).unwrap();

        assert!(saved[0].id > 0);
        assert_eq!(saved[0].work_date, d("2025-05-01"));

        let got = s.query_events("me", d("2025-05-01"), d("2025-05-01")).unwrap();
        assert_eq!(got, saved);
    }

    #[test]
    fn query_is_scoped_by_owner_and_range() {
        let mut s = store();
        s.insert_events(&[
            PunchEvent::new("me", EventKind::WorkStart, at("2025-05-01 09:00")),
            PunchEvent::new("you", EventKind::WorkStart, at("2025-05-01 09:00")),
            PunchEvent::new("me", EventKind::WorkStart, at("2025-06-01 09:00")),
        ])
        .unwrap();

        let got = s.query_events("me", d("2025-05-01"), d("2025-05-31")).unwrap();
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].owner, "me");
    }

    #[test]
    fn update_recomputes_work_date_and_rejects_unknown_id() {
        let mut s = store();
        let saved = s
            .insert_events(&[PunchEvent::new("me", EventKind::WorkEnd, at("2025-05-01 23:00"))])
            .unwrap();

        let patch = EventPatch {
            timestamp: Some(at("2025-05-02 03:00")),
            ..Default::default()
        };
        let ev = s.update_event(saved[0].id, &patch).unwrap();
        assert_eq!(ev.work_date, d("2025-05-01"));

        let patch = EventPatch {
            timestamp: Some(at("2025-05-02 08:00")),
            ..Default::default()
        };
        assert_eq!(s.update_event(saved[0].id, &patch).unwrap().work_date, d("2025-05-02"));

        assert!(matches!(
            s.update_event(9999, &patch),
            Err(AppError::EventNotFound(9999))
        ));
    }

    #[test]
    fn settings_are_provisioned_with_default_rate() {
        let mut s = store();
        let st = s.get_settings("me").unwrap();
        assert_eq!(st.hourly_rate, DEFAULT_HOURLY_RATE);

        let st = s.update_hourly_rate("me", 2000.0).unwrap();
        assert_eq!(st.hourly_rate, 2000.0);
        assert_eq!(s.get_settings("me").unwrap().hourly_rate, 2000.0);

        assert!(matches!(
            s.update_hourly_rate("me", -1.0),
            Err(AppError::InvalidRate(_))
        ));
    }

    #[test]
    fn replace_keeps_anchored_work_date() {
        let mut s = store();
        let old = s
            .insert_events(&[PunchEvent::new("me", EventKind::WorkStart, at("2025-05-01 09:00"))])
            .unwrap();

        let new = vec![
            PunchEvent::new("me", EventKind::WorkStart, at("2025-05-01 22:00")),
            PunchEvent::new("me", EventKind::WorkEnd, at("2025-05-02 06:00"))
                .anchored_to(d("2025-05-01")),
        ];
        let saved = s.replace_events(&[old[0].id], &new).unwrap();
        assert_eq!(saved.len(), 2);

        let got = s.query_events("me", d("2025-05-01"), d("2025-05-02")).unwrap();
        assert_eq!(got.len(), 2);
        assert!(got.iter().all(|e| e.work_date == d("2025-05-01")));
    }
}
