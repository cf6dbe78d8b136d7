use super::event_kind::EventKind;
use crate::core::work_date::resolve_work_date;
use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::Serialize;

/// Storage format of `events.timestamp`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PunchEvent {
    pub id: i64,                  // ⇔ events.id (0 until persisted)
    pub owner: String,            // ⇔ events.owner
    pub kind: EventKind,          // ⇔ events.kind ('work_start', ...)
    pub timestamp: NaiveDateTime, // ⇔ events.timestamp (TEXT "YYYY-MM-DD HH:MM:SS")
    pub work_date: NaiveDate,     // ⇔ events.work_date (TEXT "YYYY-MM-DD")
    pub note: Option<String>,     // ⇔ events.note
    pub created_at: String,       // ⇔ events.created_at (TEXT, ISO8601)
}

impl PunchEvent {
    /// Build a not-yet-persisted event; the work date comes from the resolver.
    pub fn new(owner: &str, kind: EventKind, timestamp: NaiveDateTime) -> Self {
        Self {
            id: 0,
            owner: owner.to_string(),
            kind,
            timestamp,
            work_date: resolve_work_date(timestamp),
            note: None,
            created_at: Local::now().to_rfc3339(),
        }
    }

    pub fn with_note(mut self, note: Option<String>) -> Self {
        self.note = note.filter(|n| !n.trim().is_empty());
        self
    }

    /// Pin the event to an explicit work date (session replace only).
    pub fn anchored_to(mut self, work_date: NaiveDate) -> Self {
        self.work_date = work_date;
        self
    }

    pub fn timestamp_str(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn work_date_str(&self) -> String {
        self.work_date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Partial update of a stored event; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct EventPatch {
    pub kind: Option<EventKind>,
    pub timestamp: Option<NaiveDateTime>,
    pub note: Option<Option<String>>,
}

impl EventPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.timestamp.is_none() && self.note.is_none()
    }

    /// Apply the patch in memory, recomputing the work date when the
    /// timestamp moves.
    pub fn apply_to(&self, ev: &mut PunchEvent) {
        if let Some(kind) = self.kind {
            ev.kind = kind;
        }
        if let Some(ts) = self.timestamp {
            ev.timestamp = ts;
            ev.work_date = resolve_work_date(ts);
        }
        if let Some(note) = &self.note {
            ev.note = note.clone();
        }
    }
}
