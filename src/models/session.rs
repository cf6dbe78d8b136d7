use super::event::PunchEvent;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Closed by a work end.
    Complete,
    /// Still open at the end of the event stream.
    InProgress,
    /// Left open when another work start arrived on the same work date.
    Superseded,
}

impl SessionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            SessionStatus::Complete => "complete",
            SessionStatus::InProgress => "in progress",
            SessionStatus::Superseded => "unterminated",
        }
    }
}

/// A work period rebuilt from punch events. Never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Session {
    pub anchor_id: i64,
    pub work_date: NaiveDate,
    pub start: NaiveDateTime,
    pub end: Option<NaiveDateTime>,
    pub break_minutes: i64,
    pub work_minutes: i64,
    pub status: SessionStatus,
    pub events: Vec<PunchEvent>,
}

impl Session {
    pub fn is_open(&self) -> bool {
        self.end.is_none()
    }

    pub fn event_ids(&self) -> Vec<i64> {
        self.events.iter().map(|e| e.id).collect()
    }
}
