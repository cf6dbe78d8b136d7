use super::session::{Session, SessionStatus};
use chrono::{NaiveDate, NaiveDateTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayStatus {
    Complete,
    InProgress,
}

/// All sessions attributed to one work date, rolled up for display.
#[derive(Debug, Clone)]
pub struct DaySummary {
    pub work_date: NaiveDate,
    pub first_start: Option<NaiveDateTime>,
    pub last_end: Option<NaiveDateTime>,
    pub break_minutes: i64,
    pub work_minutes: i64,
    pub status: DayStatus,
    pub sessions: Vec<Session>,
}

impl DaySummary {
    /// `sessions` must share one work date and be ordered by start.
    pub fn from_sessions(work_date: NaiveDate, sessions: Vec<Session>) -> Self {
        let status = if sessions.iter().any(|s| s.status != SessionStatus::Complete) {
            DayStatus::InProgress
        } else {
            DayStatus::Complete
        };

        Self {
            work_date,
            first_start: sessions.first().map(|s| s.start),
            last_end: sessions.last().and_then(|s| s.end),
            break_minutes: sessions.iter().map(|s| s.break_minutes).sum(),
            work_minutes: sessions.iter().map(|s| s.work_minutes).sum(),
            status,
            sessions,
        }
    }
}
