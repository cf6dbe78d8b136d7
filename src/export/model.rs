use crate::models::session::Session;
use crate::utils::time::{format_clock, format_minutes};
use serde::Serialize;

/// One exported row per session.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct SessionExport {
    pub date: String,
    pub status: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "break")]
    pub break_time: String,
    pub work: String,
}

impl SessionExport {
    pub fn from_session(s: &Session) -> Self {
        Self {
            date: s.work_date.format("%Y-%m-%d").to_string(),
            status: s.status.label().to_string(),
            start: format_clock(s.start, s.work_date),
            end: s
                .end
                .map(|e| format_clock(e, s.work_date))
                .unwrap_or_else(|| "-".to_string()),
            break_time: format_minutes(s.break_minutes),
            work: format_minutes(s.work_minutes),
        }
    }
}

/// Rows in chronological order (oldest work date first).
pub(crate) fn sessions_to_rows(sessions: &[Session]) -> Vec<SessionExport> {
    let mut sorted: Vec<&Session> = sessions.iter().collect();
    sorted.sort_by_key(|s| (s.work_date, s.start, s.anchor_id));
    sorted.into_iter().map(SessionExport::from_session).collect()
}
