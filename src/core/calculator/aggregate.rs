use crate::models::day_summary::DaySummary;
use crate::models::session::Session;
use serde::Serialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyTotals {
    pub total_work_minutes: i64,
    pub session_count: usize,
}

impl MonthlyTotals {
    pub fn earnings(&self, hourly_rate: f64) -> f64 {
        estimate_earnings(self.total_work_minutes, hourly_rate)
    }
}

pub fn aggregate(sessions: &[Session]) -> MonthlyTotals {
    MonthlyTotals {
        total_work_minutes: sessions.iter().map(|s| s.work_minutes).sum(),
        session_count: sessions.len(),
    }
}

/// Plain `minutes / 60 * rate`; rounding is left to display.
pub fn estimate_earnings(total_work_minutes: i64, hourly_rate: f64) -> f64 {
    total_work_minutes as f64 / 60.0 * hourly_rate
}

/// Group reconstructed sessions per work date, keeping their order
/// (latest day first, sessions chronological within a day).
pub fn summarize_days(sessions: &[Session]) -> Vec<DaySummary> {
    let mut days: Vec<DaySummary> = Vec::new();
    let mut bucket: Vec<Session> = Vec::new();

    for s in sessions {
        if let Some(first) = bucket.first()
            && first.work_date != s.work_date
        {
            let date = first.work_date;
            days.push(DaySummary::from_sessions(date, std::mem::take(&mut bucket)));
        }
        bucket.push(s.clone());
    }

    if let Some(first) = bucket.first() {
        let date = first.work_date;
        days.push(DaySummary::from_sessions(date, bucket));
    }

    days
}
