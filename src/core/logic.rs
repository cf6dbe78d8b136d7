use crate::core::calculator::aggregate::{MonthlyTotals, aggregate, summarize_days};
use crate::core::calculator::sessions::reconstruct;
use crate::core::clock::Clock;
use crate::core::month_view::MonthView;
use crate::db::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::day_summary::DaySummary;
use crate::models::session::Session;
use chrono::NaiveDate;
use serde::Serialize;

/// Everything the `list`, `status` and `export` commands show for a month.
#[derive(Debug, Clone, Serialize)]
pub struct MonthReport {
    pub owner: String,
    pub year: i32,
    pub month: u32,
    pub sessions: Vec<Session>,
    pub totals: MonthlyTotals,
    pub hourly_rate: f64,
    pub earnings: f64,
}

impl MonthReport {
    pub fn days(&self) -> Vec<DaySummary> {
        summarize_days(&self.sessions)
    }
}

pub struct Core;

impl Core {
    /// Sessions attributed to `date`, in start order.
    pub fn day_sessions<S: EventStore + ?Sized, C: Clock>(
        store: &S,
        owner: &str,
        date: NaiveDate,
        clock: C,
    ) -> AppResult<Vec<Session>> {
        let events = store.query_events(owner, date, date)?;
        Ok(reconstruct(&events, clock))
    }

    /// The `index`-th (1-based) session of `date`.
    pub fn session_at<S: EventStore + ?Sized, C: Clock>(
        store: &S,
        owner: &str,
        date: NaiveDate,
        index: usize,
        clock: C,
    ) -> AppResult<Session> {
        let mut sessions = Self::day_sessions(store, owner, date, clock)?;
        if sessions.is_empty() {
            return Err(AppError::NoEventsForDate(date.to_string()));
        }
        if index == 0 || index > sessions.len() {
            return Err(AppError::InvalidSessionIndex(index));
        }
        Ok(sessions.swap_remove(index - 1))
    }

    pub fn month_report<S: EventStore + ?Sized, C: Clock>(
        store: &mut S,
        owner: &str,
        year: i32,
        month: u32,
        clock: C,
    ) -> AppResult<MonthReport> {
        let mut view = MonthView::new(owner, year, month)?;
        view.refresh(&*store)?;

        let sessions = view.sessions(clock);
        let totals = aggregate(&sessions);
        let hourly_rate = store.get_settings(owner)?.hourly_rate;

        Ok(MonthReport {
            owner: owner.to_string(),
            year,
            month,
            totals,
            hourly_rate,
            earnings: totals.earnings(hourly_rate),
            sessions,
        })
    }
}
