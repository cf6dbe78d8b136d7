use crate::core::clock::Clock;
use crate::core::logic::Core;
use crate::core::replace::ReplaceLogic;
use crate::db::store::EventStore;
use crate::errors::{AppError, AppResult};
use chrono::NaiveDate;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one session (1-based, in start order) or every event attributed
    /// to `date`. Returns the number of removed events.
    pub fn apply<S: EventStore + ?Sized, C: Clock>(
        store: &mut S,
        owner: &str,
        date: NaiveDate,
        session: Option<usize>,
        clock: C,
    ) -> AppResult<usize> {
        if let Some(n) = session {
            let s = Core::session_at(&*store, owner, date, n, clock)?;
            return ReplaceLogic::delete_session(store, owner, &s.event_ids());
        }

        let events = store.query_events(owner, date, date)?;
        if events.is_empty() {
            return Err(AppError::NoEventsForDate(date.to_string()));
        }

        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();
        ReplaceLogic::delete_session(store, owner, &ids)
    }
}
