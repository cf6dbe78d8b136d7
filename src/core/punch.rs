use crate::core::clock::Clock;
use crate::core::validator::{Finding, PunchState, advisories, future_punch, has_blocking};
use crate::core::work_date::resolve_work_date;
use crate::db::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::event::PunchEvent;
use crate::models::event_kind::EventKind;
use chrono::{Days, NaiveDateTime};
use tracing::info;

#[derive(Debug, Clone)]
pub struct PunchRequest {
    pub kind: EventKind,
    pub at: NaiveDateTime,
    pub note: Option<String>,
}

/// High-level business logic for the `punch` and `status` commands.
pub struct PunchLogic;

impl PunchLogic {
    /// Events needed to judge a punch at `at`: everything from the day
    /// before the earliest involved work date up to the latest one.
    fn context<S: EventStore + ?Sized>(
        store: &S,
        owner: &str,
        at: Option<NaiveDateTime>,
    ) -> AppResult<Vec<PunchEvent>> {
        let Some(latest) = store.latest_event(owner)? else {
            return Ok(Vec::new());
        };

        let target = at.map(resolve_work_date).unwrap_or(latest.work_date);
        let from = latest.work_date.min(target);
        let from = from.checked_sub_days(Days::new(1)).unwrap_or(from);
        let to = latest.work_date.max(target);

        store.query_events(owner, from, to)
    }

    /// Current state of `owner`, derived from the stored punches.
    pub fn state<S: EventStore + ?Sized>(store: &S, owner: &str) -> AppResult<PunchState> {
        Ok(PunchState::derive(&Self::context(store, owner, None)?))
    }

    /// Validate and record a punch.
    ///
    /// Blocking findings refuse the write, as does a punch stamped after
    /// `clock.now()`. Advisory findings are passed to `confirm`; the punch
    /// is written only when it returns `true`.
    pub fn punch<S, C, F>(
        store: &mut S,
        owner: &str,
        req: &PunchRequest,
        long_shift_hours: f64,
        clock: C,
        confirm: F,
    ) -> AppResult<PunchEvent>
    where
        S: EventStore + ?Sized,
        C: Clock,
        F: FnOnce(&[&Finding]) -> bool,
    {
        let existing = Self::context(store, owner, Some(req.at))?;
        let mut findings = PunchState::derive(&existing).check(req.kind, req.at, long_shift_hours);
        findings.extend(future_punch(req.at, clock.now()));

        if has_blocking(&findings) {
            let reasons = findings
                .iter()
                .filter(|f| f.is_blocking())
                .map(|f| f.message.clone())
                .collect();
            return Err(AppError::Rejected(reasons));
        }

        let warnings: Vec<&Finding> = advisories(&findings).collect();
        if !warnings.is_empty() && !confirm(&warnings) {
            return Err(AppError::Cancelled);
        }

        let ev = PunchEvent::new(owner, req.kind, req.at).with_note(req.note.clone());
        let saved = store
            .insert_events(std::slice::from_ref(&ev))?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::Store("punch was not stored".into()))?;

        info!(owner, kind = %saved.kind, at = %saved.timestamp_str(), "punch recorded");
        Ok(saved)
    }
}
