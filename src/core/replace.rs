//! Session edit protocol.
//!
//! A session is edited by replacing all of its constituent events with a
//! freshly built set. The new events are anchored to the session's work date
//! even when a punch falls after the 05:00 boundary of the next day.
//!
//! A replacement must fit into the surrounding history: it may not end in
//! the future, start inside an open shift, or cover punches of another
//! session.

use crate::core::clock::Clock;
use crate::core::validator::{PunchState, WorkState};
use crate::core::work_date::timestamp_on;
use crate::db::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::event::PunchEvent;
use crate::models::event_kind::EventKind;
use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use tracing::{info, warn};

/// The edited shape of a session, as entered by the user.
#[derive(Debug, Clone)]
pub struct ReplaceRequest {
    pub work_date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub end_is_next_day: bool,
    pub breaks: Vec<(NaiveTime, NaiveTime)>,
    /// Ids of the events being replaced (empty for a new session).
    pub remove_ids: Vec<i64>,
}

/// Where a failed replace stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStage {
    /// Nothing was removed.
    BeforeDelete,
    /// The old events were removed, the new ones were not written.
    AfterDelete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReplacePhase {
    Pending,
    Committed {
        removed: Vec<i64>,
        inserted: Vec<PunchEvent>,
    },
    Failed {
        stage: FailedStage,
        removed: Vec<i64>,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReplaceOutcome {
    pub work_date: NaiveDate,
    pub phase: ReplacePhase,
}

impl ReplaceOutcome {
    fn pending(work_date: NaiveDate) -> Self {
        Self {
            work_date,
            phase: ReplacePhase::Pending,
        }
    }

    fn settle(self, result: AppResult<Vec<PunchEvent>>, removed: &[i64]) -> Self {
        let phase = match result {
            Ok(inserted) => ReplacePhase::Committed {
                removed: removed.to_vec(),
                inserted,
            },
            Err(AppError::PartialReplace { removed, reason }) => ReplacePhase::Failed {
                stage: FailedStage::AfterDelete,
                removed,
                reason,
            },
            Err(e) => ReplacePhase::Failed {
                stage: FailedStage::BeforeDelete,
                removed: Vec::new(),
                reason: e.to_string(),
            },
        };
        Self { phase, ..self }
    }

    pub fn is_committed(&self) -> bool {
        matches!(self.phase, ReplacePhase::Committed { .. })
    }

    /// The inserted events, or the failure as an error.
    pub fn into_result(self) -> AppResult<Vec<PunchEvent>> {
        match self.phase {
            ReplacePhase::Committed { inserted, .. } => Ok(inserted),
            ReplacePhase::Failed {
                stage: FailedStage::AfterDelete,
                removed,
                reason,
            } => Err(AppError::PartialReplace { removed, reason }),
            ReplacePhase::Failed { reason, .. } => Err(AppError::ReplaceFailed(reason)),
            ReplacePhase::Pending => Err(AppError::ReplaceFailed("replace never ran".into())),
        }
    }
}

pub struct ReplaceLogic;

impl ReplaceLogic {
    /// Check the request and build the replacement events, oldest first.
    pub fn build_events(owner: &str, req: &ReplaceRequest) -> AppResult<Vec<PunchEvent>> {
        let start = timestamp_on(req.work_date, req.start, false);
        let end = timestamp_on(req.work_date, req.end, req.end_is_next_day);

        if end <= start {
            return Err(AppError::InvalidSession(format!(
                "end {} is not after start {}",
                req.end.format("%H:%M"),
                req.start.format("%H:%M")
            )));
        }

        // Break times earlier than the start belong to the following day.
        let place = |t: NaiveTime| -> NaiveDateTime { timestamp_on(req.work_date, t, t < req.start) };

        let mut breaks: Vec<(NaiveDateTime, NaiveDateTime)> = Vec::with_capacity(req.breaks.len());
        for (bs, be) in &req.breaks {
            let (from, to) = (place(*bs), place(*be));
            if to <= from {
                return Err(AppError::InvalidSession(format!(
                    "break {}-{} ends before it starts",
                    bs.format("%H:%M"),
                    be.format("%H:%M")
                )));
            }
            if from < start || to > end {
                return Err(AppError::InvalidSession(format!(
                    "break {}-{} lies outside the session",
                    bs.format("%H:%M"),
                    be.format("%H:%M")
                )));
            }
            breaks.push((from, to));
        }

        breaks.sort();
        if breaks.windows(2).any(|w| w[1].0 < w[0].1) {
            return Err(AppError::InvalidSession("breaks overlap".into()));
        }

        let mut events = Vec::with_capacity(2 + breaks.len() * 2);
        events.push(PunchEvent::new(owner, EventKind::WorkStart, start));
        for (from, to) in breaks {
            events.push(PunchEvent::new(owner, EventKind::BreakStart, from));
            events.push(PunchEvent::new(owner, EventKind::BreakEnd, to));
        }
        events.push(PunchEvent::new(owner, EventKind::WorkEnd, end));

        Ok(events
            .into_iter()
            .map(|e| e.anchored_to(req.work_date))
            .collect())
    }

    /// Check built events against "now" and the owner's other punches
    /// around the work date. The events in `req.remove_ids` do not count.
    pub fn check_fit<S: EventStore + ?Sized>(
        store: &S,
        owner: &str,
        req: &ReplaceRequest,
        events: &[PunchEvent],
        now: NaiveDateTime,
    ) -> AppResult<()> {
        let (Some(first), Some(last)) = (events.first(), events.last()) else {
            return Ok(());
        };
        let (start, end) = (first.timestamp, last.timestamp);

        if end > now {
            return Err(AppError::InvalidSession(format!(
                "session would end at {}, which is in the future",
                end.format("%Y-%m-%d %H:%M")
            )));
        }

        let from = req
            .work_date
            .checked_sub_days(Days::new(1))
            .unwrap_or(req.work_date);
        let to = req
            .work_date
            .checked_add_days(Days::new(1))
            .unwrap_or(req.work_date);
        let others: Vec<PunchEvent> = store
            .query_events(owner, from, to)?
            .into_iter()
            .filter(|e| !req.remove_ids.contains(&e.id))
            .collect();

        if let Some(clash) = others
            .iter()
            .filter(|e| e.timestamp > start && e.timestamp < end)
            .min_by_key(|e| (e.timestamp, e.id))
        {
            return Err(AppError::InvalidSession(format!(
                "session overlaps the {} recorded at {}",
                clash.kind,
                clash.timestamp.format("%Y-%m-%d %H:%M")
            )));
        }

        let before: Vec<PunchEvent> = others.into_iter().filter(|e| e.timestamp <= start).collect();
        let state = PunchState::derive(&before);
        if state.state != WorkState::Idle {
            let since = state
                .shift_start
                .or(state.last.map(|(_, at)| at))
                .unwrap_or(start);
            return Err(AppError::InvalidSession(format!(
                "session starts inside a shift open since {}",
                since.format("%Y-%m-%d %H:%M")
            )));
        }

        Ok(())
    }

    /// Replace a session's events with the edited shape.
    ///
    /// Invalid input, or a session that does not fit the surrounding
    /// history, is an error and leaves the store untouched. Store failures
    /// are reported through [`ReplaceOutcome::phase`].
    pub fn replace_session<S, C>(
        store: &mut S,
        owner: &str,
        req: &ReplaceRequest,
        clock: C,
    ) -> AppResult<ReplaceOutcome>
    where
        S: EventStore + ?Sized,
        C: Clock,
    {
        let events = Self::build_events(owner, req)?;
        Self::check_fit(&*store, owner, req, &events, clock.now())?;
        let outcome = ReplaceOutcome::pending(req.work_date);

        let result = store.replace_events(&req.remove_ids, &events);
        let outcome = outcome.settle(result, &req.remove_ids);

        match &outcome.phase {
            ReplacePhase::Committed { removed, inserted } => info!(
                owner,
                work_date = %req.work_date,
                removed = removed.len(),
                inserted = inserted.len(),
                "session replaced"
            ),
            ReplacePhase::Failed { stage, reason, .. } => {
                warn!(owner, work_date = %req.work_date, ?stage, reason, "session replace failed")
            }
            ReplacePhase::Pending => {}
        }

        Ok(outcome)
    }

    /// Remove every constituent event of a session.
    pub fn delete_session<S: EventStore + ?Sized>(
        store: &mut S,
        owner: &str,
        ids: &[i64],
    ) -> AppResult<usize> {
        let removed = store.delete_events(ids)?;
        info!(owner, removed, "session deleted");
        Ok(removed)
    }
}
