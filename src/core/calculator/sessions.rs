use crate::core::clock::Clock;
use crate::models::event::PunchEvent;
use crate::models::event_kind::EventKind;
use crate::models::session::{Session, SessionStatus};
use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use std::collections::BTreeMap;
use tracing::debug;

/// Session being built while sweeping one work date.
struct OpenSession {
    anchor_id: i64,
    start: NaiveDateTime,
    break_start: Option<NaiveDateTime>,
    breaks: TimeDelta,
    events: Vec<PunchEvent>,
}

impl OpenSession {
    fn begin(ev: PunchEvent) -> Self {
        Self {
            anchor_id: ev.id,
            start: ev.timestamp,
            break_start: None,
            breaks: TimeDelta::zero(),
            events: vec![ev],
        }
    }

    fn close(self, work_date: NaiveDate, end: PunchEvent) -> Session {
        let mut events = self.events;
        let end_at = end.timestamp;
        events.push(end);

        finish(
            self.anchor_id,
            work_date,
            self.start,
            Some(end_at),
            end_at,
            self.breaks,
            SessionStatus::Complete,
            events,
        )
    }

    /// Materialise without an end; durations run up to `now`, and so does a
    /// break that is still open.
    fn provisional(self, work_date: NaiveDate, now: NaiveDateTime, status: SessionStatus) -> Session {
        let mut breaks = self.breaks;
        if let Some(bs) = self.break_start {
            breaks += now - bs;
        }

        finish(
            self.anchor_id,
            work_date,
            self.start,
            None,
            now,
            breaks,
            status,
            self.events,
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn finish(
    anchor_id: i64,
    work_date: NaiveDate,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    until: NaiveDateTime,
    breaks: TimeDelta,
    status: SessionStatus,
    events: Vec<PunchEvent>,
) -> Session {
    let elapsed = until - start;

    Session {
        anchor_id,
        work_date,
        start,
        end,
        break_minutes: breaks.num_minutes(),
        work_minutes: (elapsed - breaks).num_minutes(),
        status,
        events,
    }
}

/// Rebuild sessions from an unordered set of punch events.
///
/// Events are partitioned by their stored work date and swept in time order.
/// Inconsistent history never fails: orphan break/end events are skipped and
/// a second work start leaves the previous session unterminated.
///
/// Output order: work date descending, then start ascending.
pub fn reconstruct<C: Clock>(events: &[PunchEvent], clock: C) -> Vec<Session> {
    let mut by_date: BTreeMap<NaiveDate, Vec<PunchEvent>> = BTreeMap::new();
    for ev in events {
        by_date.entry(ev.work_date).or_default().push(ev.clone());
    }

    let now = clock.now();
    let mut sessions = Vec::new();

    for (work_date, mut day) in by_date.into_iter().rev() {
        day.sort_by_key(|e| (e.timestamp, e.id));
        sessions.extend(sweep_day(work_date, day, now));
    }

    sessions.sort_by(|a, b| {
        b.work_date
            .cmp(&a.work_date)
            .then(a.start.cmp(&b.start))
            .then(a.anchor_id.cmp(&b.anchor_id))
    });
    sessions
}

fn sweep_day(work_date: NaiveDate, day: Vec<PunchEvent>, now: NaiveDateTime) -> Vec<Session> {
    let mut out = Vec::new();
    let mut current: Option<OpenSession> = None;

    for ev in day {
        match ev.kind {
            EventKind::WorkStart => {
                if let Some(open) = current.take() {
                    debug!(
                        work_date = %work_date,
                        anchor = open.anchor_id,
                        "work start while a session is open; leaving it unterminated"
                    );
                    out.push(open.provisional(work_date, now, SessionStatus::Superseded));
                }
                current = Some(OpenSession::begin(ev));
            }
            EventKind::BreakStart => match current.as_mut() {
                Some(open) if open.break_start.is_none() => {
                    open.break_start = Some(ev.timestamp);
                    open.events.push(ev);
                }
                _ => debug!(id = ev.id, "ignoring break start without an open session"),
            },
            EventKind::BreakEnd => match current.as_mut() {
                Some(open) if open.break_start.is_some() => {
                    if let Some(bs) = open.break_start.take() {
                        open.breaks += ev.timestamp - bs;
                    }
                    open.events.push(ev);
                }
                _ => debug!(id = ev.id, "ignoring break end without an open break"),
            },
            EventKind::WorkEnd => match current.take() {
                Some(open) => out.push(open.close(work_date, ev)),
                None => debug!(id = ev.id, "ignoring work end without an open session"),
            },
        }
    }

    if let Some(open) = current {
        out.push(open.provisional(work_date, now, SessionStatus::InProgress));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::utils::time::format_clock;

    fn ts(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 5, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn ev(id: i64, kind: EventKind, at: NaiveDateTime) -> PunchEvent {
        let mut e = PunchEvent::new("me", kind, at);
        e.id = id;
        e
    }

    fn clock() -> FixedClock {
        FixedClock::new(ts(31, 12, 0))
    }

    #[test]
    fn single_session_with_break() {
        let events = vec![
            ev(1, EventKind::WorkStart, ts(6, 9, 0)),
            ev(2, EventKind::BreakStart, ts(6, 12, 0)),
            ev(3, EventKind::BreakEnd, ts(6, 12, 30)),
            ev(4, EventKind::WorkEnd, ts(6, 18, 0)),
        ];
        let sessions = reconstruct(&events, clock());
        assert_eq!(sessions.len(), 1);

        let s = &sessions[0];
        assert_eq!(s.break_minutes, 30);
        assert_eq!(s.work_minutes, 510);
        assert_eq!(format_clock(s.start, s.work_date), "09:00");
        assert_eq!(format_clock(s.end.unwrap(), s.work_date), "18:00");
        assert_eq!(s.status, SessionStatus::Complete);
        assert_eq!(s.event_ids(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn overnight_session_stays_on_its_work_date() {
        let events = vec![
            ev(1, EventKind::WorkStart, ts(6, 22, 0)),
            ev(2, EventKind::WorkEnd, ts(7, 2, 0)),
        ];
        let sessions = reconstruct(&events, clock());
        assert_eq!(sessions.len(), 1);

        let s = &sessions[0];
        assert_eq!(s.work_date, NaiveDate::from_ymd_opt(2025, 5, 6).unwrap());
        assert_eq!(format_clock(s.end.unwrap(), s.work_date), "26:00");
        assert_eq!(s.work_minutes, 240);
    }

    #[test]
    fn unmatched_work_start_is_in_progress() {
        let clock = clock();
        let start = clock.now() - TimeDelta::minutes(95);
        let events = vec![ev(1, EventKind::WorkStart, start)];

        let sessions = reconstruct(&events, &clock);
        assert_eq!(sessions.len(), 1);
        assert!(sessions[0].end.is_none());
        assert_eq!(sessions[0].status, SessionStatus::InProgress);
        assert_eq!(sessions[0].work_minutes, 95);
    }

    #[test]
    fn open_break_counts_until_now() {
        let clock = clock();
        let now = clock.now();
        let events = vec![
            ev(1, EventKind::WorkStart, now - TimeDelta::hours(3)),
            ev(2, EventKind::BreakStart, now - TimeDelta::minutes(20)),
        ];
        let s = &reconstruct(&events, &clock)[0];
        assert_eq!(s.break_minutes, 20);
        assert_eq!(s.work_minutes, 160);
    }

    #[test]
    fn double_start_leaves_first_session_unterminated() {
        let clock = FixedClock::new(ts(6, 20, 0));
        let events = vec![
            ev(1, EventKind::WorkStart, ts(6, 9, 0)),
            ev(2, EventKind::WorkStart, ts(6, 13, 0)),
            ev(3, EventKind::WorkEnd, ts(6, 17, 0)),
        ];
        let sessions = reconstruct(&events, &clock);
        assert_eq!(sessions.len(), 2);

        assert_eq!(sessions[0].anchor_id, 1);
        assert_eq!(sessions[0].status, SessionStatus::Superseded);
        assert!(sessions[0].end.is_none());
        assert_eq!(sessions[0].work_minutes, 11 * 60);

        assert_eq!(sessions[1].anchor_id, 2);
        assert_eq!(sessions[1].work_minutes, 4 * 60);
    }

    #[test]
    fn orphan_breaks_and_ends_are_ignored() {
        let events = vec![
            ev(1, EventKind::BreakEnd, ts(6, 8, 0)),
            ev(2, EventKind::WorkEnd, ts(6, 8, 30)),
            ev(3, EventKind::WorkStart, ts(6, 9, 0)),
            ev(4, EventKind::WorkEnd, ts(6, 17, 0)),
            ev(5, EventKind::BreakStart, ts(6, 17, 30)),
            ev(6, EventKind::BreakEnd, ts(6, 18, 0)),
        ];
        let sessions = reconstruct(&events, clock());
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].break_minutes, 0);
        assert_eq!(sessions[0].work_minutes, 480);
        assert_eq!(sessions[0].event_ids(), vec![3, 4]);
    }

    #[test]
    fn multiple_breaks_accumulate() {
        let events = vec![
            ev(1, EventKind::WorkStart, ts(6, 9, 0)),
            ev(2, EventKind::BreakStart, ts(6, 10, 0)),
            ev(3, EventKind::BreakEnd, ts(6, 10, 15)),
            ev(4, EventKind::BreakStart, ts(6, 12, 0)),
            ev(5, EventKind::BreakStart, ts(6, 12, 5)),
            ev(6, EventKind::BreakEnd, ts(6, 12, 45)),
            ev(7, EventKind::WorkEnd, ts(6, 17, 0)),
        ];
        let s = &reconstruct(&events, clock())[0];
        assert_eq!(s.break_minutes, 60);
        assert_eq!(s.work_minutes, 420);
        assert!(!s.event_ids().contains(&5));
    }

    #[test]
    fn ordering_is_latest_day_first_then_chronological() {
        let events = vec![
            ev(5, EventKind::WorkStart, ts(7, 14, 0)),
            ev(1, EventKind::WorkStart, ts(5, 9, 0)),
            ev(3, EventKind::WorkStart, ts(7, 9, 0)),
            ev(2, EventKind::WorkEnd, ts(5, 17, 0)),
            ev(4, EventKind::WorkEnd, ts(7, 12, 0)),
            ev(6, EventKind::WorkEnd, ts(7, 18, 0)),
        ];
        let anchors: Vec<i64> = reconstruct(&events, clock())
            .iter()
            .map(|s| s.anchor_id)
            .collect();
        assert_eq!(anchors, vec![3, 5, 1]);
    }

    #[test]
    fn reconstruction_is_idempotent() {
        let events = vec![
            ev(4, EventKind::WorkEnd, ts(6, 18, 0)),
            ev(1, EventKind::WorkStart, ts(6, 9, 0)),
            ev(7, EventKind::WorkStart, ts(8, 23, 0)),
            ev(3, EventKind::BreakEnd, ts(6, 12, 30)),
            ev(2, EventKind::BreakStart, ts(6, 12, 0)),
        ];
        let clock = clock();
        assert_eq!(reconstruct(&events, &clock), reconstruct(&events, &clock));
    }

    #[test]
    fn no_events_no_sessions() {
        assert!(reconstruct(&[], clock()).is_empty());
    }
}
