//! Write-path validation of a proposed punch.
//!
//! The current position of the user is a small state machine
//! (`Idle → Working ⇄ OnBreak → Idle`). It is derived once from the stored
//! events; a proposal is then checked against the transition table, the
//! time of the latest punch and the length of the running shift.

use crate::models::event::PunchEvent;
use crate::models::event_kind::EventKind;
use chrono::NaiveDateTime;
use serde::Serialize;

/// Shifts longer than this trigger an advisory on work end.
pub const DEFAULT_LONG_SHIFT_HOURS: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// The write must be refused.
    Blocking,
    /// The write may proceed after explicit confirmation.
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    fn blocking(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Blocking,
        }
    }

    fn advisory(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Advisory,
        }
    }

    pub fn is_blocking(&self) -> bool {
        self.severity == Severity::Blocking
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkState {
    Idle,
    Working,
    OnBreak,
}

impl WorkState {
    /// State reached after a punch of `kind`, if the transition is legal.
    pub fn next(self, kind: EventKind) -> Option<WorkState> {
        use EventKind::*;
        use WorkState::*;
        match (self, kind) {
            (Idle, WorkStart) => Some(Working),
            (Working, BreakStart) => Some(OnBreak),
            (Working, WorkEnd) => Some(Idle),
            (OnBreak, BreakEnd) => Some(Working),
            _ => None,
        }
    }

    /// State implied by the kind of the latest recorded punch.
    pub fn after(kind: EventKind) -> WorkState {
        match kind {
            EventKind::WorkStart | EventKind::BreakEnd => WorkState::Working,
            EventKind::BreakStart => WorkState::OnBreak,
            EventKind::WorkEnd => WorkState::Idle,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkState::Idle => "off duty",
            WorkState::Working => "working",
            WorkState::OnBreak => "on break",
        }
    }
}

/// Where the user stands after the recorded punches.
#[derive(Debug, Clone, PartialEq)]
pub struct PunchState {
    pub state: WorkState,
    pub last: Option<(EventKind, NaiveDateTime)>,
    /// Start of the running shift, when one is open.
    pub shift_start: Option<NaiveDateTime>,
}

impl Default for PunchState {
    fn default() -> Self {
        Self {
            state: WorkState::Idle,
            last: None,
            shift_start: None,
        }
    }
}

impl PunchState {
    /// Derive the state from events in any order; the latest punch decides.
    pub fn derive(events: &[PunchEvent]) -> Self {
        let mut sorted: Vec<&PunchEvent> = events.iter().collect();
        sorted.sort_by_key(|e| (e.timestamp, e.id));

        let Some(latest) = sorted.last() else {
            return Self::default();
        };

        let state = WorkState::after(latest.kind);
        let shift_start = if state == WorkState::Idle {
            None
        } else {
            sorted
                .iter()
                .rev()
                .find(|e| e.kind == EventKind::WorkStart)
                .map(|e| e.timestamp)
        };

        Self {
            state,
            last: Some((latest.kind, latest.timestamp)),
            shift_start,
        }
    }

    /// Advance after a successful write. Illegal transitions still move the
    /// state the way the stored history would read afterwards.
    pub fn apply(&mut self, kind: EventKind, at: NaiveDateTime) {
        self.state = WorkState::after(kind);
        self.last = Some((kind, at));
        match kind {
            EventKind::WorkStart => self.shift_start = Some(at),
            EventKind::WorkEnd => self.shift_start = None,
            _ => {}
        }
    }

    pub fn check(&self, kind: EventKind, at: NaiveDateTime, long_shift_hours: f64) -> Vec<Finding> {
        let mut findings = Vec::new();

        let Some((last_kind, last_at)) = self.last else {
            if kind != EventKind::WorkStart {
                findings.push(Finding::blocking("first punch must be a work start"));
            }
            return findings;
        };

        if self.state.next(kind).is_none() {
            findings.push(Finding::blocking(format!(
                "cannot record {kind} right after {last_kind}"
            )));
        }

        if at < last_at {
            findings.push(Finding::blocking(format!(
                "cannot punch in the past: {} is before the last punch at {}",
                at.format("%Y-%m-%d %H:%M"),
                last_at.format("%Y-%m-%d %H:%M")
            )));
        }

        if kind == EventKind::WorkEnd
            && let Some(start) = self.shift_start
        {
            let hours = (at - start).num_seconds() as f64 / 3600.0;
            if hours > long_shift_hours {
                findings.push(Finding::advisory(format!(
                    "shift lasted {hours:.1} hours; check the punch times before confirming"
                )));
            }
        }

        findings
    }
}

/// Validate a proposed punch against the owner's existing events.
pub fn validate(kind: EventKind, at: NaiveDateTime, existing: &[PunchEvent]) -> Vec<Finding> {
    validate_with_limit(kind, at, existing, DEFAULT_LONG_SHIFT_HOURS)
}

pub fn validate_with_limit(
    kind: EventKind,
    at: NaiveDateTime,
    existing: &[PunchEvent],
    long_shift_hours: f64,
) -> Vec<Finding> {
    PunchState::derive(existing).check(kind, at, long_shift_hours)
}

/// A punch stamped after `now` is refused.
pub fn future_punch(at: NaiveDateTime, now: NaiveDateTime) -> Option<Finding> {
    (at > now).then(|| {
        Finding::blocking(format!(
            "cannot punch in the future: {} is after the current time {}",
            at.format("%Y-%m-%d %H:%M"),
            now.format("%Y-%m-%d %H:%M")
        ))
    })
}

pub fn has_blocking(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_blocking)
}

pub fn advisories(findings: &[Finding]) -> impl Iterator<Item = &Finding> {
    findings.iter().filter(|f| !f.is_blocking())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, d)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn ev(id: i64, kind: EventKind, ts: NaiveDateTime) -> PunchEvent {
        let mut e = PunchEvent::new("me", kind, ts);
        e.id = id;
        e
    }

    #[test]
    fn first_punch_must_be_work_start() {
        let findings = validate(EventKind::WorkEnd, at(1, 18, 0), &[]);
        assert_eq!(findings.len(), 1);
        assert!(has_blocking(&findings));

        assert!(validate(EventKind::WorkStart, at(1, 9, 0), &[]).is_empty());
    }

    #[test]
    fn break_start_after_work_start_is_legal() {
        let existing = vec![ev(1, EventKind::WorkStart, at(1, 9, 0))];
        let findings = validate(EventKind::BreakStart, at(1, 12, 0), &existing);
        assert!(!has_blocking(&findings));
    }

    #[test]
    fn transition_table_is_enforced() {
        let existing = vec![
            ev(1, EventKind::WorkStart, at(1, 9, 0)),
            ev(2, EventKind::BreakStart, at(1, 12, 0)),
        ];
        let findings = validate(EventKind::WorkEnd, at(1, 18, 0), &existing);
        assert!(has_blocking(&findings));
        assert!(findings[0].message.contains("work end"));
        assert!(findings[0].message.contains("break start"));

        assert!(validate(EventKind::BreakEnd, at(1, 12, 30), &existing).is_empty());
    }

    #[test]
    fn work_start_after_work_end_is_legal() {
        let existing = vec![
            ev(1, EventKind::WorkStart, at(1, 9, 0)),
            ev(2, EventKind::WorkEnd, at(1, 17, 0)),
        ];
        assert!(validate(EventKind::WorkStart, at(1, 19, 0), &existing).is_empty());
        assert!(has_blocking(&validate(EventKind::WorkEnd, at(1, 19, 0), &existing)));
    }

    #[test]
    fn punching_before_latest_event_is_blocked() {
        let existing = vec![ev(1, EventKind::WorkStart, at(1, 9, 0))];
        let findings = validate(EventKind::WorkEnd, at(1, 8, 0), &existing);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("past"));
    }

    #[test]
    fn long_shift_is_advisory_only() {
        let existing = vec![
            ev(1, EventKind::WorkStart, at(1, 6, 0)),
            ev(2, EventKind::BreakStart, at(1, 12, 0)),
            ev(3, EventKind::BreakEnd, at(1, 13, 0)),
        ];
        let findings = validate(EventKind::WorkEnd, at(1, 19, 30), &existing);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Advisory);
        assert!(findings[0].message.contains("13.5"));
        assert!(!has_blocking(&findings));
        assert_eq!(advisories(&findings).count(), 1);
    }

    #[test]
    fn exactly_twelve_hours_is_fine() {
        let existing = vec![ev(1, EventKind::WorkStart, at(1, 6, 0))];
        assert!(validate(EventKind::WorkEnd, at(1, 18, 0), &existing).is_empty());
    }

    #[test]
    fn long_shift_counts_seconds() {
        let existing = vec![ev(1, EventKind::WorkStart, at(1, 6, 0))];
        let end = at(1, 18, 0) + chrono::TimeDelta::seconds(45);
        let findings = validate(EventKind::WorkEnd, end, &existing);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity, Severity::Advisory);
    }

    #[test]
    fn future_punch_is_blocking() {
        let now = at(1, 9, 0);
        assert!(future_punch(at(1, 9, 0), now).is_none());
        let f = future_punch(at(1, 15, 0), now).unwrap();
        assert!(f.is_blocking());
        assert!(f.message.contains("future"));
    }

    #[test]
    fn derive_ignores_input_order() {
        let existing = vec![
            ev(2, EventKind::WorkEnd, at(1, 17, 0)),
            ev(1, EventKind::WorkStart, at(1, 9, 0)),
            ev(3, EventKind::WorkStart, at(2, 9, 0)),
        ];
        let st = PunchState::derive(&existing);
        assert_eq!(st.state, WorkState::Working);
        assert_eq!(st.shift_start, Some(at(2, 9, 0)));
    }

    #[test]
    fn apply_tracks_the_shift() {
        let mut st = PunchState::default();
        st.apply(EventKind::WorkStart, at(1, 9, 0));
        assert_eq!(st.state, WorkState::Working);
        st.apply(EventKind::BreakStart, at(1, 12, 0));
        assert_eq!(st.state, WorkState::OnBreak);
        st.apply(EventKind::BreakEnd, at(1, 12, 30));
        st.apply(EventKind::WorkEnd, at(1, 18, 0));
        assert_eq!(st.state, WorkState::Idle);
        assert_eq!(st.shift_start, None);
    }
}
