use crate::core::clock::Clock;
use crate::core::replace::{ReplaceLogic, ReplaceRequest};
use crate::db::store::EventStore;
use crate::errors::{AppError, AppResult};
use crate::models::event::PunchEvent;
use chrono::{NaiveDate, NaiveTime};

/// High-level business logic for the `add` command: backfill a complete
/// session that has already ended, without touching other sessions.
pub struct AddLogic;

impl AddLogic {
    #[allow(clippy::too_many_arguments)]
    pub fn apply<S, C>(
        store: &mut S,
        owner: &str,
        date: NaiveDate,
        start: NaiveTime,
        end: NaiveTime,
        next_day: bool,
        breaks: Vec<(NaiveTime, NaiveTime)>,
        clock: C,
    ) -> AppResult<Vec<PunchEvent>>
    where
        S: EventStore + ?Sized,
        C: Clock,
    {
        if date > clock.now().date() {
            return Err(AppError::InvalidSession(format!(
                "cannot add a session on {date}, which is in the future"
            )));
        }

        let req = ReplaceRequest {
            work_date: date,
            start,
            end,
            end_is_next_day: next_day,
            breaks,
            remove_ids: Vec::new(),
        };

        ReplaceLogic::replace_session(store, owner, &req, clock)?.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use crate::core::punch::{PunchLogic, PunchRequest};
    use crate::core::validator::WorkState;
    use crate::db::pool::DbPool;
    use crate::db::store::SqliteStore;
    use crate::models::event_kind::EventKind;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn clock_at(s: &str) -> FixedClock {
        FixedClock::new(chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap())
    }

    #[test]
    fn backfill_writes_a_full_session() {
        let mut store = SqliteStore::new(DbPool::in_memory().unwrap());
        let saved = AddLogic::apply(
            &mut store,
            "me",
            d("2025-09-01"),
            t("09:00"),
            t("18:00"),
            false,
            vec![(t("12:00"), t("12:30"))],
            clock_at("2025-09-02 08:00"),
        )
        .unwrap();

        let kinds: Vec<EventKind> = saved.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                EventKind::WorkStart,
                EventKind::BreakStart,
                EventKind::BreakEnd,
                EventKind::WorkEnd
            ]
        );
    }

    #[test]
    fn future_dates_are_refused() {
        let mut store = SqliteStore::new(DbPool::in_memory().unwrap());
        let res = AddLogic::apply(
            &mut store,
            "me",
            d("2025-09-03"),
            t("09:00"),
            t("18:00"),
            false,
            Vec::new(),
            clock_at("2025-09-02 08:00"),
        );
        assert!(matches!(res, Err(AppError::InvalidSession(_))));
    }

    #[test]
    fn session_ending_later_today_is_refused() {
        let mut store = SqliteStore::new(DbPool::in_memory().unwrap());
        let now = clock_at("2025-09-01 12:00");

        let res = AddLogic::apply(&mut store, "me", d("2025-09-01"), t("09:00"), t("18:00"), false, Vec::new(), &now);
        assert!(matches!(res, Err(AppError::InvalidSession(ref m)) if m.contains("future")));

        let res = AddLogic::apply(&mut store, "me", d("2025-09-01"), t("22:00"), t("02:00"), true, Vec::new(), &now);
        assert!(res.is_err());
        assert!(store.query_events("me", d("2025-08-31"), d("2025-09-02")).unwrap().is_empty());
    }

    #[test]
    fn backfill_during_open_shift_is_refused() {
        let mut store = SqliteStore::new(DbPool::in_memory().unwrap());
        let now = clock_at("2025-09-01 12:00");
        let start = PunchRequest {
            kind: EventKind::WorkStart,
            at: chrono::NaiveDateTime::parse_from_str("2025-09-01 09:00", "%Y-%m-%d %H:%M").unwrap(),
            note: None,
        };
        PunchLogic::punch(&mut store, "me", &start, 12.0, &now, |_| true).unwrap();

        let res = AddLogic::apply(&mut store, "me", d("2025-09-01"), t("10:00"), t("11:00"), false, Vec::new(), &now);
        assert!(matches!(res, Err(AppError::InvalidSession(_))));
        assert_eq!(PunchLogic::state(&store, "me").unwrap().state, WorkState::Working);

        // Yesterday is still open for backfill.
        AddLogic::apply(&mut store, "me", d("2025-08-31"), t("09:00"), t("17:00"), false, Vec::new(), &now)
            .unwrap();
        assert_eq!(PunchLogic::state(&store, "me").unwrap().state, WorkState::Working);
    }
}
