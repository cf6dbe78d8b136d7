//! The events of one owner and month, as last fetched from the store.
//!
//! Every fetch is tagged with a ticket from [`MonthView::begin`]. A response
//! is kept only if no newer fetch has started since, so a slow reply for a
//! previously selected month can never overwrite the current one.

use crate::core::calculator::aggregate::{MonthlyTotals, aggregate, summarize_days};
use crate::core::calculator::sessions::reconstruct;
use crate::core::clock::Clock;
use crate::db::store::EventStore;
use crate::errors::AppResult;
use crate::models::day_summary::DaySummary;
use crate::models::event::PunchEvent;
use crate::models::session::Session;
use crate::utils::date::month_bounds;
use chrono::NaiveDate;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone)]
pub struct MonthView {
    pub owner: String,
    pub from: NaiveDate,
    pub to: NaiveDate,
    latest: u64,
    events: Vec<PunchEvent>,
}

impl MonthView {
    pub fn new(owner: &str, year: i32, month: u32) -> AppResult<Self> {
        let (from, to) = month_bounds(year, month)?;
        Ok(Self {
            owner: owner.to_string(),
            from,
            to,
            latest: 0,
            events: Vec::new(),
        })
    }

    /// Select another month; anything still in flight becomes stale.
    pub fn select(&mut self, year: i32, month: u32) -> AppResult<FetchTicket> {
        let (from, to) = month_bounds(year, month)?;
        self.from = from;
        self.to = to;
        self.events.clear();
        Ok(self.begin())
    }

    /// Start a fetch.
    pub fn begin(&mut self) -> FetchTicket {
        self.latest += 1;
        FetchTicket(self.latest)
    }

    /// Install a fetch result. Returns `false` when the ticket is stale.
    pub fn apply(&mut self, ticket: FetchTicket, events: Vec<PunchEvent>) -> bool {
        if ticket.0 < self.latest {
            debug!(ticket = ticket.0, latest = self.latest, "stale fetch discarded");
            return false;
        }
        self.events = events;
        true
    }

    /// Fetch the selected month and install it.
    pub fn refresh<S: EventStore + ?Sized>(&mut self, store: &S) -> AppResult<()> {
        let ticket = self.begin();
        let events = store.query_events(&self.owner, self.from, self.to)?;
        self.apply(ticket, events);
        Ok(())
    }

    pub fn events(&self) -> &[PunchEvent] {
        &self.events
    }

    pub fn sessions<C: Clock>(&self, clock: C) -> Vec<Session> {
        reconstruct(&self.events, clock)
    }

    pub fn days<C: Clock>(&self, clock: C) -> Vec<DaySummary> {
        summarize_days(&self.sessions(clock))
    }

    pub fn totals<C: Clock>(&self, clock: C) -> MonthlyTotals {
        aggregate(&self.sessions(clock))
    }

    /// Sessions of one work date, in start order.
    pub fn sessions_on<C: Clock>(&self, date: NaiveDate, clock: C) -> Vec<Session> {
        self.sessions(clock)
            .into_iter()
            .filter(|s| s.work_date == date)
            .collect()
    }
}
