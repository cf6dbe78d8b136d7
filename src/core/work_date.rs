//! Work-date attribution.
//!
//! A punch before 05:00 belongs to the previous calendar day so that a night
//! shift is accounted on the day it started.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

/// First hour that belongs to the current calendar day.
pub const DAY_BOUNDARY_HOUR: u32 = 5;

pub fn resolve_work_date(timestamp: NaiveDateTime) -> NaiveDate {
    let date = timestamp.date();
    if timestamp.hour() < DAY_BOUNDARY_HOUR {
        date.pred_opt().unwrap_or(date)
    } else {
        date
    }
}

/// Timestamp of a wall-clock `time` entered relative to `work_date`.
/// `next_day` places it on the following calendar day.
pub fn timestamp_on(work_date: NaiveDate, time: NaiveTime, next_day: bool) -> NaiveDateTime {
    let day = if next_day {
        work_date.checked_add_days(Days::new(1)).unwrap_or(work_date)
    } else {
        work_date
    };
    day.and_time(time)
}

/// Whole calendar days between `work_date` and the date of `timestamp`
/// (0 for the same day, 1 for a punch after midnight, ...).
pub fn days_after(work_date: NaiveDate, timestamp: NaiveDateTime) -> i64 {
    (timestamp.date() - work_date).num_days()
}
