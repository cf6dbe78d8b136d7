//! Time utilities: parsing HH:MM, formatting minutes and wall-clock times.

use crate::core::work_date::days_after;
use crate::errors::{AppError, AppResult};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub fn parse_time(t: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(t.trim(), "%H:%M").ok()
}

pub fn parse_time_arg(t: &str) -> AppResult<NaiveTime> {
    parse_time(t).ok_or_else(|| AppError::InvalidTime(t.to_string()))
}

/// Parse a break given as `HH:MM-HH:MM`.
pub fn parse_break_range(s: &str) -> AppResult<(NaiveTime, NaiveTime)> {
    let (a, b) = s
        .split_once('-')
        .ok_or_else(|| AppError::InvalidTime(format!("break must look like HH:MM-HH:MM: {s}")))?;
    Ok((parse_time_arg(a)?, parse_time_arg(b)?))
}

/// Punch time given on the command line: `HH:MM` (on `today`) or
/// `YYYY-MM-DD HH:MM`.
pub fn parse_punch_at(s: &str, today: NaiveDate) -> AppResult<NaiveDateTime> {
    let s = s.trim();
    if let Some(t) = parse_time(s) {
        return Ok(today.and_time(t));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M")
        .map_err(|_| AppError::InvalidTime(s.to_string()))
}

/// Minutes as `H:MM` (hours not padded).
pub fn format_minutes(mins: i64) -> String {
    let sign = if mins < 0 { "-" } else { "" };
    let m = mins.abs();
    format!("{}{}:{:02}", sign, m / 60, m % 60)
}

/// Wall-clock time as `HH:MM` relative to its work date: a punch on the
/// following calendar day keeps counting past 24 (02:00 → 26:00).
pub fn format_clock(at: NaiveDateTime, work_date: NaiveDate) -> String {
    let hours = at.hour() as i64 + 24 * days_after(work_date, at);
    format!("{:02}:{:02}", hours, at.minute())
}

pub fn format_hours(mins: i64) -> String {
    format!("{:.1}", mins as f64 / 60.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    #[test]
    fn punch_time_forms() {
        let at = parse_punch_at("07:45", d(3)).unwrap();
        assert_eq!(at, d(3).and_hms_opt(7, 45, 0).unwrap());

        let at = parse_punch_at("2025-08-01 23:10", d(3)).unwrap();
        assert_eq!(at, d(1).and_hms_opt(23, 10, 0).unwrap());

        assert!(parse_punch_at("yesterday", d(3)).is_err());
    }

    #[test]
    fn minutes_format() {
        assert_eq!(format_minutes(0), "0:00");
        assert_eq!(format_minutes(510), "8:30");
        assert_eq!(format_minutes(1505), "25:05");
        assert_eq!(format_minutes(-45), "-0:45");
    }

    #[test]
    fn clock_format_rolls_past_midnight() {
        let same = d(4).and_hms_opt(9, 5, 0).unwrap();
        let next = d(5).and_hms_opt(1, 0, 0).unwrap();
        assert_eq!(format_clock(same, d(4)), "09:05");
        assert_eq!(format_clock(next, d(4)), "25:00");
    }

    #[test]
    fn break_range_parsing() {
        let (a, b) = parse_break_range("12:00-12:45").unwrap();
        assert_eq!(a, NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(b, NaiveTime::from_hms_opt(12, 45, 0).unwrap());
        assert!(parse_break_range("12:00").is_err());
        assert!(parse_break_range("12:00-25:00").is_err());
    }
}
