use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

pub fn parse_date_arg(s: &str) -> AppResult<NaiveDate> {
    parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))
}

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next
        .and_then(|n| n.pred_opt())
        .ok_or_else(|| AppError::InvalidDate(format!("{year}-{month:02}")))?;
    Ok((first, last))
}

/// Parse a `YYYY-MM` period; `None` means the month of `today()`.
pub fn parse_month(period: Option<&str>) -> AppResult<(i32, u32)> {
    let Some(p) = period else {
        let t = today();
        return Ok((t.year(), t.month()));
    };

    let d = NaiveDate::parse_from_str(&format!("{}-01", p.trim()), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidDate(p.to_string()))?;
    Ok((d.year(), d.month()))
}
