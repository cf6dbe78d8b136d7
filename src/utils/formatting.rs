//! Formatting utilities used for CLI outputs.

use crate::core::validator::WorkState;
use crate::models::session::SessionStatus;
use crate::utils::colors::{BLUE, GREEN, GREY, MAGENTA, RESET, YELLOW};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Earnings with thousands separators, no decimals (display only).
pub fn format_money(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.abs().to_string();
    let mut out = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if rounded < 0 {
        format!("-{out}")
    } else {
        out
    }
}

/// Label and ANSI color for a session status.
pub fn describe_status(status: SessionStatus) -> (&'static str, &'static str) {
    match status {
        SessionStatus::Complete => (status.label(), GREEN),
        SessionStatus::InProgress => (status.label(), YELLOW),
        SessionStatus::Superseded => (status.label(), MAGENTA),
    }
}

pub fn describe_state(state: WorkState) -> String {
    let color = match state {
        WorkState::Idle => GREY,
        WorkState::Working => GREEN,
        WorkState::OnBreak => BLUE,
    };
    format!("{color}{}{RESET}", state.label())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_has_separators() {
        assert_eq!(format_money(25000.0), "25,000");
        assert_eq!(format_money(999.6), "1,000");
        assert_eq!(format_money(12.0), "12");
        assert_eq!(format_money(-1234567.0), "-1,234,567");
    }
}
