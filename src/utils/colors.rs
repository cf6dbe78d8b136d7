//! ANSI color helper utilities for terminal output.

use regex::Regex;
use std::sync::LazyLock;
use unicode_width::UnicodeWidthStr;

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";
pub const MAGENTA: &str = "\x1b[35m";

/// Grey out placeholders ("-", empty, "0:00"), leave real values alone.
pub fn colorize_optional(value: &str) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" || v == "0:00" {
        format!("{GREY}{value}{RESET}")
    } else {
        value.to_string()
    }
}

/// Start times green, end times red.
pub fn colorize_start_end(value: &str, is_start: bool) -> String {
    let v = value.trim();
    if v.is_empty() || v == "-" {
        return format!("{GREY}{value}{RESET}");
    }

    if is_start {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}

static ANSI_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1B\[[0-9;]*[mK]").expect("valid ANSI escape pattern"));

/// Strip ANSI escapes.
pub fn visible(s: &str) -> String {
    ANSI_RE.replace_all(s, "").into_owned()
}

/// Terminal columns taken by `s`: escapes count for nothing, wide (CJK)
/// characters for two.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(visible(s).as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_strips_escapes() {
        assert_eq!(visible(&colorize_start_end("09:00", true)), "09:00");
        assert_eq!(visible(&colorize_optional("-")), "-");
    }

    #[test]
    fn wide_characters_take_two_columns() {
        assert_eq!(display_width("休憩"), 4);
        assert_eq!(display_width(&colorize_start_end("休憩", false)), 4);
        assert_eq!(display_width("ab"), 2);
    }
}
