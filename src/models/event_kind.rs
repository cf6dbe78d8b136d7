use serde::{Deserialize, Serialize};
use std::fmt;

/// The four punch actions a user can record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    WorkStart,
    WorkEnd,
    BreakStart,
    BreakEnd,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::WorkStart,
        EventKind::WorkEnd,
        EventKind::BreakStart,
        EventKind::BreakEnd,
    ];

    /// Parse user input: accepts the DB spelling plus a few short aliases.
    pub fn ek_from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "work_start" | "in" | "start" => Some(Self::WorkStart),
            "work_end" | "out" | "end" => Some(Self::WorkEnd),
            "break_start" | "break" => Some(Self::BreakStart),
            "break_end" | "resume" => Some(Self::BreakEnd),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::WorkStart => "work_start",
            EventKind::WorkEnd => "work_end",
            EventKind::BreakStart => "break_start",
            EventKind::BreakEnd => "break_end",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "work_start" => Some(EventKind::WorkStart),
            "work_end" => Some(EventKind::WorkEnd),
            "break_start" => Some(EventKind::BreakStart),
            "break_end" => Some(EventKind::BreakEnd),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EventKind::WorkStart => "work start",
            EventKind::WorkEnd => "work end",
            EventKind::BreakStart => "break start",
            EventKind::BreakEnd => "break end",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_strings_are_stable() {
        for kind in EventKind::ALL {
            assert_eq!(EventKind::from_db_str(kind.to_db_str()), Some(kind));
        }
        assert_eq!(EventKind::from_db_str("in"), None);
    }

    #[test]
    fn user_aliases_are_accepted() {
        assert_eq!(EventKind::ek_from_str("IN"), Some(EventKind::WorkStart));
        assert_eq!(EventKind::ek_from_str("break-end"), Some(EventKind::BreakEnd));
        assert_eq!(EventKind::ek_from_str("lunch"), None);
    }
}
