use serde::Serialize;

/// Per-owner settings row.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Settings {
    pub owner: String,
    pub hourly_rate: f64,
    pub updated_at: String,
}
