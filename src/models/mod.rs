pub mod day_summary;
pub mod event;
pub mod event_kind;
pub mod session;
pub mod settings;
