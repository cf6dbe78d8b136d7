pub mod aggregate;
pub mod sessions;
