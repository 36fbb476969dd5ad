//! Domain models.

pub mod audit_log;
pub mod download;
pub mod health;
pub mod platform;
pub mod version;
