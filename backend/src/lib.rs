//! Download Broker - Backend Library
//!
//! Resolves SDK candidate, CLI and native helper downloads to artifact
//! redirects, records an audit trail, and reports liveness of its two
//! backing stores.

#[macro_use]
mod macros;

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod telemetry;

pub use config::Config;
pub use error::{AppError, Result};
