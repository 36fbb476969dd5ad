//! Business logic services.

pub mod archive_classifier;
pub mod audit_service;
pub mod checksum_prioritizer;
pub mod cli_download_service;
pub mod download_service;
pub mod health_service;
pub mod metrics_service;
pub mod version_resolver;
