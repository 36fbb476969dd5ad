//! Application configuration loaded from environment variables.

use crate::error::{AppError, Result};
use std::env;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    /// PostgreSQL connection URL (audit trail)
    pub database_url: String,

    /// Maximum PostgreSQL pool size
    pub db_max_connections: u32,

    /// MongoDB connection URI (versions and application record)
    pub mongodb_uri: String,

    /// MongoDB database name
    pub mongodb_database: String,

    /// Server bind address (host:port)
    pub bind_address: String,

    /// Log level
    pub log_level: String,

    /// OTLP collector endpoint; tracing export is disabled when unset
    pub otel_endpoint: Option<String>,

    /// Service name reported to the trace collector
    pub otel_service_name: String,

    /// `{prefix}` in the `X-{prefix}-Checksum-{ALGO}` response headers
    pub checksum_header_prefix: String,

    /// Base URL of CLI bundle releases
    pub cli_release_base_url: String,

    /// Base URL of native binary releases
    pub native_release_base_url: String,
}

redacted_debug!(Config {
    redact database_url,
    show db_max_connections,
    redact mongodb_uri,
    show mongodb_database,
    show bind_address,
    show log_level,
    show otel_endpoint,
    show otel_service_name,
    show checksum_header_prefix,
    show cli_release_base_url,
    show native_release_base_url,
});

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .map_err(|_| AppError::Config("DATABASE_URL not set".into()))?,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".into())
                .parse()
                .unwrap_or(20),
            mongodb_uri: env::var("MONGODB_URI")
                .map_err(|_| AppError::Config("MONGODB_URI not set".into()))?,
            mongodb_database: env::var("MONGODB_DATABASE").unwrap_or_else(|_| "broker".into()),
            bind_address: env::var("BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            otel_endpoint: env::var("OTEL_EXPORTER_OTLP_ENDPOINT").ok(),
            otel_service_name: env::var("OTEL_SERVICE_NAME")
                .unwrap_or_else(|_| "download-broker".into()),
            checksum_header_prefix: env::var("CHECKSUM_HEADER_PREFIX")
                .unwrap_or_else(|_| "Broker".into()),
            cli_release_base_url: env::var("CLI_RELEASE_BASE_URL").unwrap_or_else(|_| {
                "https://github.com/download-broker/cli/releases/download".into()
            }),
            native_release_base_url: env::var("NATIVE_RELEASE_BASE_URL").unwrap_or_else(|_| {
                "https://github.com/download-broker/cli-native/releases/download".into()
            }),
        })
    }
}
