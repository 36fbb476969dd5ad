//! Application error types and result alias.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::services::cli_download_service::CliDownloadError;
use crate::services::download_service::DownloadError;
use crate::storage::StoreError;

/// Application result type alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// PostgreSQL error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// MongoDB error
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Validation error (bad platform, command or version)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Not found error
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// A backing store could not be reached
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// A backing store answered with an error
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Address parse error
    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Connection(msg) => AppError::Unavailable(msg),
            StoreError::Query(msg) => AppError::Storage(msg),
        }
    }
}

impl From<DownloadError> for AppError {
    fn from(e: DownloadError) -> Self {
        match e {
            DownloadError::InvalidPlatform(_) => AppError::Validation(e.to_string()),
            DownloadError::NotFound { .. } | DownloadError::PlatformUnsupported { .. } => {
                AppError::NotFound(e.to_string())
            }
            DownloadError::Storage(store) => store.into(),
            DownloadError::InvalidArtifactUrl { .. } => AppError::Internal(e.to_string()),
        }
    }
}

impl From<CliDownloadError> for AppError {
    fn from(e: CliDownloadError) -> Self {
        match e {
            CliDownloadError::InvalidCommand(_)
            | CliDownloadError::BlankVersion
            | CliDownloadError::InvalidVersion(_)
            | CliDownloadError::InvalidPlatform(_)
            | CliDownloadError::NativeUnsupported(_) => AppError::Validation(e.to_string()),
            CliDownloadError::InvalidArtifactUrl(_) => AppError::Internal(e.to_string()),
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Config(_)
            | AppError::Database(_)
            | AppError::Migration(_)
            | AppError::Mongo(_)
            | AppError::Storage(_)
            | AppError::Io(_)
            | AppError::AddrParse(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, message) = match &self {
            AppError::Config(msg) => ("CONFIG_ERROR", msg.clone()),
            AppError::Database(_) => ("DATABASE_ERROR", "Database operation failed".to_string()),
            AppError::Migration(_) => ("MIGRATION_ERROR", "Database migration failed".to_string()),
            AppError::Mongo(_) => ("MONGO_ERROR", "Document store operation failed".to_string()),
            AppError::Validation(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            AppError::Unavailable(_) => (
                "SERVICE_UNAVAILABLE",
                "Backing store unavailable".to_string(),
            ),
            AppError::Storage(_) => ("STORAGE_ERROR", "Backing store query failed".to_string()),
            AppError::Io(_) => ("IO_ERROR", "IO operation failed".to_string()),
            AppError::AddrParse(_) => ("ADDR_PARSE_ERROR", "Invalid address".to_string()),
            AppError::Internal(msg) => ("INTERNAL_ERROR", msg.clone()),
        };
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, code = code, "Request error");
        } else {
            tracing::debug!(error = %self, code = code, "Request rejected");
        }

        let body = Json(json!({
            "code": code,
            "message": message,
        }));

        (status, body).into_response()
    }
}
