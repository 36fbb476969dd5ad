//! Audit trail of successful download resolutions.
//!
//! Recording is best-effort: a failed write is logged and counted but never
//! changes the response the client gets.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::models::audit_log::AuditEntry;
use crate::services::metrics_service;
use crate::storage::{AuditStore, StoreError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Audit recording failed: {0}")]
pub struct RecordingFailed(#[from] pub StoreError);

/// Audit service
#[derive(Clone)]
pub struct AuditService {
    store: Arc<dyn AuditStore>,
}

impl AuditService {
    pub fn new(store: Arc<dyn AuditStore>) -> Self {
        Self { store }
    }

    /// Append an audit entry.
    pub async fn record(&self, entry: &AuditEntry) -> Result<Uuid, RecordingFailed> {
        self.store.append(entry).await?;
        Ok(entry.id)
    }

    /// Append an audit entry, logging and discarding any failure.
    ///
    /// Returns whether the entry was written.
    pub async fn record_best_effort(&self, entry: AuditEntry) -> bool {
        match self.record(&entry).await {
            Ok(id) => {
                tracing::debug!(
                    audit_id = %id,
                    command = %entry.command,
                    candidate = %entry.candidate,
                    version = %entry.version,
                    platform = %entry.platform,
                    dist = %entry.dist,
                    "Recorded download audit"
                );
                true
            }
            Err(e) => {
                metrics_service::record_audit_failure();
                tracing::warn!(
                    audit_id = %entry.id,
                    candidate = %entry.candidate,
                    version = %entry.version,
                    error = %e,
                    "Failed to record download audit"
                );
                false
            }
        }
    }
}
