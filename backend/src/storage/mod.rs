//! Backing store interfaces and their adapters.
//!
//! The broker core only talks to the traits defined here. MongoDB serves
//! version records and the application liveness record; PostgreSQL holds the
//! audit trail.

pub mod memory;
pub mod mongo;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::audit_log::AuditEntry;
use crate::models::version::VersionRecord;

/// Failure reported by a backing store adapter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached (network, pool exhaustion, TLS).
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// The store was reached but the operation failed.
    #[error("Store query failed: {0}")]
    Query(String),
}

impl StoreError {
    pub fn is_connection(&self) -> bool {
        matches!(self, StoreError::Connection(_))
    }
}

/// Read access to candidate version records.
#[async_trait]
pub trait VersionStore: Send + Sync {
    /// Find the record for an exact (candidate, version, platform id) triple.
    async fn find_version(
        &self,
        candidate: &str,
        version: &str,
        platform_id: &str,
    ) -> Result<Option<VersionRecord>, StoreError>;

    /// Whether any record exists for (candidate, version) on any platform.
    async fn version_exists(&self, candidate: &str, version: &str) -> Result<bool, StoreError>;
}

/// Append-only audit trail.
#[async_trait]
pub trait AuditStore: Send + Sync {
    async fn append(&self, entry: &AuditEntry) -> Result<(), StoreError>;
}

/// Liveness probe for the primary (document) store.
#[async_trait]
pub trait PrimaryHealthStore: Send + Sync {
    /// Status values of every application record, in store order.
    async fn application_statuses(&self) -> Result<Vec<String>, StoreError>;
}

/// Liveness probe for the secondary (relational) store.
#[async_trait]
pub trait SecondaryHealthStore: Send + Sync {
    /// Run a trivial round-trip query.
    async fn ping(&self) -> Result<(), StoreError>;
}
