//! In-memory store implementations.
//!
//! Used by the test suites and for running the router without databases.
//! Each store can be switched into a failing mode to exercise error paths.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{AuditStore, PrimaryHealthStore, SecondaryHealthStore, StoreError, VersionStore};
use crate::models::audit_log::AuditEntry;
use crate::models::version::VersionRecord;

#[derive(Default)]
pub struct InMemoryVersionStore {
    records: RwLock<Vec<VersionRecord>>,
    failure: RwLock<Option<StoreError>>,
}

impl InMemoryVersionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<VersionRecord>) -> Self {
        Self {
            records: RwLock::new(records),
            failure: RwLock::new(None),
        }
    }

    pub async fn insert(&self, record: VersionRecord) {
        self.records.write().await.push(record);
    }

    /// Make every subsequent call fail with `error`.
    pub async fn fail_with(&self, error: StoreError) {
        *self.failure.write().await = Some(error);
    }

    async fn check_failure(&self) -> Result<(), StoreError> {
        match self.failure.read().await.as_ref() {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl VersionStore for InMemoryVersionStore {
    async fn find_version(
        &self,
        candidate: &str,
        version: &str,
        platform_id: &str,
    ) -> Result<Option<VersionRecord>, StoreError> {
        self.check_failure().await?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.candidate == candidate && r.version == version && r.platform == platform_id)
            .cloned())
    }

    async fn version_exists(&self, candidate: &str, version: &str) -> Result<bool, StoreError> {
        self.check_failure().await?;
        Ok(self
            .records
            .read()
            .await
            .iter()
            .any(|r| r.candidate == candidate && r.version == version))
    }
}

#[derive(Default)]
pub struct InMemoryAuditStore {
    entries: RwLock<Vec<AuditEntry>>,
    failure: RwLock<Option<StoreError>>,
}

impl InMemoryAuditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn fail_with(&self, error: StoreError) {
        *self.failure.write().await = Some(error);
    }

    pub async fn entries(&self) -> Vec<AuditEntry> {
        self.entries.read().await.clone()
    }
}

#[async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn append(&self, entry: &AuditEntry) -> Result<(), StoreError> {
        if let Some(e) = self.failure.read().await.as_ref() {
            return Err(e.clone());
        }
        self.entries.write().await.push(entry.clone());
        Ok(())
    }
}

/// Primary health probe answering with a fixed result.
pub struct StaticPrimaryHealth {
    result: RwLock<Result<Vec<String>, StoreError>>,
}

impl StaticPrimaryHealth {
    /// A single application record with the given status value.
    pub fn with_status(status: &str) -> Self {
        Self::with_result(Ok(vec![status.to_string()]))
    }

    pub fn with_result(result: Result<Vec<String>, StoreError>) -> Self {
        Self {
            result: RwLock::new(result),
        }
    }

    pub async fn set(&self, result: Result<Vec<String>, StoreError>) {
        *self.result.write().await = result;
    }
}

#[async_trait]
impl PrimaryHealthStore for StaticPrimaryHealth {
    async fn application_statuses(&self) -> Result<Vec<String>, StoreError> {
        self.result.read().await.clone()
    }
}

/// Secondary health probe answering with a fixed result.
pub struct StaticSecondaryHealth {
    result: RwLock<Result<(), StoreError>>,
}

impl StaticSecondaryHealth {
    pub fn up() -> Self {
        Self::with_result(Ok(()))
    }

    pub fn with_result(result: Result<(), StoreError>) -> Self {
        Self {
            result: RwLock::new(result),
        }
    }

    pub async fn set(&self, result: Result<(), StoreError>) {
        *self.result.write().await = result;
    }
}

#[async_trait]
impl SecondaryHealthStore for StaticSecondaryHealth {
    async fn ping(&self) -> Result<(), StoreError> {
        self.result.read().await.clone()
    }
}
