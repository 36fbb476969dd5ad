//! PostgreSQL adapter for the audit trail and the relational liveness probe.

use async_trait::async_trait;
use sqlx::PgPool;

use super::{AuditStore, SecondaryHealthStore, StoreError};
use crate::models::audit_log::AuditEntry;

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed => StoreError::Connection(e.to_string()),
            _ => StoreError::Query(e.to_string()),
        }
    }
}

/// Relational store holding the `audit` table.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditStore for PgStore {
    async fn append(&self, entry: &AuditEntry) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO audit (id, command, candidate, version, platform, dist, vendor, host, agent, timestamp)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.command)
        .bind(&entry.candidate)
        .bind(&entry.version)
        .bind(&entry.platform)
        .bind(&entry.dist)
        .bind(&entry.vendor)
        .bind(&entry.host)
        .bind(&entry.agent)
        .bind(entry.timestamp)
        .execute(&self.db)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SecondaryHealthStore for PgStore {
    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.db).await?;
        Ok(())
    }
}
