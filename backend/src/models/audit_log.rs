//! Audit log model.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Command tag recorded for candidate downloads.
pub const INSTALL_COMMAND: &str = "install";

/// One successful download resolution. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct AuditEntry {
    pub id: Uuid,
    pub command: String,
    pub candidate: String,
    pub version: String,
    /// Audit identifier of the platform the client asked for.
    pub platform: String,
    /// Audit identifier of the platform actually served; `UNIVERSAL` after a
    /// fallback.
    pub dist: String,
    pub vendor: Option<String>,
    pub host: Option<String>,
    pub agent: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(
        command: impl Into<String>,
        candidate: impl Into<String>,
        version: impl Into<String>,
        platform: impl Into<String>,
        dist: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            command: command.into(),
            candidate: candidate.into(),
            version: version.into(),
            platform: platform.into(),
            dist: dist.into(),
            vendor: None,
            host: None,
            agent: None,
            timestamp: Utc::now(),
        }
    }

    pub fn vendor(mut self, vendor: Option<String>) -> Self {
        self.vendor = vendor;
        self
    }

    pub fn client(mut self, client: &ClientInfo) -> Self {
        self.host = client.host.clone();
        self.agent = client.agent.clone();
        self
    }
}

/// Request metadata about the downloading client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub host: Option<String>,
    pub agent: Option<String>,
}

impl ClientInfo {
    pub fn new(host: Option<String>, agent: Option<String>) -> Self {
        Self { host, agent }
    }
}
