//! Version lookup with universal fallback.
//!
//! An exact (candidate, version, platform) record always wins. On a miss the
//! platform-agnostic `UNIVERSAL` record is tried. When both miss, a final
//! existence check separates an unknown candidate/version from a known one
//! that simply has no build for the requested platform.

use std::sync::Arc;

use thiserror::Error;

use crate::models::platform::Platform;
use crate::models::version::VersionRecord;
use crate::storage::{StoreError, VersionStore};

/// Resolution failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Version not found: {candidate} {version}")]
    NotFound { candidate: String, version: String },

    #[error("Platform {platform} not supported for {candidate} {version}")]
    PlatformUnsupported {
        candidate: String,
        version: String,
        platform: Platform,
    },

    #[error(transparent)]
    Storage(#[from] StoreError),
}

/// A resolved version record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub record: VersionRecord,
    pub requested: Platform,
    /// True when the record came from the universal fallback.
    pub fallback: bool,
}

impl Resolution {
    /// Audit identifier of the platform actually served.
    ///
    /// Records carrying a platform id outside the registry are reported
    /// verbatim.
    pub fn distributed_audit_id(&self) -> String {
        match Platform::from_storage_id(&self.record.platform) {
            Some(platform) => platform.audit_id().to_string(),
            None => self.record.platform.clone(),
        }
    }
}

#[derive(Clone)]
pub struct VersionResolver {
    store: Arc<dyn VersionStore>,
}

impl VersionResolver {
    pub fn new(store: Arc<dyn VersionStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(
        &self,
        candidate: &str,
        version: &str,
        platform: Platform,
    ) -> Result<Resolution, ResolveError> {
        if let Some(record) = self
            .store
            .find_version(candidate, version, platform.storage_id())
            .await?
        {
            return Ok(Resolution {
                record,
                requested: platform,
                fallback: false,
            });
        }

        if platform != Platform::Universal {
            if let Some(record) = self
                .store
                .find_version(candidate, version, Platform::Universal.storage_id())
                .await?
            {
                tracing::debug!(
                    candidate,
                    version,
                    platform = %platform,
                    "Serving universal fallback"
                );
                return Ok(Resolution {
                    record,
                    requested: platform,
                    fallback: true,
                });
            }
        }

        if self.store.version_exists(candidate, version).await? {
            Err(ResolveError::PlatformUnsupported {
                candidate: candidate.to_string(),
                version: version.to_string(),
                platform,
            })
        } else {
            Err(ResolveError::NotFound {
                candidate: candidate.to_string(),
                version: version.to_string(),
            })
        }
    }
}
