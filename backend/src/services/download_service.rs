//! Candidate download resolution.
//!
//! Normalizes the platform, resolves the version record, assembles the
//! redirect descriptor and records the audit entry.

use thiserror::Error;

use crate::models::audit_log::{AuditEntry, ClientInfo, INSTALL_COMMAND};
use crate::models::download::{self, DownloadDescriptor};
use crate::models::platform::{InvalidPlatform, Platform};
use crate::models::version::VersionRecord;
use crate::services::archive_classifier;
use crate::services::audit_service::AuditService;
use crate::services::checksum_prioritizer;
use crate::services::metrics_service;
use crate::services::version_resolver::{ResolveError, VersionResolver};
use crate::storage::StoreError;

/// Download failures visible to the HTTP layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    #[error(transparent)]
    InvalidPlatform(#[from] InvalidPlatform),

    #[error("Version not found: {candidate} {version}")]
    NotFound { candidate: String, version: String },

    #[error("Platform {platform} not supported for {candidate} {version}")]
    PlatformUnsupported {
        candidate: String,
        version: String,
        platform: Platform,
    },

    #[error(transparent)]
    Storage(StoreError),

    /// The stored artifact URL cannot be sent as a redirect target.
    #[error("Artifact URL for {candidate} {version} is not a valid redirect target")]
    InvalidArtifactUrl { candidate: String, version: String },
}

impl DownloadError {
    pub fn label(&self) -> &'static str {
        match self {
            DownloadError::InvalidPlatform(_) => "invalid_platform",
            DownloadError::NotFound { .. } => "not_found",
            DownloadError::PlatformUnsupported { .. } => "platform_unsupported",
            DownloadError::Storage(_) => "storage_error",
            DownloadError::InvalidArtifactUrl { .. } => "invalid_artifact_url",
        }
    }
}

impl From<ResolveError> for DownloadError {
    fn from(e: ResolveError) -> Self {
        match e {
            ResolveError::NotFound { candidate, version } => {
                DownloadError::NotFound { candidate, version }
            }
            ResolveError::PlatformUnsupported {
                candidate,
                version,
                platform,
            } => DownloadError::PlatformUnsupported {
                candidate,
                version,
                platform,
            },
            ResolveError::Storage(e) => DownloadError::Storage(e),
        }
    }
}

/// Build the redirect descriptor for a version record.
pub fn assemble(record: &VersionRecord) -> DownloadDescriptor {
    DownloadDescriptor {
        url: record.url.clone(),
        archive_type: archive_classifier::classify(&record.url),
        checksums: checksum_prioritizer::prioritize(&record.checksums)
            .into_iter()
            .map(|(algo, digest)| (algo.to_uppercase(), digest))
            .collect(),
    }
}

#[derive(Clone)]
pub struct DownloadService {
    resolver: VersionResolver,
    audit: AuditService,
}

impl DownloadService {
    pub fn new(resolver: VersionResolver, audit: AuditService) -> Self {
        Self { resolver, audit }
    }

    pub async fn resolve_download(
        &self,
        candidate: &str,
        version: &str,
        platform_code: &str,
        client: &ClientInfo,
    ) -> Result<DownloadDescriptor, DownloadError> {
        let result = self
            .resolve_and_audit(candidate, version, platform_code, client)
            .await;
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.label(),
        };
        metrics_service::record_download_resolution("candidate", outcome);
        result
    }

    async fn resolve_and_audit(
        &self,
        candidate: &str,
        version: &str,
        platform_code: &str,
        client: &ClientInfo,
    ) -> Result<DownloadDescriptor, DownloadError> {
        let platform = Platform::normalize(platform_code)?;
        let resolution = self.resolver.resolve(candidate, version, platform).await?;
        let descriptor = assemble(&resolution.record);
        if !download::is_redirect_safe(&descriptor.url) {
            tracing::error!(
                candidate,
                version,
                platform = %platform,
                url = ?descriptor.url,
                "Stored artifact URL is not a valid redirect target"
            );
            return Err(DownloadError::InvalidArtifactUrl {
                candidate: resolution.record.candidate,
                version: resolution.record.version,
            });
        }

        let entry = AuditEntry::new(
            INSTALL_COMMAND,
            &resolution.record.candidate,
            &resolution.record.version,
            platform.audit_id(),
            resolution.distributed_audit_id(),
        )
        .vendor(resolution.record.vendor.clone())
        .client(client);
        self.audit.record_best_effort(entry).await;

        tracing::info!(
            candidate,
            version,
            platform = %platform,
            fallback = resolution.fallback,
            url = %descriptor.url,
            "Resolved download"
        );

        Ok(descriptor)
    }
}
