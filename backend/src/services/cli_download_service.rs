//! Redirects for the broker's own client tooling.
//!
//! Two artifacts are served:
//! - the CLI bundle, a single platform-agnostic zip
//! - the native helper binary, built per target triple
//!
//! Both are audited like candidate downloads.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::models::audit_log::{AuditEntry, ClientInfo};
use crate::models::download::{self, DownloadDescriptor};
use crate::models::platform::{InvalidPlatform, Platform};
use crate::services::archive_classifier;
use crate::services::audit_service::AuditService;
use crate::services::metrics_service;

/// Candidate name recorded for CLI bundle downloads.
pub const CLI_CANDIDATE: &str = "cli";
/// Candidate name recorded for native binary downloads.
pub const NATIVE_CANDIDATE: &str = "cli-native";

/// What the client is doing with the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Install,
    Selfupdate,
}

impl CliCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            CliCommand::Install => "install",
            CliCommand::Selfupdate => "selfupdate",
        }
    }
}

impl FromStr for CliCommand {
    type Err = CliDownloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "install" => Ok(CliCommand::Install),
            "selfupdate" => Ok(CliCommand::Selfupdate),
            _ => Err(CliDownloadError::InvalidCommand(s.to_string())),
        }
    }
}

impl fmt::Display for CliCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliDownloadError {
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Version must not be blank")]
    BlankVersion,

    #[error("Invalid version: {0:?}")]
    InvalidVersion(String),

    #[error(transparent)]
    InvalidPlatform(#[from] InvalidPlatform),

    #[error("No native binary for platform {0}")]
    NativeUnsupported(Platform),

    /// The configured release base URL produced an unusable redirect target.
    #[error("Release URL is not a valid redirect target: {0:?}")]
    InvalidArtifactUrl(String),
}

impl CliDownloadError {
    fn label(&self) -> &'static str {
        match self {
            CliDownloadError::InvalidCommand(_) => "invalid_command",
            CliDownloadError::BlankVersion => "blank_version",
            CliDownloadError::InvalidVersion(_) => "invalid_version",
            CliDownloadError::InvalidPlatform(_) => "invalid_platform",
            CliDownloadError::NativeUnsupported(_) => "native_unsupported",
            CliDownloadError::InvalidArtifactUrl(_) => "invalid_artifact_url",
        }
    }
}

/// Validated request parameters shared by both artifacts.
struct CliRequest<'a> {
    command: CliCommand,
    version: &'a str,
    platform: Platform,
}

/// Versions are spliced into release URLs, so only plain version tokens are
/// accepted: ASCII alphanumerics and `.`, `-`, `_`, `+`, with no `..`.
fn is_release_version(version: &str) -> bool {
    version
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-' | b'_' | b'+'))
        && !version.contains("..")
}

fn parse_request<'a>(
    command: &str,
    version: &'a str,
    platform_code: &str,
) -> Result<CliRequest<'a>, CliDownloadError> {
    let command = command.parse::<CliCommand>()?;
    let version = version.trim();
    if version.is_empty() {
        return Err(CliDownloadError::BlankVersion);
    }
    if !is_release_version(version) {
        return Err(CliDownloadError::InvalidVersion(version.to_string()));
    }
    let platform = Platform::normalize(platform_code)?;
    Ok(CliRequest {
        command,
        version,
        platform,
    })
}

#[derive(Clone)]
pub struct CliDownloadService {
    audit: AuditService,
    cli_base_url: String,
    native_base_url: String,
}

impl CliDownloadService {
    pub fn new(
        audit: AuditService,
        cli_base_url: impl Into<String>,
        native_base_url: impl Into<String>,
    ) -> Self {
        Self {
            audit,
            cli_base_url: cli_base_url.into().trim_end_matches('/').to_string(),
            native_base_url: native_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Resolve the platform-agnostic CLI bundle. Any known platform,
    /// including `exotic`, is accepted.
    pub async fn resolve_cli(
        &self,
        command: &str,
        version: &str,
        platform_code: &str,
        client: &ClientInfo,
    ) -> Result<DownloadDescriptor, CliDownloadError> {
        let result = async {
            let req = parse_request(command, version, platform_code)?;
            let url = format!(
                "{}/{}/cli-{}.zip",
                self.cli_base_url, req.version, req.version
            );
            self.audit_and_describe(
                &req,
                CLI_CANDIDATE,
                Platform::Universal.audit_id(),
                url,
                client,
            )
            .await
        }
        .await;
        record_outcome("cli", &result);
        result
    }

    /// Resolve the native helper binary for a platform with a known target
    /// triple.
    pub async fn resolve_native(
        &self,
        command: &str,
        version: &str,
        platform_code: &str,
        client: &ClientInfo,
    ) -> Result<DownloadDescriptor, CliDownloadError> {
        let result = async {
            let req = parse_request(command, version, platform_code)?;
            let target = req
                .platform
                .native_target()
                .ok_or(CliDownloadError::NativeUnsupported(req.platform))?;
            let url = format!(
                "{}/v{}/cli-native-{}-{}.zip",
                self.native_base_url, req.version, req.version, target
            );
            self.audit_and_describe(&req, NATIVE_CANDIDATE, req.platform.audit_id(), url, client)
                .await
        }
        .await;
        record_outcome("native", &result);
        result
    }

    async fn audit_and_describe(
        &self,
        req: &CliRequest<'_>,
        candidate: &str,
        dist: &str,
        url: String,
        client: &ClientInfo,
    ) -> Result<DownloadDescriptor, CliDownloadError> {
        if !download::is_redirect_safe(&url) {
            tracing::error!(url = ?url, "Release URL is not a valid redirect target");
            return Err(CliDownloadError::InvalidArtifactUrl(url));
        }

        let entry = AuditEntry::new(
            req.command.as_str(),
            candidate,
            req.version,
            req.platform.audit_id(),
            dist,
        )
        .client(client);
        self.audit.record_best_effort(entry).await;

        tracing::info!(
            candidate,
            command = %req.command,
            version = req.version,
            platform = %req.platform,
            url = %url,
            "Resolved CLI download"
        );

        Ok(DownloadDescriptor {
            archive_type: archive_classifier::classify(&url),
            url,
            checksums: Vec::new(),
        })
    }
}

fn record_outcome(kind: &str, result: &Result<DownloadDescriptor, CliDownloadError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.label(),
    };
    metrics_service::record_download_resolution(kind, outcome);
}
