//! Candidate download resolution.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use utoipa::OpenApi;

use super::client_info;
use crate::api::download_response::DownloadRedirect;
use crate::api::SharedState;
use crate::error::Result;

#[derive(OpenApi)]
#[openapi(paths(download_version))]
pub struct DownloadApiDoc;

/// Redirect to the artifact for a candidate version on a platform.
///
/// Falls back to the universal build when no platform-specific one exists.
#[utoipa::path(
    get,
    path = "/download/{candidate}/{version}/{platform}",
    tag = "download",
    params(
        ("candidate" = String, Path, description = "Candidate name, e.g. java"),
        ("version" = String, Path, description = "Candidate version"),
        ("platform" = String, Path, description = "Client platform code, e.g. linuxx64"),
    ),
    responses(
        (status = 302, description = "Redirect to the artifact with checksum and archive type headers"),
        (status = 400, description = "Unknown platform code", body = crate::api::openapi::ErrorResponse),
        (status = 404, description = "Version not found or not built for the platform", body = crate::api::openapi::ErrorResponse),
        (status = 503, description = "Version store unavailable", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn download_version(
    State(state): State<SharedState>,
    Path((candidate, version, platform)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Result<DownloadRedirect> {
    let client = client_info(&headers);
    let descriptor = state
        .download_service
        .resolve_download(&candidate, &version, &platform, &client)
        .await?;

    DownloadRedirect::from_descriptor(&descriptor, &state.config.checksum_header_prefix)
}
