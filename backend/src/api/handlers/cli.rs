//! CLI bundle and native helper downloads.

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use utoipa::OpenApi;

use super::client_info;
use crate::api::download_response::DownloadRedirect;
use crate::api::SharedState;
use crate::error::Result;

#[derive(OpenApi)]
#[openapi(paths(download_cli, download_native))]
pub struct CliApiDoc;

#[utoipa::path(
    get,
    path = "/download/cli/{command}/{version}/{platform}",
    tag = "cli",
    params(
        ("command" = String, Path, description = "install or selfupdate"),
        ("version" = String, Path, description = "CLI version"),
        ("platform" = String, Path, description = "Client platform code"),
    ),
    responses(
        (status = 302, description = "Redirect to the CLI bundle"),
        (status = 400, description = "Unknown command, blank version or unknown platform", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn download_cli(
    State(state): State<SharedState>,
    Path((command, version, platform)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Result<DownloadRedirect> {
    let descriptor = state
        .cli_download_service
        .resolve_cli(&command, &version, &platform, &client_info(&headers))
        .await?;

    DownloadRedirect::from_descriptor(&descriptor, &state.config.checksum_header_prefix)
}

/// Only platforms with a native build target are served.
#[utoipa::path(
    get,
    path = "/download/native/{command}/{version}/{platform}",
    tag = "cli",
    params(
        ("command" = String, Path, description = "install or selfupdate"),
        ("version" = String, Path, description = "Native helper version"),
        ("platform" = String, Path, description = "Client platform code"),
    ),
    responses(
        (status = 302, description = "Redirect to the native helper binary"),
        (status = 400, description = "Invalid request or no native build for the platform", body = crate::api::openapi::ErrorResponse),
    )
)]
pub async fn download_native(
    State(state): State<SharedState>,
    Path((command, version, platform)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Result<DownloadRedirect> {
    let descriptor = state
        .cli_download_service
        .resolve_native(&command, &version, &platform, &client_info(&headers))
        .await?;

    DownloadRedirect::from_descriptor(&descriptor, &state.config.checksum_header_prefix)
}
