//! Redirect response for resolved downloads.
//!
//! A resolution is answered with `302 Found` pointing at the artifact URL,
//! plus one checksum header per algorithm and an archive type header.

use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::error::{AppError, Result};
use crate::models::download::DownloadDescriptor;

/// Non-permanent redirect carrying integrity metadata headers.
#[derive(Debug)]
pub struct DownloadRedirect {
    headers: HeaderMap,
}

impl DownloadRedirect {
    /// Build the redirect for a descriptor.
    ///
    /// Fails only when the artifact URL cannot be used as a `Location`
    /// header. Checksum entries that cannot be expressed as headers are
    /// skipped and logged.
    pub fn from_descriptor(descriptor: &DownloadDescriptor, header_prefix: &str) -> Result<Self> {
        let location = HeaderValue::from_str(&descriptor.url).map_err(|_| {
            AppError::Internal(format!("Artifact URL is not a valid header: {}", descriptor.url))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(LOCATION, location);

        for (name, value) in descriptor.metadata_headers(header_prefix) {
            match (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(&value),
            ) {
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => {
                    tracing::warn!(header = %name, "Skipping checksum header with invalid characters");
                }
            }
        }

        Ok(Self { headers })
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

impl IntoResponse for DownloadRedirect {
    fn into_response(self) -> Response {
        (StatusCode::FOUND, self.headers).into_response()
    }
}
