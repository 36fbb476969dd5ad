//! OpenAPI document generated from handler annotations via utoipa.

use axum::Json;
use utoipa::OpenApi;

/// Root document; each handler module contributes its own `*ApiDoc`, merged
/// in by [`build_openapi`].
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Download Broker API",
        description = "Resolves candidate, CLI and native helper downloads to artifact redirects.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Current server"),
    ),
    tags(
        (name = "download", description = "Candidate version downloads"),
        (name = "cli", description = "CLI bundle and native helper downloads"),
        (name = "health", description = "Backing store liveness"),
    ),
    components(schemas(ErrorResponse))
)]
pub struct ApiDoc;

/// Error body returned by every endpoint on failure.
#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code (e.g. "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
}

pub fn build_openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    doc.merge(super::handlers::download::DownloadApiDoc::openapi());
    doc.merge(super::handlers::cli::CliApiDoc::openapi());
    doc.merge(super::handlers::health::HealthApiDoc::openapi());
    doc
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(build_openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_route() {
        let spec = build_openapi();

        assert_eq!(spec.info.title, "Download Broker API");
        for path in [
            "/download/{candidate}/{version}/{platform}",
            "/download/cli/{command}/{version}/{platform}",
            "/download/native/{command}/{version}/{platform}",
            "/meta/alive",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn test_openapi_schemas_and_tags() {
        let spec = build_openapi();

        let schemas = &spec.components.as_ref().unwrap().schemas;
        for name in ["ErrorResponse", "HealthResponse", "CheckStatus", "StoreStatus"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }

        let tags: Vec<&str> = spec
            .tags
            .as_ref()
            .map_or(vec![], |t| t.iter().map(|tag| tag.name.as_str()).collect());
        assert_eq!(tags, vec!["download", "cli", "health"]);

        let json = serde_json::to_string(&spec).expect("spec should serialize");
        assert!(json.contains("\"/meta/alive\""));
    }
}
