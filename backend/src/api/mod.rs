//! API module - HTTP handlers and middleware.

pub mod download_response;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;

use crate::config::Config;
use crate::services::audit_service::AuditService;
use crate::services::cli_download_service::CliDownloadService;
use crate::services::download_service::DownloadService;
use crate::services::health_service::HealthService;
use crate::services::version_resolver::VersionResolver;
use crate::storage::{AuditStore, PrimaryHealthStore, SecondaryHealthStore, VersionStore};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// The backing stores the services are wired to.
#[derive(Clone)]
pub struct Stores {
    pub versions: Arc<dyn VersionStore>,
    pub audit: Arc<dyn AuditStore>,
    pub primary_health: Arc<dyn PrimaryHealthStore>,
    pub secondary_health: Arc<dyn SecondaryHealthStore>,
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub download_service: DownloadService,
    pub cli_download_service: CliDownloadService,
    pub health_service: HealthService,
    pub metrics_handle: Option<Arc<PrometheusHandle>>,
}

impl AppState {
    pub fn new(config: Config, stores: Stores) -> Self {
        let audit = AuditService::new(stores.audit);
        let download_service =
            DownloadService::new(VersionResolver::new(stores.versions), audit.clone());
        let cli_download_service = CliDownloadService::new(
            audit,
            config.cli_release_base_url.clone(),
            config.native_release_base_url.clone(),
        );
        let health_service = HealthService::new(stores.primary_health, stores.secondary_health);

        Self {
            config,
            download_service,
            cli_download_service,
            health_service,
            metrics_handle: None,
        }
    }

    /// Set the Prometheus metrics handle for rendering /metrics output.
    pub fn set_metrics_handle(&mut self, handle: PrometheusHandle) {
        self.metrics_handle = Some(Arc::new(handle));
    }
}

pub type SharedState = Arc<AppState>;
