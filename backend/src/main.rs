//! Download Broker - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use download_broker_backend::{
    api::{self, Stores},
    config::Config,
    db,
    error::Result,
    services::metrics_service,
    storage::{mongo::MongoStore, postgres::PgStore},
    telemetry,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Held until shutdown so pending spans are flushed
    let _otel_guard = telemetry::init_tracing(
        config.otel_endpoint.as_deref(),
        &config.otel_service_name,
        &config.log_level,
    );
    tracing::info!(config = ?config, "Starting Download Broker");

    // Connect to PostgreSQL
    let db_pool = db::create_pool(&config.database_url, config.db_max_connections).await?;
    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("./migrations").run(&db_pool).await?;
    tracing::info!("Database migrations complete");

    // The MongoDB driver connects lazily; failures surface in health checks
    let mongo = db::connect_mongo(&config.mongodb_uri, &config.mongodb_database).await?;
    tracing::info!(database = %config.mongodb_database, "MongoDB client configured");

    let mongo_store = Arc::new(MongoStore::new(&mongo));
    let pg_store = Arc::new(PgStore::new(db_pool));
    let stores = Stores {
        versions: mongo_store.clone(),
        audit: pg_store.clone(),
        primary_health: mongo_store,
        secondary_health: pg_store,
    };

    let mut app_state = api::AppState::new(config.clone(), stores);
    match metrics_service::init_metrics() {
        Ok(handle) => {
            app_state.set_metrics_handle(handle);
            tracing::info!("Prometheus metrics recorder initialized");
        }
        Err(e) => tracing::warn!(error = %e, "Metrics disabled"),
    }
    let state = Arc::new(app_state);

    let app = Router::new()
        .merge(api::routes::create_router(state))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
