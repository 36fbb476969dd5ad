//! Database connection setup.

use crate::error::Result;
use mongodb::options::ClientOptions;
use mongodb::{Client, Database};
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Create a new PostgreSQL connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(600))
        .connect(database_url)
        .await?;

    Ok(pool)
}

/// Connect to MongoDB and select the broker database
pub async fn connect_mongo(uri: &str, database: &str) -> Result<Database> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some("download-broker".to_string());
    options.server_selection_timeout = Some(Duration::from_secs(5));

    let client = Client::with_options(options)?;
    Ok(client.database(database))
}
