//! MongoDB adapter for version records and the application liveness record.

use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::error::ErrorKind;
use mongodb::{Collection, Database};

use super::{PrimaryHealthStore, StoreError, VersionStore};
use crate::models::version::VersionRecord;

const VERSIONS_COLLECTION: &str = "versions";
const APPLICATION_COLLECTION: &str = "application";
const ALIVE_FIELD: &str = "alive";

impl From<mongodb::error::Error> for StoreError {
    fn from(e: mongodb::error::Error) -> Self {
        match e.kind.as_ref() {
            ErrorKind::Io { .. }
            | ErrorKind::ServerSelection { .. }
            | ErrorKind::ConnectionPoolCleared { .. }
            | ErrorKind::DnsResolve { .. } => StoreError::Connection(e.to_string()),
            _ => StoreError::Query(e.to_string()),
        }
    }
}

/// Document store holding the `versions` and `application` collections.
#[derive(Clone)]
pub struct MongoStore {
    versions: Collection<VersionRecord>,
    application: Collection<Document>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            versions: db.collection(VERSIONS_COLLECTION),
            application: db.collection(APPLICATION_COLLECTION),
        }
    }
}

#[async_trait]
impl VersionStore for MongoStore {
    async fn find_version(
        &self,
        candidate: &str,
        version: &str,
        platform_id: &str,
    ) -> Result<Option<VersionRecord>, StoreError> {
        let record = self
            .versions
            .find_one(doc! {
                "candidate": candidate,
                "version": version,
                "platform": platform_id,
            })
            .await?;
        Ok(record)
    }

    async fn version_exists(&self, candidate: &str, version: &str) -> Result<bool, StoreError> {
        let count = self
            .versions
            .count_documents(doc! { "candidate": candidate, "version": version })
            .limit(1)
            .await?;
        Ok(count > 0)
    }
}

#[async_trait]
impl PrimaryHealthStore for MongoStore {
    async fn application_statuses(&self) -> Result<Vec<String>, StoreError> {
        let records: Vec<Document> = self.application.find(doc! {}).await?.try_collect().await?;
        Ok(records.iter().map(alive_value).collect())
    }
}

/// The `alive` field rendered as text; missing fields read as empty.
fn alive_value(record: &Document) -> String {
    match record.get(ALIVE_FIELD) {
        Some(Bson::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alive_value_string() {
        let record = doc! { "alive": "OK" };
        assert_eq!(alive_value(&record), "OK");
    }

    #[test]
    fn test_alive_value_missing_field() {
        let record = doc! { "other": 1 };
        assert_eq!(alive_value(&record), "");
    }

    #[test]
    fn test_alive_value_non_string() {
        let record = doc! { "alive": true };
        assert_eq!(alive_value(&record), "true");
    }
}
