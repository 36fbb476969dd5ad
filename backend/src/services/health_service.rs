//! Liveness aggregation over the primary and secondary stores.
//!
//! Both stores are probed concurrently and the results combined into a
//! single [`HealthOutcome`]. Nothing is cached between calls.

use std::sync::Arc;

use crate::models::health::{HealthCause, HealthOutcome};
use crate::services::metrics_service;
use crate::storage::{PrimaryHealthStore, SecondaryHealthStore, StoreError};

/// Status value the application record must hold for the primary store to
/// count as up.
pub const ALIVE_SENTINEL: &str = "OK";

impl From<StoreError> for HealthCause {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Connection(msg) => HealthCause::Connection(msg),
            StoreError::Query(msg) => HealthCause::Query(msg),
        }
    }
}

/// Classify the application records read from the primary store.
fn classify_application(statuses: Vec<String>) -> Result<(), HealthCause> {
    match statuses.as_slice() {
        [] => Err(HealthCause::ApplicationRecordMissing),
        [status] if status == ALIVE_SENTINEL => Ok(()),
        [status] => Err(HealthCause::InvalidApplicationState(status.clone())),
        many => Err(HealthCause::InvalidApplicationState(format!(
            "{} application records",
            many.len()
        ))),
    }
}

#[derive(Clone)]
pub struct HealthService {
    primary: Arc<dyn PrimaryHealthStore>,
    secondary: Arc<dyn SecondaryHealthStore>,
}

impl HealthService {
    pub fn new(
        primary: Arc<dyn PrimaryHealthStore>,
        secondary: Arc<dyn SecondaryHealthStore>,
    ) -> Self {
        Self { primary, secondary }
    }

    pub async fn check_primary(&self) -> Result<(), HealthCause> {
        let statuses = self.primary.application_statuses().await?;
        classify_application(statuses)
    }

    pub async fn check_secondary(&self) -> Result<(), HealthCause> {
        self.secondary.ping().await?;
        Ok(())
    }

    /// Probe both stores and combine the verdicts.
    pub async fn check_health(&self) -> HealthOutcome {
        let (primary, secondary) = tokio::join!(self.check_primary(), self.check_secondary());
        let outcome = HealthOutcome::combine(primary, secondary);

        metrics_service::record_health_check(outcome.label());
        if let Some(cause) = outcome.primary_cause() {
            tracing::warn!(store = "primary", cause = cause.code(), error = %cause, "Health probe failed");
        }
        if let Some(cause) = outcome.secondary_cause() {
            tracing::warn!(store = "secondary", cause = cause.code(), error = %cause, "Health probe failed");
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory::{StaticPrimaryHealth, StaticSecondaryHealth};

    fn service(
        primary: Result<Vec<String>, StoreError>,
        secondary: Result<(), StoreError>,
    ) -> HealthService {
        HealthService::new(
            Arc::new(StaticPrimaryHealth::with_result(primary)),
            Arc::new(StaticSecondaryHealth::with_result(secondary)),
        )
    }

    fn ok() -> Result<Vec<String>, StoreError> {
        Ok(vec!["OK".to_string()])
    }

    #[tokio::test]
    async fn test_both_up() {
        let outcome = service(ok(), Ok(())).check_health().await;
        assert_eq!(outcome, HealthOutcome::BothUp);
        assert!(outcome.is_up());
    }

    #[tokio::test]
    async fn test_primary_invalid_state() {
        let outcome = service(Ok(vec!["NOT_OK".into()]), Ok(()))
            .check_health()
            .await;
        assert_eq!(
            outcome,
            HealthOutcome::PrimaryDown(HealthCause::InvalidApplicationState("NOT_OK".into()))
        );
    }

    #[tokio::test]
    async fn test_primary_record_missing() {
        let outcome = service(Ok(vec![]), Ok(())).check_health().await;
        assert_eq!(
            outcome,
            HealthOutcome::PrimaryDown(HealthCause::ApplicationRecordMissing)
        );
    }

    #[tokio::test]
    async fn test_primary_connection_failure() {
        let outcome = service(Err(StoreError::Connection("timeout".into())), Ok(()))
            .check_health()
            .await;
        assert_eq!(
            outcome,
            HealthOutcome::PrimaryDown(HealthCause::Connection("timeout".into()))
        );
    }

    #[tokio::test]
    async fn test_multiple_application_records_are_invalid() {
        let outcome = service(Ok(vec!["OK".into(), "OK".into()]), Ok(()))
            .check_health()
            .await;
        assert_eq!(
            outcome,
            HealthOutcome::PrimaryDown(HealthCause::InvalidApplicationState(
                "2 application records".into()
            ))
        );
    }

    #[tokio::test]
    async fn test_secondary_query_failure_is_not_both_down() {
        let outcome = service(ok(), Err(StoreError::Query("relation missing".into())))
            .check_health()
            .await;
        assert_eq!(
            outcome,
            HealthOutcome::SecondaryDown(HealthCause::Query("relation missing".into()))
        );
    }

    #[tokio::test]
    async fn test_both_down_keeps_both_causes() {
        let outcome = service(
            Ok(vec![]),
            Err(StoreError::Connection("refused".into())),
        )
        .check_health()
        .await;
        assert_eq!(
            outcome,
            HealthOutcome::BothDown {
                primary: HealthCause::ApplicationRecordMissing,
                secondary: HealthCause::Connection("refused".into()),
            }
        );
    }

    #[tokio::test]
    async fn test_outcome_is_recomputed_each_call() {
        let secondary = Arc::new(StaticSecondaryHealth::up());
        let service = HealthService::new(
            Arc::new(StaticPrimaryHealth::with_status("OK")),
            secondary.clone(),
        );

        assert!(service.check_health().await.is_up());
        secondary
            .set(Err(StoreError::Connection("gone".into())))
            .await;
        assert!(!service.check_health().await.is_up());
    }
}
