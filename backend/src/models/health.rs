//! Health outcome model for the two backing stores.

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

/// Why a backing store is considered down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthCause {
    /// The store could not be reached.
    Connection(String),
    /// The store answered but the probe query failed.
    Query(String),
    /// The primary store holds no application record.
    ApplicationRecordMissing,
    /// The primary store holds an application record with an unexpected
    /// status value.
    InvalidApplicationState(String),
}

impl HealthCause {
    pub fn code(&self) -> &'static str {
        match self {
            HealthCause::Connection(_) => "CONNECTION_FAILURE",
            HealthCause::Query(_) => "QUERY_FAILURE",
            HealthCause::ApplicationRecordMissing => "APPLICATION_RECORD_MISSING",
            HealthCause::InvalidApplicationState(_) => "INVALID_APPLICATION_STATE",
        }
    }
}

impl fmt::Display for HealthCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HealthCause::Connection(msg) => write!(f, "connection failure: {}", msg),
            HealthCause::Query(msg) => write!(f, "query failure: {}", msg),
            HealthCause::ApplicationRecordMissing => f.write_str("application record missing"),
            HealthCause::InvalidApplicationState(state) => {
                write!(f, "invalid application state: {}", state)
            }
        }
    }
}

/// UP/DOWN verdict for a single store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum StoreStatus {
    Up,
    Down,
}

/// Combined liveness verdict across the primary (document) and secondary
/// (relational) stores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthOutcome {
    BothUp,
    PrimaryDown(HealthCause),
    SecondaryDown(HealthCause),
    BothDown {
        primary: HealthCause,
        secondary: HealthCause,
    },
}

impl HealthOutcome {
    /// Combine two independent probe results.
    pub fn combine(
        primary: Result<(), HealthCause>,
        secondary: Result<(), HealthCause>,
    ) -> Self {
        match (primary, secondary) {
            (Ok(()), Ok(())) => HealthOutcome::BothUp,
            (Err(cause), Ok(())) => HealthOutcome::PrimaryDown(cause),
            (Ok(()), Err(cause)) => HealthOutcome::SecondaryDown(cause),
            (Err(primary), Err(secondary)) => HealthOutcome::BothDown { primary, secondary },
        }
    }

    pub fn is_up(&self) -> bool {
        matches!(self, HealthOutcome::BothUp)
    }

    pub fn primary_cause(&self) -> Option<&HealthCause> {
        match self {
            HealthOutcome::PrimaryDown(cause) => Some(cause),
            HealthOutcome::BothDown { primary, .. } => Some(primary),
            HealthOutcome::BothUp | HealthOutcome::SecondaryDown(_) => None,
        }
    }

    pub fn secondary_cause(&self) -> Option<&HealthCause> {
        match self {
            HealthOutcome::SecondaryDown(cause) => Some(cause),
            HealthOutcome::BothDown { secondary, .. } => Some(secondary),
            HealthOutcome::BothUp | HealthOutcome::PrimaryDown(_) => None,
        }
    }

    pub fn primary_status(&self) -> StoreStatus {
        status_of(self.primary_cause())
    }

    pub fn secondary_status(&self) -> StoreStatus {
        status_of(self.secondary_cause())
    }

    /// Short label used in logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            HealthOutcome::BothUp => "both_up",
            HealthOutcome::PrimaryDown(_) => "primary_down",
            HealthOutcome::SecondaryDown(_) => "secondary_down",
            HealthOutcome::BothDown { .. } => "both_down",
        }
    }
}

fn status_of(cause: Option<&HealthCause>) -> StoreStatus {
    match cause {
        Some(_) => StoreStatus::Down,
        None => StoreStatus::Up,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_all_four_states() {
        let conn = || HealthCause::Connection("refused".into());
        let query = || HealthCause::Query("syntax".into());

        assert_eq!(HealthOutcome::combine(Ok(()), Ok(())), HealthOutcome::BothUp);
        assert_eq!(
            HealthOutcome::combine(Err(conn()), Ok(())),
            HealthOutcome::PrimaryDown(conn())
        );
        assert_eq!(
            HealthOutcome::combine(Ok(()), Err(query())),
            HealthOutcome::SecondaryDown(query())
        );
        assert_eq!(
            HealthOutcome::combine(Err(conn()), Err(query())),
            HealthOutcome::BothDown {
                primary: conn(),
                secondary: query()
            }
        );
    }

    #[test]
    fn test_per_store_status() {
        let outcome = HealthOutcome::SecondaryDown(HealthCause::Query("boom".into()));
        assert_eq!(outcome.primary_status(), StoreStatus::Up);
        assert_eq!(outcome.secondary_status(), StoreStatus::Down);
        assert!(!outcome.is_up());
        assert!(outcome.primary_cause().is_none());
    }

    #[test]
    fn test_cause_codes_are_distinct() {
        let codes = [
            HealthCause::Connection(String::new()).code(),
            HealthCause::Query(String::new()).code(),
            HealthCause::ApplicationRecordMissing.code(),
            HealthCause::InvalidApplicationState(String::new()).code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_cause_display() {
        assert_eq!(
            HealthCause::InvalidApplicationState("NOT_OK".into()).to_string(),
            "invalid application state: NOT_OK"
        );
        assert_eq!(
            HealthCause::ApplicationRecordMissing.to_string(),
            "application record missing"
        );
    }
}
