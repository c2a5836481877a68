use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StudyError;

/// Fine lifecycle: `Pending -> Paid -> Confirmed`, with `Disputed`
/// reachable from `Pending` or `Paid` and no engine-driven exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FineStatus {
    Pending,
    Paid,
    Confirmed,
    Disputed,
}

impl fmt::Display for FineStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FineStatus::Pending => "PENDING",
            FineStatus::Paid => "PAID",
            FineStatus::Confirmed => "CONFIRMED",
            FineStatus::Disputed => "DISPUTED",
        };
        write!(f, "{s}")
    }
}

impl FromStr for FineStatus {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(FineStatus::Pending),
            "PAID" => Ok(FineStatus::Paid),
            "CONFIRMED" => Ok(FineStatus::Confirmed),
            "DISPUTED" => Ok(FineStatus::Disputed),
            other => Err(StudyError::Validation(format!(
                "unknown fine status: {other}"
            ))),
        }
    }
}

/// A monetary penalty record. Immutable once created except for `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fine {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    /// None for manual/voluntary fines.
    pub rule_id: Option<Uuid>,
    pub amount: i64,
    pub status: FineStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}
