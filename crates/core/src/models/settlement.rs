use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::fine::{Fine, FineStatus};

/// Result of a settlement pass.
///
/// Configuration absence (no rules, no participants) is not an error: the
/// pass is skipped with a caller-presentable reason and zero fines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementOutcome {
    Completed { fines_created: u32 },
    Skipped { reason: String },
}

impl SettlementOutcome {
    pub fn fines_created(&self) -> u32 {
        match self {
            SettlementOutcome::Completed { fines_created } => *fines_created,
            SettlementOutcome::Skipped { .. } => 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDailyRequest {
    /// Calendar date to settle, "YYYY-MM-DD".
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunWeeklyRequest {
    /// Last day of the 7-day window to settle, "YYYY-MM-DD".
    pub week_end: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementResponse {
    pub success: bool,
    pub fines_created: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl From<SettlementOutcome> for SettlementResponse {
    fn from(outcome: SettlementOutcome) -> Self {
        match outcome {
            SettlementOutcome::Completed { fines_created } => SettlementResponse {
                success: true,
                fines_created,
                message: None,
            },
            SettlementOutcome::Skipped { reason } => SettlementResponse {
                success: false,
                fines_created: 0,
                message: Some(reason),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateManualFineRequest {
    pub user_id: Uuid,
    pub amount: i64,
    pub reason: String,
    /// Initial status, `Pending` or `Paid` (creator's choice).
    pub status: FineStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfirmAllResponse {
    pub confirmed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomFinesResponse {
    pub fines: Vec<Fine>,
}
