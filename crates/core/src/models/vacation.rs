use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StudyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VacationStatus {
    Approved,
    Pending,
    Rejected,
}

impl fmt::Display for VacationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            VacationStatus::Approved => "APPROVED",
            VacationStatus::Pending => "PENDING",
            VacationStatus::Rejected => "REJECTED",
        };
        write!(f, "{s}")
    }
}

impl FromStr for VacationStatus {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "APPROVED" => Ok(VacationStatus::Approved),
            "PENDING" => Ok(VacationStatus::Pending),
            "REJECTED" => Ok(VacationStatus::Rejected),
            other => Err(StudyError::Validation(format!(
                "unknown vacation status: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vacation {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    /// Inclusive calendar date range.
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: VacationStatus,
}

impl Vacation {
    /// Whether this vacation covers the given calendar date.
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}
