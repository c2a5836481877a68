use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StudyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleType {
    Attendance,
    Goal,
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RuleType::Attendance => "ATTENDANCE",
            RuleType::Goal => "GOAL",
        };
        write!(f, "{s}")
    }
}

impl FromStr for RuleType {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ATTENDANCE" => Ok(RuleType::Attendance),
            "GOAL" => Ok(RuleType::Goal),
            other => Err(StudyError::Validation(format!("unknown rule type: {other}"))),
        }
    }
}

/// Rule condition, tagged by `subtype` on the wire.
///
/// Conditions are configured by room owners and stored as JSON, so any
/// field may be missing and the subtype may be something this version does
/// not know about. Unknown or incomplete conditions must never produce a
/// fine; the evaluator treats them as "not violated".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "subtype")]
pub enum RuleCondition {
    /// Check-in after `time` ("HH:MM", room civil time) is late.
    #[serde(rename = "LATE")]
    Late {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        time: Option<String>,
    },
    /// Less than `min_hours` of study in a day is a violation.
    #[serde(rename = "DURATION")]
    Duration {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_hours: Option<f64>,
    },
    /// Fewer than `count` attended days per week is a violation,
    /// settled by the weekly runner rather than the daily evaluator.
    #[serde(rename = "WEEKLY")]
    Weekly {
        #[serde(default)]
        count: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_hours: Option<f64>,
    },
    /// Unrecognized subtype; never evaluates as violated.
    #[serde(other)]
    Unknown,
}

impl RuleCondition {
    /// Parses a stored condition document, degrading to [`RuleCondition::Unknown`]
    /// when the JSON does not match any known shape.
    pub fn from_json(value: serde_json::Value) -> Self {
        serde_json::from_value(value).unwrap_or(RuleCondition::Unknown)
    }

    pub fn is_weekly(&self) -> bool {
        matches!(self, RuleCondition::Weekly { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule {
    pub id: Uuid,
    pub room_id: Uuid,
    pub rule_type: RuleType,
    pub condition: RuleCondition,
    /// Whole currency units, always positive.
    pub penalty_amount: i64,
    pub description: Option<String>,
}
