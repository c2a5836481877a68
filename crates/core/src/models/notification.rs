use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StudyError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    Fine,
    Payment,
    System,
    Notice,
    Vacation,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NotificationKind::Fine => "FINE",
            NotificationKind::Payment => "PAYMENT",
            NotificationKind::System => "SYSTEM",
            NotificationKind::Notice => "NOTICE",
            NotificationKind::Vacation => "VACATION",
        };
        write!(f, "{s}")
    }
}

impl FromStr for NotificationKind {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FINE" => Ok(NotificationKind::Fine),
            "PAYMENT" => Ok(NotificationKind::Payment),
            "SYSTEM" => Ok(NotificationKind::System),
            "NOTICE" => Ok(NotificationKind::Notice),
            "VACATION" => Ok(NotificationKind::Vacation),
            other => Err(StudyError::Validation(format!(
                "unknown notification kind: {other}"
            ))),
        }
    }
}

/// Payload handed to the notification sink. Delivery is fire-and-forget;
/// failures are logged by the caller and never block settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub room_id: Option<Uuid>,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
}
