use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StudyError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    /// Weekday on which the weekly sweep is due, 0 = Sunday .. 6 = Saturday.
    pub settlement_day: Option<i16>,
    pub last_settlement_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantRole {
    Owner,
    Admin,
    Member,
}

impl fmt::Display for ParticipantRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParticipantRole::Owner => "OWNER",
            ParticipantRole::Admin => "ADMIN",
            ParticipantRole::Member => "MEMBER",
        };
        write!(f, "{s}")
    }
}

impl FromStr for ParticipantRole {
    type Err = StudyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OWNER" => Ok(ParticipantRole::Owner),
            "ADMIN" => Ok(ParticipantRole::Admin),
            "MEMBER" => Ok(ParticipantRole::Member),
            other => Err(StudyError::Validation(format!(
                "unknown participant role: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomParticipant {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub role: ParticipantRole,
    pub vacation_count: i32,
    pub joined_at: DateTime<Utc>,
}
