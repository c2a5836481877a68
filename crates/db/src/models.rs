//! Row types mirroring the schema, plus conversions into the domain models.
//!
//! Enumerated columns are stored as their wire strings (`PENDING`, `OWNER`,
//! ...), so every conversion into a domain type goes through `FromStr` and
//! can fail on rows written by an incompatible version.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use studypact_core::errors::StudyError;
use studypact_core::models::attendance::AttendanceLog;
use studypact_core::models::fine::Fine;
use studypact_core::models::room::{Room, RoomParticipant};
use studypact_core::models::rule::{Rule, RuleCondition};
use studypact_core::models::vacation::Vacation;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoom {
    pub id: Uuid,
    pub name: String,
    pub owner_id: Uuid,
    pub settlement_day: Option<i16>,
    pub last_settlement_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<DbRoom> for Room {
    fn from(row: DbRoom) -> Self {
        Room {
            id: row.id,
            name: row.name,
            owner_id: row.owner_id,
            settlement_day: row.settlement_day,
            last_settlement_date: row.last_settlement_date,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRoomParticipant {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub vacation_count: i32,
    pub joined_at: DateTime<Utc>,
}

impl TryFrom<DbRoomParticipant> for RoomParticipant {
    type Error = StudyError;

    fn try_from(row: DbRoomParticipant) -> Result<Self, Self::Error> {
        Ok(RoomParticipant {
            room_id: row.room_id,
            user_id: row.user_id,
            role: row.role.parse()?,
            vacation_count: row.vacation_count,
            joined_at: row.joined_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbRule {
    pub id: Uuid,
    pub room_id: Uuid,
    pub rule_type: String,
    pub condition_json: serde_json::Value,
    pub penalty_amount: i64,
    pub description: Option<String>,
}

impl TryFrom<DbRule> for Rule {
    type Error = StudyError;

    fn try_from(row: DbRule) -> Result<Self, Self::Error> {
        Ok(Rule {
            id: row.id,
            room_id: row.room_id,
            rule_type: row.rule_type.parse()?,
            // Malformed condition documents degrade to Unknown rather than
            // failing the whole settlement pass.
            condition: RuleCondition::from_json(row.condition_json),
            penalty_amount: row.penalty_amount,
            description: row.description,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAttendanceLog {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub check_in_time: DateTime<Utc>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
}

impl From<DbAttendanceLog> for AttendanceLog {
    fn from(row: DbAttendanceLog) -> Self {
        AttendanceLog {
            id: row.id,
            room_id: row.room_id,
            user_id: row.user_id,
            check_in_time: row.check_in_time,
            check_out_time: row.check_out_time,
            duration_seconds: row.duration_seconds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbVacation {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: String,
}

impl TryFrom<DbVacation> for Vacation {
    type Error = StudyError;

    fn try_from(row: DbVacation) -> Result<Self, Self::Error> {
        Ok(Vacation {
            id: row.id,
            room_id: row.room_id,
            user_id: row.user_id,
            start_date: row.start_date,
            end_date: row.end_date,
            status: row.status.parse()?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbFine {
    pub id: Uuid,
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub rule_id: Option<Uuid>,
    pub amount: i64,
    pub status: String,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<DbFine> for Fine {
    type Error = StudyError;

    fn try_from(row: DbFine) -> Result<Self, Self::Error> {
        Ok(Fine {
            id: row.id,
            room_id: row.room_id,
            user_id: row.user_id,
            rule_id: row.rule_id,
            amount: row.amount,
            status: row.status.parse()?,
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub room_id: Option<Uuid>,
    pub kind: String,
    pub title: String,
    pub message: String,
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}
