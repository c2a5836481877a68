//! Postgres-backed implementations of the engine's store and sink traits.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use studypact_core::errors::StudyResult;
use studypact_core::models::attendance::AttendanceLog;
use studypact_core::models::fine::{Fine, FineStatus};
use studypact_core::models::notification::NewNotification;
use studypact_core::models::room::{Room, RoomParticipant};
use studypact_core::models::rule::Rule;
use studypact_core::models::vacation::Vacation;
use studypact_core::store::{NewFine, NotificationSink, SettlementStore};

use crate::repositories::{attendance, fine, notification, participant, room, rule, vacation};
use crate::DbPool;

/// Cheap to clone; wraps the shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl SettlementStore for PgStore {
    async fn room(&self, room_id: Uuid) -> StudyResult<Option<Room>> {
        let row = room::get_room_by_id(&self.pool, room_id).await?;
        Ok(row.map(Room::from))
    }

    async fn rules_for_room(&self, room_id: Uuid) -> StudyResult<Vec<Rule>> {
        let rows = rule::get_rules_by_room_id(&self.pool, room_id).await?;
        rows.into_iter().map(Rule::try_from).collect()
    }

    async fn participants(&self, room_id: Uuid) -> StudyResult<Vec<RoomParticipant>> {
        let rows = participant::get_participants_by_room_id(&self.pool, room_id).await?;
        rows.into_iter().map(RoomParticipant::try_from).collect()
    }

    async fn attendance_between(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StudyResult<Vec<AttendanceLog>> {
        let rows = attendance::get_logs_in_window(&self.pool, room_id, start, end).await?;
        Ok(rows.into_iter().map(AttendanceLog::from).collect())
    }

    async fn approved_vacations_overlapping(
        &self,
        room_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StudyResult<Vec<Vacation>> {
        let rows = vacation::get_approved_overlapping(&self.pool, room_id, from, to).await?;
        rows.into_iter().map(Vacation::try_from).collect()
    }

    async fn fines_created_between(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StudyResult<Vec<Fine>> {
        let rows = fine::get_fines_created_between(&self.pool, room_id, start, end).await?;
        rows.into_iter().map(Fine::try_from).collect()
    }

    async fn insert_fine(&self, new_fine: NewFine) -> StudyResult<Fine> {
        let row = fine::create_fine(
            &self.pool,
            new_fine.room_id,
            new_fine.user_id,
            new_fine.rule_id,
            new_fine.amount,
            &new_fine.status.to_string(),
            new_fine.reason.as_deref(),
            new_fine.created_at,
        )
        .await?;
        Fine::try_from(row)
    }

    async fn fine(&self, fine_id: Uuid) -> StudyResult<Option<Fine>> {
        let row = fine::get_fine_by_id(&self.pool, fine_id).await?;
        row.map(Fine::try_from).transpose()
    }

    async fn set_fine_status(&self, fine_id: Uuid, status: FineStatus) -> StudyResult<Fine> {
        let row = fine::set_fine_status(&self.pool, fine_id, &status.to_string()).await?;
        Fine::try_from(row)
    }

    async fn confirm_all_paid(&self, room_id: Uuid) -> StudyResult<u64> {
        Ok(fine::confirm_all_paid(&self.pool, room_id).await?)
    }

    async fn set_last_settlement_date(
        &self,
        room_id: Uuid,
        at: DateTime<Utc>,
    ) -> StudyResult<()> {
        Ok(room::set_last_settlement_date(&self.pool, room_id, at).await?)
    }
}

#[async_trait]
impl NotificationSink for PgStore {
    async fn notify(&self, n: NewNotification) -> StudyResult<()> {
        notification::create_notification(
            &self.pool,
            n.user_id,
            n.room_id,
            &n.kind.to_string(),
            &n.title,
            &n.message,
            n.link.as_deref(),
        )
        .await?;
        Ok(())
    }
}
