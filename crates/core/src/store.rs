//! Trait contracts between the settlement engine and its collaborators.
//!
//! The engine only ever talks to the persistent store and the notification
//! sink through these traits, so it can be driven by Postgres in
//! production and by in-memory or mock implementations in tests.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::errors::StudyResult;
use crate::models::attendance::AttendanceLog;
use crate::models::fine::{Fine, FineStatus};
use crate::models::notification::NewNotification;
use crate::models::room::{Room, RoomParticipant};
use crate::models::rule::Rule;
use crate::models::vacation::Vacation;

/// Insert shape for a fine. `created_at` is supplied by the caller because
/// rule-generated daily fines are stamped inside the settled day's window,
/// not at wall-clock insertion time.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFine {
    pub room_id: Uuid,
    pub user_id: Uuid,
    pub rule_id: Option<Uuid>,
    pub amount: i64,
    pub status: FineStatus,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Read/write access to settlement data.
///
/// Idempotency note: `insert_fine` is a plain insert. Duplicate prevention
/// is check-then-act via `fines_created_between`; the Postgres store backs
/// it with a unique index on (user, rule, creation day), so a lost race
/// surfaces as an insert error the runners already log and skip.
#[async_trait]
pub trait SettlementStore: Send + Sync {
    async fn room(&self, room_id: Uuid) -> StudyResult<Option<Room>>;

    async fn rules_for_room(&self, room_id: Uuid) -> StudyResult<Vec<Rule>>;

    async fn participants(&self, room_id: Uuid) -> StudyResult<Vec<RoomParticipant>>;

    /// Attendance logs whose check-in falls in `[start, end)`.
    async fn attendance_between(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StudyResult<Vec<AttendanceLog>>;

    /// APPROVED vacations overlapping the inclusive date range.
    async fn approved_vacations_overlapping(
        &self,
        room_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StudyResult<Vec<Vacation>>;

    /// Fines created in `[start, end)`, used as the idempotency pre-fetch.
    async fn fines_created_between(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StudyResult<Vec<Fine>>;

    async fn insert_fine(&self, fine: NewFine) -> StudyResult<Fine>;

    async fn fine(&self, fine_id: Uuid) -> StudyResult<Option<Fine>>;

    async fn set_fine_status(&self, fine_id: Uuid, status: FineStatus) -> StudyResult<Fine>;

    /// Bulk-transitions every PAID fine in the room to CONFIRMED,
    /// returning the number of rows affected.
    async fn confirm_all_paid(&self, room_id: Uuid) -> StudyResult<u64>;

    async fn set_last_settlement_date(
        &self,
        room_id: Uuid,
        at: DateTime<Utc>,
    ) -> StudyResult<()>;
}

/// Fire-and-forget notification delivery.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn notify(&self, notification: NewNotification) -> StudyResult<()>;
}
