use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::errors::StudyResult;
use crate::models::attendance::AttendanceLog;
use crate::models::fine::{Fine, FineStatus};
use crate::models::notification::NewNotification;
use crate::models::room::{Room, RoomParticipant};
use crate::models::rule::Rule;
use crate::models::vacation::Vacation;
use crate::store::{NewFine, NotificationSink, SettlementStore};

// Mock collaborators for testing
mock! {
    pub Store {}

    #[async_trait]
    impl SettlementStore for Store {
        async fn room(&self, room_id: Uuid) -> StudyResult<Option<Room>>;

        async fn rules_for_room(&self, room_id: Uuid) -> StudyResult<Vec<Rule>>;

        async fn participants(&self, room_id: Uuid) -> StudyResult<Vec<RoomParticipant>>;

        async fn attendance_between(
            &self,
            room_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> StudyResult<Vec<AttendanceLog>>;

        async fn approved_vacations_overlapping(
            &self,
            room_id: Uuid,
            from: NaiveDate,
            to: NaiveDate,
        ) -> StudyResult<Vec<Vacation>>;

        async fn fines_created_between(
            &self,
            room_id: Uuid,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> StudyResult<Vec<Fine>>;

        async fn insert_fine(&self, fine: NewFine) -> StudyResult<Fine>;

        async fn fine(&self, fine_id: Uuid) -> StudyResult<Option<Fine>>;

        async fn set_fine_status(&self, fine_id: Uuid, status: FineStatus) -> StudyResult<Fine>;

        async fn confirm_all_paid(&self, room_id: Uuid) -> StudyResult<u64>;

        async fn set_last_settlement_date(
            &self,
            room_id: Uuid,
            at: DateTime<Utc>,
        ) -> StudyResult<()>;
    }
}

mock! {
    pub Sink {}

    #[async_trait]
    impl NotificationSink for Sink {
        async fn notify(&self, notification: NewNotification) -> StudyResult<()>;
    }
}
