//! In-memory implementations of the store and notification traits.
//!
//! Used by the engine and API test suites, and usable as a backend for
//! single-process deployments. Inserts can be made to fail on demand so
//! batch error handling is testable.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use studypact_core::errors::StudyResult;
use studypact_core::models::attendance::AttendanceLog;
use studypact_core::models::fine::{Fine, FineStatus};
use studypact_core::models::notification::NewNotification;
use studypact_core::models::room::{Room, RoomParticipant};
use studypact_core::models::rule::Rule;
use studypact_core::models::vacation::Vacation;
use studypact_core::store::{NewFine, NotificationSink, SettlementStore};

#[derive(Default)]
struct Inner {
    rooms: Vec<Room>,
    participants: Vec<RoomParticipant>,
    rules: Vec<Rule>,
    logs: Vec<AttendanceLog>,
    vacations: Vec<Vacation>,
    fines: Vec<Fine>,
}

#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    insert_failures: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add_room(&self, room: Room) {
        self.inner.write().await.rooms.push(room);
    }

    pub async fn add_participant(&self, participant: RoomParticipant) {
        self.inner.write().await.participants.push(participant);
    }

    pub async fn add_rule(&self, rule: Rule) {
        self.inner.write().await.rules.push(rule);
    }

    pub async fn add_log(&self, log: AttendanceLog) {
        self.inner.write().await.logs.push(log);
    }

    pub async fn add_vacation(&self, vacation: Vacation) {
        self.inner.write().await.vacations.push(vacation);
    }

    /// Seeds a pre-existing fine verbatim, bypassing `insert_fine`.
    pub async fn push_fine(&self, fine: Fine) {
        self.inner.write().await.fines.push(fine);
    }

    pub async fn fines(&self) -> Vec<Fine> {
        self.inner.read().await.fines.clone()
    }

    /// Makes the next `n` calls to `insert_fine` fail.
    pub fn fail_next_inserts(&self, n: usize) {
        self.insert_failures.store(n, Ordering::SeqCst);
    }
}

#[async_trait]
impl SettlementStore for MemoryStore {
    async fn room(&self, room_id: Uuid) -> StudyResult<Option<Room>> {
        let inner = self.inner.read().await;
        Ok(inner.rooms.iter().find(|r| r.id == room_id).cloned())
    }

    async fn rules_for_room(&self, room_id: Uuid) -> StudyResult<Vec<Rule>> {
        let inner = self.inner.read().await;
        Ok(inner
            .rules
            .iter()
            .filter(|r| r.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn participants(&self, room_id: Uuid) -> StudyResult<Vec<RoomParticipant>> {
        let inner = self.inner.read().await;
        Ok(inner
            .participants
            .iter()
            .filter(|p| p.room_id == room_id)
            .cloned()
            .collect())
    }

    async fn attendance_between(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StudyResult<Vec<AttendanceLog>> {
        let inner = self.inner.read().await;
        Ok(inner
            .logs
            .iter()
            .filter(|l| l.room_id == room_id && l.check_in_time >= start && l.check_in_time < end)
            .cloned()
            .collect())
    }

    async fn approved_vacations_overlapping(
        &self,
        room_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> StudyResult<Vec<Vacation>> {
        let inner = self.inner.read().await;
        Ok(inner
            .vacations
            .iter()
            .filter(|v| {
                v.room_id == room_id
                    && v.status == studypact_core::models::vacation::VacationStatus::Approved
                    && v.start_date <= to
                    && v.end_date >= from
            })
            .cloned()
            .collect())
    }

    async fn fines_created_between(
        &self,
        room_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> StudyResult<Vec<Fine>> {
        let inner = self.inner.read().await;
        Ok(inner
            .fines
            .iter()
            .filter(|f| f.room_id == room_id && f.created_at >= start && f.created_at < end)
            .cloned()
            .collect())
    }

    async fn insert_fine(&self, fine: NewFine) -> StudyResult<Fine> {
        let remaining = self.insert_failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.insert_failures.store(remaining - 1, Ordering::SeqCst);
            return Err(eyre::eyre!("simulated insert failure").into());
        }

        let created = Fine {
            id: Uuid::new_v4(),
            room_id: fine.room_id,
            user_id: fine.user_id,
            rule_id: fine.rule_id,
            amount: fine.amount,
            status: fine.status,
            reason: fine.reason,
            created_at: fine.created_at,
        };
        self.inner.write().await.fines.push(created.clone());
        Ok(created)
    }

    async fn fine(&self, fine_id: Uuid) -> StudyResult<Option<Fine>> {
        let inner = self.inner.read().await;
        Ok(inner.fines.iter().find(|f| f.id == fine_id).cloned())
    }

    async fn set_fine_status(&self, fine_id: Uuid, status: FineStatus) -> StudyResult<Fine> {
        let mut inner = self.inner.write().await;
        let fine = inner
            .fines
            .iter_mut()
            .find(|f| f.id == fine_id)
            .ok_or_else(|| eyre::eyre!("fine {fine_id} not found"))?;
        fine.status = status;
        Ok(fine.clone())
    }

    async fn confirm_all_paid(&self, room_id: Uuid) -> StudyResult<u64> {
        let mut inner = self.inner.write().await;
        let mut affected = 0u64;
        for fine in inner
            .fines
            .iter_mut()
            .filter(|f| f.room_id == room_id && f.status == FineStatus::Paid)
        {
            fine.status = FineStatus::Confirmed;
            affected += 1;
        }
        Ok(affected)
    }

    async fn set_last_settlement_date(
        &self,
        room_id: Uuid,
        at: DateTime<Utc>,
    ) -> StudyResult<()> {
        let mut inner = self.inner.write().await;
        if let Some(room) = inner.rooms.iter_mut().find(|r| r.id == room_id) {
            room.last_settlement_date = Some(at);
        }
        Ok(())
    }
}

/// Notification sink that records everything it is asked to deliver.
#[derive(Default)]
pub struct RecordingSink {
    notifications: RwLock<Vec<NewNotification>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<NewNotification> {
        self.notifications.read().await.clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn notify(&self, notification: NewNotification) -> StudyResult<()> {
        self.notifications.write().await.push(notification);
        Ok(())
    }
}
