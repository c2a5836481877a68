//! Fine state transitions and their notification side effects.
//!
//! State machine: `Pending -> Paid -> Confirmed`, with `Disputed` reachable
//! from `Pending` or `Paid` outside the engine. Authorizing who may confirm
//! is the caller's responsibility.

use chrono::Utc;
use uuid::Uuid;

use studypact_core::errors::{StudyError, StudyResult};
use studypact_core::models::fine::{Fine, FineStatus};
use studypact_core::models::notification::{NewNotification, NotificationKind};
use studypact_core::store::{NewFine, NotificationSink, SettlementStore};

use crate::SettlementEngine;

impl<S, N> SettlementEngine<S, N>
where
    S: SettlementStore,
    N: NotificationSink,
{
    /// User marks their fine as paid. Valid from `Pending`; calling again
    /// on a `Paid` fine is an idempotent no-op. The room owner is notified
    /// to confirm receipt, unless the payer is the owner.
    pub async fn mark_as_paid(&self, fine_id: Uuid) -> StudyResult<Fine> {
        let fine = self.require_fine(fine_id).await?;
        match fine.status {
            FineStatus::Pending => {}
            FineStatus::Paid => return Ok(fine),
            other => {
                return Err(StudyError::Validation(format!(
                    "cannot mark a {other} fine as paid"
                )));
            }
        }

        let updated = self
            .store()
            .set_fine_status(fine_id, FineStatus::Paid)
            .await?;

        if let Some(room) = self.store().room(fine.room_id).await? {
            if room.owner_id != fine.user_id {
                self.send_notification(NewNotification {
                    user_id: room.owner_id,
                    room_id: Some(room.id),
                    kind: NotificationKind::Payment,
                    title: "Payment submitted".to_string(),
                    message: format!(
                        "A member marked a fine of {} as paid. Please confirm receipt.",
                        fine.amount
                    ),
                    link: Some(format!("/room/{}", room.id)),
                })
                .await;
            }
        }

        Ok(updated)
    }

    /// Owner/admin confirms a payment. Valid from `Paid`; re-confirming a
    /// `Confirmed` fine is an idempotent no-op. The payer is notified.
    pub async fn confirm_payment(&self, fine_id: Uuid) -> StudyResult<Fine> {
        let fine = self.require_fine(fine_id).await?;
        match fine.status {
            FineStatus::Paid => {}
            FineStatus::Confirmed => return Ok(fine),
            other => {
                return Err(StudyError::Validation(format!(
                    "cannot confirm a {other} fine"
                )));
            }
        }

        let updated = self
            .store()
            .set_fine_status(fine_id, FineStatus::Confirmed)
            .await?;

        self.send_notification(NewNotification {
            user_id: fine.user_id,
            room_id: Some(fine.room_id),
            kind: NotificationKind::System,
            title: "Payment confirmed".to_string(),
            message: format!("Your payment of {} was confirmed.", fine.amount),
            link: Some(format!("/room/{}", fine.room_id)),
        })
        .await;

        Ok(updated)
    }

    /// Bulk-confirms every PAID fine in the room. Returns the count
    /// affected. Deliberately lighter-weight than per-fine confirmation:
    /// no notification fan-out.
    pub async fn confirm_all(&self, room_id: Uuid) -> StudyResult<u64> {
        self.store().confirm_all_paid(room_id).await
    }

    /// Creates a fine by hand, outside any rule: `rule_id` is None, the
    /// reason is required, and the initial status is Pending or Paid at the
    /// creator's choice. Shares the normal lifecycle afterwards.
    pub async fn create_manual_fine(
        &self,
        room_id: Uuid,
        user_id: Uuid,
        amount: i64,
        reason: &str,
        status: FineStatus,
    ) -> StudyResult<Fine> {
        if amount <= 0 {
            return Err(StudyError::Validation(
                "fine amount must be positive".to_string(),
            ));
        }
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(StudyError::Validation(
                "a manual fine requires a reason".to_string(),
            ));
        }
        if !matches!(status, FineStatus::Pending | FineStatus::Paid) {
            return Err(StudyError::Validation(format!(
                "a manual fine cannot start as {status}"
            )));
        }

        let created = self
            .store()
            .insert_fine(NewFine {
                room_id,
                user_id,
                rule_id: None,
                amount,
                status,
                reason: Some(reason.to_string()),
                created_at: Utc::now(),
            })
            .await?;

        self.send_notification(NewNotification {
            user_id,
            room_id: Some(room_id),
            kind: NotificationKind::Fine,
            title: "Fine recorded".to_string(),
            message: format!("A fine of {amount} was recorded: {reason}"),
            link: Some(format!("/room/{room_id}")),
        })
        .await;

        Ok(created)
    }

    async fn require_fine(&self, fine_id: Uuid) -> StudyResult<Fine> {
        self.store()
            .fine(fine_id)
            .await?
            .ok_or_else(|| StudyError::NotFound(format!("Fine {fine_id} not found")))
    }
}
