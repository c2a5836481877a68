//! Weekly settlement: compares attendance-day counts over a 7-day window
//! against weekly goal rules, crediting approved vacation days, and fines
//! proportionally to the shortfall.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, Utc};
use tracing::{info, warn};
use uuid::Uuid;

use studypact_core::errors::StudyResult;
use studypact_core::models::fine::FineStatus;
use studypact_core::models::notification::{NewNotification, NotificationKind};
use studypact_core::models::rule::RuleCondition;
use studypact_core::models::settlement::SettlementOutcome;
use studypact_core::models::vacation::Vacation;
use studypact_core::store::{NewFine, NotificationSink, SettlementStore};

use crate::{SettlementEngine, day_window_utc};

impl<S, N> SettlementEngine<S, N>
where
    S: SettlementStore,
    N: NotificationSink,
{
    /// Settles the 7-day window ending at `week_end` (inclusive).
    ///
    /// A day counts as attended if it has at least one log; approved
    /// vacation days back-fill only days not already attended. The fine for
    /// a missed goal scales linearly: `missed_days * penalty_amount`, one
    /// fine per (user, rule).
    ///
    /// The idempotency window here is fines created since the start of the
    /// current calendar day, which is coarser than the daily runner's
    /// settled-date window. A re-run on a later day within the same week is
    /// not blocked by it; that boundary is intentional and pinned by tests.
    pub async fn run_weekly(
        &self,
        room_id: Uuid,
        week_end: NaiveDate,
    ) -> StudyResult<SettlementOutcome> {
        info!(%room_id, %week_end, "Running weekly settlement");

        let rules = self.store().rules_for_room(room_id).await?;
        let weekly_rules: Vec<_> = rules.iter().filter(|r| r.condition.is_weekly()).collect();
        if weekly_rules.is_empty() {
            return Ok(SettlementOutcome::Skipped {
                reason: "no weekly rules configured for this room".to_string(),
            });
        }

        let participants = self.store().participants(room_id).await?;
        if participants.is_empty() {
            return Ok(SettlementOutcome::Skipped {
                reason: "room has no participants".to_string(),
            });
        }

        let week_start = week_end - chrono::Duration::days(6);
        let (window_start, _) = day_window_utc(week_start);
        let (_, window_end) = day_window_utc(week_end);

        let logs = self
            .store()
            .attendance_between(room_id, window_start, window_end)
            .await?;
        let vacations = self
            .store()
            .approved_vacations_overlapping(room_id, week_start, week_end)
            .await?;

        // Idempotency set: fines created since today's UTC midnight.
        let (today_start, today_end) = day_window_utc(Utc::now().date_naive());
        let existing = self
            .store()
            .fines_created_between(room_id, today_start, today_end)
            .await?;
        let mut already_fined: HashSet<(Uuid, Uuid)> = existing
            .iter()
            .filter_map(|f| f.rule_id.map(|rule_id| (f.user_id, rule_id)))
            .collect();

        let mut attended_by_user: HashMap<Uuid, HashSet<NaiveDate>> = HashMap::new();
        for log in &logs {
            attended_by_user
                .entry(log.user_id)
                .or_default()
                .insert(log.check_in_time.date_naive());
        }

        let mut fines_created = 0u32;

        for participant in &participants {
            let mut attended_days = attended_by_user
                .remove(&participant.user_id)
                .unwrap_or_default();

            // Vacation back-fills days that were not attended; it never
            // double-counts a day that already has a log.
            for offset in 0..7 {
                let day = week_start + chrono::Duration::days(offset);
                if attended_days.contains(&day) {
                    continue;
                }
                if covers_day(&vacations, participant.user_id, day) {
                    attended_days.insert(day);
                }
            }

            let attended = attended_days.len() as u32;

            for rule in &weekly_rules {
                let RuleCondition::Weekly { count: required, .. } = rule.condition else {
                    continue;
                };
                if attended >= required {
                    continue;
                }
                if already_fined.contains(&(participant.user_id, rule.id)) {
                    continue;
                }

                let missed_days = required - attended;
                let amount = i64::from(missed_days) * rule.penalty_amount;

                let fine = NewFine {
                    room_id,
                    user_id: participant.user_id,
                    rule_id: Some(rule.id),
                    amount,
                    status: FineStatus::Pending,
                    reason: Some(format!(
                        "Weekly goal missed: attended {attended} of {required} days (week ending {week_end})"
                    )),
                    created_at: Utc::now(),
                };

                match self.store().insert_fine(fine).await {
                    Ok(created) => {
                        already_fined.insert((participant.user_id, rule.id));
                        fines_created += 1;
                        self.send_notification(NewNotification {
                            user_id: created.user_id,
                            room_id: Some(room_id),
                            kind: NotificationKind::Fine,
                            title: "Weekly goal fine".to_string(),
                            message: format!(
                                "You attended {attended} of {required} days this week. A fine of {} was issued.",
                                created.amount
                            ),
                            link: Some(format!("/room/{room_id}")),
                        })
                        .await;
                    }
                    Err(err) => {
                        warn!(
                            %room_id,
                            user_id = %participant.user_id,
                            rule_id = %rule.id,
                            error = %err,
                            "Failed to insert weekly fine, continuing with the batch"
                        );
                    }
                }
            }
        }

        info!(%room_id, %week_end, fines_created, "Weekly settlement finished");
        Ok(SettlementOutcome::Completed { fines_created })
    }
}

fn covers_day(vacations: &[Vacation], user_id: Uuid, day: NaiveDate) -> bool {
    vacations
        .iter()
        .any(|v| v.user_id == user_id && v.covers(day))
}
