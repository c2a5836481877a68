//! Daily settlement: evaluates every rule against every participant's
//! attendance for one calendar date and inserts the resulting fines.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use tracing::{debug, info, warn};
use uuid::Uuid;

use studypact_core::errors::StudyResult;
use studypact_core::models::attendance::AttendanceLog;
use studypact_core::models::fine::FineStatus;
use studypact_core::models::notification::{NewNotification, NotificationKind};
use studypact_core::models::rule::Rule;
use studypact_core::models::settlement::SettlementOutcome;
use studypact_core::store::{NewFine, NotificationSink, SettlementStore};

use crate::evaluator::{self, DayContext};
use crate::{SettlementEngine, day_window_utc};

impl<S, N> SettlementEngine<S, N>
where
    S: SettlementStore,
    N: NotificationSink,
{
    /// Settles one calendar date for a room.
    ///
    /// Re-running with unchanged data creates no new fines: the idempotency
    /// set (fines created within the day's window, keyed by user and rule)
    /// is fetched once per invocation, and new fines are stamped inside
    /// that window so past dates stay settled across repeated sweeps.
    ///
    /// Individual insert failures are logged and skipped; only the
    /// top-level reads abort the run.
    pub async fn run_daily(
        &self,
        room_id: Uuid,
        date: NaiveDate,
    ) -> StudyResult<SettlementOutcome> {
        info!(%room_id, %date, "Running daily settlement");

        let rules = self.store().rules_for_room(room_id).await?;
        if rules.is_empty() {
            return Ok(SettlementOutcome::Skipped {
                reason: "no rules configured for this room".to_string(),
            });
        }

        let participants = self.store().participants(room_id).await?;
        if participants.is_empty() {
            return Ok(SettlementOutcome::Skipped {
                reason: "room has no participants".to_string(),
            });
        }

        let (day_start, day_end) = day_window_utc(date);

        let logs = self
            .store()
            .attendance_between(room_id, day_start, day_end)
            .await?;
        let vacations = self
            .store()
            .approved_vacations_overlapping(room_id, date, date)
            .await?;
        let on_vacation: HashSet<Uuid> = vacations.iter().map(|v| v.user_id).collect();

        // Idempotency set, fetched once per invocation.
        let existing = self
            .store()
            .fines_created_between(room_id, day_start, day_end)
            .await?;
        let mut already_fined: HashSet<(Uuid, Uuid)> = existing
            .iter()
            .filter_map(|f| f.rule_id.map(|rule_id| (f.user_id, rule_id)))
            .collect();

        let mut logs_by_user: HashMap<Uuid, Vec<&AttendanceLog>> = HashMap::new();
        for log in &logs {
            logs_by_user.entry(log.user_id).or_default().push(log);
        }

        let mut fines_created = 0u32;

        for participant in &participants {
            if on_vacation.contains(&participant.user_id) {
                debug!(user_id = %participant.user_id, %date, "Skipping participant on vacation");
                continue;
            }

            let user_logs = logs_by_user
                .get(&participant.user_id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            let total_seconds: i64 = user_logs
                .iter()
                .map(|l| l.duration_seconds.unwrap_or(0))
                .sum();
            let first_check_in = user_logs.iter().map(|l| l.check_in_time).min();

            let ctx = DayContext {
                first_check_in,
                total_seconds,
            };

            for rule in &rules {
                if !evaluator::is_violated(rule, &ctx, self.timezone()) {
                    continue;
                }
                if already_fined.contains(&(participant.user_id, rule.id)) {
                    continue;
                }

                let fine = NewFine {
                    room_id,
                    user_id: participant.user_id,
                    rule_id: Some(rule.id),
                    amount: rule.penalty_amount,
                    status: FineStatus::Pending,
                    reason: Some(daily_fine_reason(rule, date)),
                    // Stamped inside the settled day so a later sweep over
                    // the same date finds it in the idempotency window.
                    created_at: day_end - chrono::Duration::seconds(1),
                };

                match self.store().insert_fine(fine).await {
                    Ok(created) => {
                        already_fined.insert((participant.user_id, rule.id));
                        fines_created += 1;
                        self.send_notification(NewNotification {
                            user_id: created.user_id,
                            room_id: Some(room_id),
                            kind: NotificationKind::Fine,
                            title: "Fine issued".to_string(),
                            message: format!(
                                "A fine of {} was issued for {}.",
                                created.amount, date
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
                            "Failed to insert fine, continuing with the batch"
                        );
                    }
                }
            }
        }

        info!(%room_id, %date, fines_created, "Daily settlement finished");
        Ok(SettlementOutcome::Completed { fines_created })
    }
}

fn daily_fine_reason(rule: &Rule, date: NaiveDate) -> String {
    match &rule.description {
        Some(description) => format!("{description} ({date})"),
        None => format!("Rule violation ({date})"),
    }
}
