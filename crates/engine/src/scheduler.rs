//! Opportunistic settlement triggering.
//!
//! Pages that display a room call [`SettlementGuard::maybe_run_weekly_settlement`]
//! on every view, fire-and-forget. A TTL cache bounds how often the guard
//! touches the store under page-view traffic; when a sweep is actually due
//! it settles the 7 days of the closed week and then the week itself.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use studypact_core::errors::{StudyError, StudyResult};
use studypact_core::models::settlement::SettlementOutcome;
use studypact_core::store::{NotificationSink, SettlementStore};

use crate::SettlementEngine;

/// How long a room's "already checked" marker is trusted.
pub const DEFAULT_GUARD_TTL: Duration = Duration::from_secs(30 * 60);

/// Weekday used when a room has no settlement day configured (Monday).
const DEFAULT_SETTLEMENT_DAY: i16 = 1;

/// Room-keyed "last checked" cache.
///
/// The in-memory implementation is per-process; under horizontal scaling
/// each instance keeps its own markers, so duplicate settlement attempts
/// within the TTL are possible and absorbed by the runners' idempotency
/// checks. A shared cache implementation closes that gap.
#[async_trait]
pub trait GuardCache: Send + Sync {
    async fn last_checked(&self, room_id: Uuid) -> Option<Instant>;
    async fn mark_checked(&self, room_id: Uuid);
}

#[derive(Default)]
pub struct InMemoryGuardCache {
    entries: RwLock<HashMap<Uuid, Instant>>,
}

impl InMemoryGuardCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuardCache for InMemoryGuardCache {
    async fn last_checked(&self, room_id: Uuid) -> Option<Instant> {
        self.entries.read().await.get(&room_id).copied()
    }

    async fn mark_checked(&self, room_id: Uuid) {
        self.entries.write().await.insert(room_id, Instant::now());
    }
}

/// What the guard did for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    /// The room was checked within the TTL; the store was not touched.
    CheckedRecently,
    /// The room's week has already been settled.
    NotDue,
    /// A sweep ran: 7 daily passes plus the weekly pass.
    Ran {
        daily_fines: u32,
        weekly_fines: u32,
    },
}

pub struct SettlementGuard<S, N, C = InMemoryGuardCache> {
    engine: Arc<SettlementEngine<S, N>>,
    cache: C,
    ttl: Duration,
}

impl<S, N> SettlementGuard<S, N>
where
    S: SettlementStore,
    N: NotificationSink,
{
    pub fn new(engine: Arc<SettlementEngine<S, N>>) -> Self {
        Self {
            engine,
            cache: InMemoryGuardCache::new(),
            ttl: DEFAULT_GUARD_TTL,
        }
    }
}

impl<S, N, C> SettlementGuard<S, N, C>
where
    S: SettlementStore,
    N: NotificationSink,
    C: GuardCache,
{
    pub fn with_cache(engine: Arc<SettlementEngine<S, N>>, cache: C, ttl: Duration) -> Self {
        Self { engine, cache, ttl }
    }

    /// Checks whether the room's weekly sweep is due and runs it if so.
    ///
    /// Cheap when it is a no-op: a cache hit within the TTL returns without
    /// touching the store. Callers are expected to spawn this and only log
    /// the outcome; it must never block page rendering.
    pub async fn maybe_run_weekly_settlement(&self, room_id: Uuid) -> StudyResult<GuardOutcome> {
        if let Some(checked_at) = self.cache.last_checked(room_id).await {
            if checked_at.elapsed() < self.ttl {
                return Ok(GuardOutcome::CheckedRecently);
            }
        }
        self.cache.mark_checked(room_id).await;

        let room = self
            .engine
            .store()
            .room(room_id)
            .await?
            .ok_or_else(|| StudyError::NotFound(format!("Room {room_id} not found")))?;

        let settlement_day = room.settlement_day.unwrap_or(DEFAULT_SETTLEMENT_DAY);
        let today = Utc::now().date_naive();
        let target_date = most_recent_weekday_on_or_before(today, settlement_day);
        let target_midnight = Utc.from_utc_datetime(&target_date.and_time(NaiveTime::MIN));

        if let Some(last) = room.last_settlement_date {
            if last >= target_midnight {
                return Ok(GuardOutcome::NotDue);
            }
        }

        info!(%room_id, %target_date, "Weekly settlement due, starting sweep");

        // Settle the week that just closed: the 7 days before the trigger day.
        let period_end = target_date - chrono::Duration::days(1);
        let mut daily_fines = 0u32;
        for offset in (0..7).rev() {
            let date = period_end - chrono::Duration::days(offset);
            if date > today {
                // Clock or timezone skew; never settle a future date.
                continue;
            }
            match self.engine.run_daily(room_id, date).await {
                Ok(outcome) => {
                    daily_fines += outcome.fines_created();
                    if let SettlementOutcome::Skipped { reason } = outcome {
                        debug!(%room_id, %date, reason, "Daily pass skipped");
                    }
                }
                Err(err) => {
                    warn!(%room_id, %date, error = %err, "Daily pass failed, continuing sweep");
                }
            }
        }

        let weekly_outcome = self.engine.run_weekly(room_id, period_end).await?;
        let weekly_fines = weekly_outcome.fines_created();

        if let Err(err) = self
            .engine
            .store()
            .set_last_settlement_date(room_id, Utc::now())
            .await
        {
            // The sweep itself succeeded; the next trigger will simply
            // consider the room due again and be absorbed by idempotency.
            warn!(%room_id, error = %err, "Failed to persist last settlement date");
        }

        info!(%room_id, daily_fines, weekly_fines, "Settlement sweep finished");
        Ok(GuardOutcome::Ran {
            daily_fines,
            weekly_fines,
        })
    }
}

/// Most recent date on or before `today` whose weekday is `settlement_day`
/// (0 = Sunday .. 6 = Saturday; out-of-range values wrap).
pub fn most_recent_weekday_on_or_before(today: NaiveDate, settlement_day: i16) -> NaiveDate {
    let target = i64::from(settlement_day).rem_euclid(7);
    let current = i64::from(today.weekday().num_days_from_sunday());
    let days_back = (current - target).rem_euclid(7);
    today - chrono::Duration::days(days_back)
}
