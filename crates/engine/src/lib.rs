//! # StudyPact Settlement Engine
//!
//! The rule-evaluation and fine-generation pipeline for StudyPact rooms.
//!
//! ## Architecture
//!
//! - **Evaluator**: pure per-participant/day rule checks
//! - **Daily runner**: settles one calendar date for a room
//! - **Weekly runner**: settles a 7-day window against weekly goal rules
//! - **Scheduler guard**: TTL-cached opportunistic trigger for the sweep
//! - **Lifecycle**: fine state transitions and their notifications
//!
//! The engine is generic over [`SettlementStore`] and [`NotificationSink`]
//! from `studypact-core`, so the same code runs against Postgres in
//! production and the in-memory store in tests.

/// Daily settlement runner
pub mod daily;
/// Pure rule evaluation
pub mod evaluator;
/// Fine state transitions
pub mod lifecycle;
/// In-memory store and recording sink
pub mod memory;
/// Opportunistic settlement trigger
pub mod scheduler;
/// Weekly settlement runner
pub mod weekly;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;
use tracing::warn;

use studypact_core::models::notification::NewNotification;
use studypact_core::store::{NotificationSink, SettlementStore};

/// Civil timezone used for LATE evaluation when none is configured.
pub const DEFAULT_TIMEZONE: Tz = chrono_tz::Asia::Seoul;

/// The settlement engine. Holds the store and notifier collaborators and
/// the room civil timezone; all runners and lifecycle operations hang off
/// this struct.
pub struct SettlementEngine<S, N> {
    store: S,
    notifier: N,
    timezone: Tz,
}

impl<S, N> SettlementEngine<S, N>
where
    S: SettlementStore,
    N: NotificationSink,
{
    pub fn new(store: S, notifier: N, timezone: Tz) -> Self {
        Self {
            store,
            notifier,
            timezone,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Best-effort delivery: notification failures are logged and swallowed
    /// so they never block fine creation.
    pub(crate) async fn send_notification(&self, notification: NewNotification) {
        let user_id = notification.user_id;
        if let Err(err) = self.notifier.notify(notification).await {
            warn!(%user_id, error = %err, "Failed to deliver notification");
        }
    }
}

/// The UTC-normalized half-open window `[00:00, +24h)` for a calendar date.
pub fn day_window_utc(date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    (start, start + chrono::Duration::days(1))
}
