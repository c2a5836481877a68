//! Pure rule evaluation for a single participant and day.
//!
//! No I/O and no side effects: the runners gather the context and this
//! module only answers "is this rule violated?". Incomplete configuration
//! (missing cutoff time, missing minimum hours, unparseable values) is
//! always "not violated" — a rule must never fabricate a fine out of a
//! half-filled condition.

use chrono::{DateTime, Timelike, Utc};
use chrono_tz::Tz;

use studypact_core::models::rule::{Rule, RuleCondition};

/// Per-participant context for one calendar date.
#[derive(Debug, Clone, Copy)]
pub struct DayContext {
    /// Check-in instant of the earliest log for the day, if any.
    pub first_check_in: Option<DateTime<Utc>>,
    /// Sum of `duration_seconds` over the day's logs, nulls counted as 0.
    pub total_seconds: i64,
}

/// Whether `rule` is violated in `ctx`. WEEKLY conditions are settled by
/// the weekly runner and never evaluate as violated here.
pub fn is_violated(rule: &Rule, ctx: &DayContext, timezone: Tz) -> bool {
    match &rule.condition {
        RuleCondition::Late { time } => is_late(time.as_deref(), ctx.first_check_in, timezone),
        RuleCondition::Duration { min_hours } => is_under_duration(*min_hours, ctx.total_seconds),
        RuleCondition::Weekly { .. } => false,
        RuleCondition::Unknown => false,
    }
}

/// Strictly after the cutoff minute-of-day, in the room's civil timezone,
/// counts as late. No log means no lateness evaluation: absence is a
/// distinct case the rule set does not currently cover.
fn is_late(cutoff: Option<&str>, check_in: Option<DateTime<Utc>>, timezone: Tz) -> bool {
    let (Some(cutoff), Some(check_in)) = (cutoff, check_in) else {
        return false;
    };
    let Some(cutoff_minutes) = parse_cutoff_minutes(cutoff) else {
        return false;
    };

    let local = check_in.with_timezone(&timezone);
    let checked_in_minutes = local.hour() * 60 + local.minute();

    checked_in_minutes > cutoff_minutes
}

/// Violated iff the studied time is strictly below the configured minimum.
/// Meeting the threshold exactly is not a violation.
fn is_under_duration(min_hours: Option<f64>, total_seconds: i64) -> bool {
    let Some(min_hours) = min_hours else {
        return false;
    };
    let min_seconds = (min_hours * 3600.0).round() as i64;

    total_seconds < min_seconds
}

/// Parses "HH:MM" into a minute-of-day, rejecting out-of-range values.
fn parse_cutoff_minutes(cutoff: &str) -> Option<u32> {
    let (hours, minutes) = cutoff.split_once(':')?;
    let hours: u32 = hours.trim().parse().ok()?;
    let minutes: u32 = minutes.trim().parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    Some(hours * 60 + minutes)
}
