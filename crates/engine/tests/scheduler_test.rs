use std::sync::Arc;
use std::time::Duration;

use chrono::{Datelike, NaiveDate, Utc};
use pretty_assertions::assert_eq;
use rstest::rstest;
use studypact_core::errors::StudyError;
use studypact_core::models::room::{ParticipantRole, Room, RoomParticipant};
use studypact_core::models::rule::{Rule, RuleCondition, RuleType};
use studypact_core::store::SettlementStore;
use studypact_engine::memory::{MemoryStore, RecordingSink};
use studypact_engine::scheduler::{
    GuardOutcome, InMemoryGuardCache, SettlementGuard, most_recent_weekday_on_or_before,
};
use studypact_engine::{DEFAULT_TIMEZONE, SettlementEngine};
use uuid::Uuid;

type Engine = SettlementEngine<MemoryStore, RecordingSink>;

fn engine() -> Arc<Engine> {
    Arc::new(SettlementEngine::new(
        MemoryStore::new(),
        RecordingSink::new(),
        DEFAULT_TIMEZONE,
    ))
}

fn todays_weekday() -> i16 {
    Utc::now().date_naive().weekday().num_days_from_sunday() as i16
}

fn room(settlement_day: i16) -> Room {
    Room {
        id: Uuid::new_v4(),
        name: "Morning study".to_string(),
        owner_id: Uuid::new_v4(),
        settlement_day: Some(settlement_day),
        last_settlement_date: None,
        created_at: Utc::now(),
    }
}

fn member(room_id: Uuid) -> RoomParticipant {
    RoomParticipant {
        room_id,
        user_id: Uuid::new_v4(),
        role: ParticipantRole::Member,
        vacation_count: 1,
        joined_at: Utc::now(),
    }
}

fn duration_rule(room_id: Uuid) -> Rule {
    Rule {
        id: Uuid::new_v4(),
        room_id,
        rule_type: RuleType::Goal,
        condition: RuleCondition::Duration {
            min_hours: Some(2.0),
        },
        penalty_amount: 1000,
        description: None,
    }
}

// 2024-05-08 is a Wednesday (weekday 3).
#[rstest]
#[case::same_day(3, "2024-05-08")]
#[case::monday(1, "2024-05-06")]
#[case::sunday(0, "2024-05-05")]
#[case::thursday_wraps_to_last_week(4, "2024-05-02")]
#[case::out_of_range_wraps(8, "2024-05-06")]
#[case::negative_wraps(-6, "2024-05-06")]
fn test_most_recent_weekday(#[case] settlement_day: i16, #[case] expected: &str) {
    let today: NaiveDate = "2024-05-08".parse().unwrap();
    let expected: NaiveDate = expected.parse().unwrap();

    assert_eq!(
        most_recent_weekday_on_or_before(today, settlement_day),
        expected
    );
}

#[tokio::test]
async fn test_due_room_gets_a_full_sweep() {
    let engine = engine();
    let room = room(todays_weekday());
    let rule = duration_rule(room.id);

    engine.store().add_room(room.clone()).await;
    engine.store().add_participant(member(room.id)).await;
    engine.store().add_rule(rule.clone()).await;

    let guard = SettlementGuard::new(Arc::clone(&engine));
    let outcome = guard.maybe_run_weekly_settlement(room.id).await.unwrap();

    // One absent member, seven settled days, no weekly rules.
    assert_eq!(
        outcome,
        GuardOutcome::Ran {
            daily_fines: 7,
            weekly_fines: 0,
        }
    );

    let fines = engine.store().fines().await;
    assert_eq!(fines.len(), 7);
    assert!(fines.iter().all(|f| f.rule_id == Some(rule.id)));

    // Each fine is stamped inside the day it settles, so no two share a day.
    let mut days: Vec<NaiveDate> = fines.iter().map(|f| f.created_at.date_naive()).collect();
    days.sort();
    days.dedup();
    assert_eq!(days.len(), 7);

    let stored = engine.store().room(room.id).await.unwrap().unwrap();
    assert!(stored.last_settlement_date.is_some());
}

#[tokio::test]
async fn test_second_call_within_ttl_is_a_cache_hit() {
    let engine = engine();
    let room = room(todays_weekday());

    engine.store().add_room(room.clone()).await;

    let guard = SettlementGuard::new(Arc::clone(&engine));
    let first = guard.maybe_run_weekly_settlement(room.id).await.unwrap();
    assert!(matches!(first, GuardOutcome::Ran { .. }));

    let second = guard.maybe_run_weekly_settlement(room.id).await.unwrap();
    assert_eq!(second, GuardOutcome::CheckedRecently);
}

#[tokio::test]
async fn test_settled_room_is_not_due_again() {
    let engine = engine();
    let room = room(todays_weekday());

    engine.store().add_room(room.clone()).await;

    // Zero TTL so the cache never short-circuits the check.
    let guard = SettlementGuard::with_cache(
        Arc::clone(&engine),
        InMemoryGuardCache::new(),
        Duration::ZERO,
    );

    let first = guard.maybe_run_weekly_settlement(room.id).await.unwrap();
    assert!(matches!(first, GuardOutcome::Ran { .. }));

    let second = guard.maybe_run_weekly_settlement(room.id).await.unwrap();
    assert_eq!(second, GuardOutcome::NotDue);
}

#[tokio::test]
async fn test_already_settled_room_is_not_due() {
    let engine = engine();
    let mut room = room(todays_weekday());
    room.last_settlement_date = Some(Utc::now());

    engine.store().add_room(room.clone()).await;

    let guard = SettlementGuard::new(Arc::clone(&engine));
    let outcome = guard.maybe_run_weekly_settlement(room.id).await.unwrap();
    assert_eq!(outcome, GuardOutcome::NotDue);
    assert!(engine.store().fines().await.is_empty());
}

#[tokio::test]
async fn test_unknown_room_is_not_found() {
    let engine = engine();
    let guard = SettlementGuard::new(Arc::clone(&engine));

    let err = guard
        .maybe_run_weekly_settlement(Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, StudyError::NotFound(_)));
}

#[tokio::test]
async fn test_daily_insert_failures_do_not_abort_the_sweep() {
    let engine = engine();
    let room = room(todays_weekday());

    engine.store().add_room(room.clone()).await;
    engine.store().add_participant(member(room.id)).await;
    engine.store().add_rule(duration_rule(room.id)).await;

    // First two daily inserts fail; the sweep still settles the other days.
    engine.store().fail_next_inserts(2);

    let guard = SettlementGuard::new(Arc::clone(&engine));
    let outcome = guard.maybe_run_weekly_settlement(room.id).await.unwrap();
    assert_eq!(
        outcome,
        GuardOutcome::Ran {
            daily_fines: 5,
            weekly_fines: 0,
        }
    );
}
