use chrono::Utc;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use studypact_core::models::fine::{Fine, FineStatus};
use studypact_core::models::room::{ParticipantRole, RoomParticipant};
use studypact_core::models::rule::{Rule, RuleCondition, RuleType};
use studypact_core::models::vacation::{Vacation, VacationStatus};
use studypact_db::models::{DbFine, DbRoomParticipant, DbRule, DbVacation};
use uuid::Uuid;

fn fine_row(status: &str) -> DbFine {
    DbFine {
        id: Uuid::new_v4(),
        room_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        rule_id: Some(Uuid::new_v4()),
        amount: 3000,
        status: status.to_string(),
        reason: Some("Late check-in".to_string()),
        created_at: Utc::now(),
    }
}

fn rule_row(rule_type: &str, condition_json: serde_json::Value) -> DbRule {
    DbRule {
        id: Uuid::new_v4(),
        room_id: Uuid::new_v4(),
        rule_type: rule_type.to_string(),
        condition_json,
        penalty_amount: 1000,
        description: None,
    }
}

#[rstest]
#[case("PENDING", FineStatus::Pending)]
#[case("PAID", FineStatus::Paid)]
#[case("CONFIRMED", FineStatus::Confirmed)]
#[case("DISPUTED", FineStatus::Disputed)]
fn test_fine_row_status_parsing(#[case] wire: &str, #[case] expected: FineStatus) {
    let row = fine_row(wire);

    let fine = Fine::try_from(row.clone()).expect("valid status should convert");
    assert_eq!(fine.status, expected);
    assert_eq!(fine.id, row.id);
    assert_eq!(fine.amount, row.amount);
}

#[test]
fn test_fine_row_with_unknown_status_is_an_error() {
    // A row written by an incompatible version must not convert silently.
    assert!(Fine::try_from(fine_row("CHARGED")).is_err());
}

#[test]
fn test_rule_row_condition_parsing() {
    let row = rule_row("ATTENDANCE", json!({ "subtype": "LATE", "time": "09:00" }));

    let rule = Rule::try_from(row).expect("valid rule row should convert");
    assert_eq!(rule.rule_type, RuleType::Attendance);
    assert_eq!(
        rule.condition,
        RuleCondition::Late {
            time: Some("09:00".to_string())
        }
    );
}

#[test]
fn test_rule_row_with_unknown_condition_degrades_not_errors() {
    // Condition JSON is owner-configured; a shape this version does not
    // know about must not fail the whole settlement pass.
    let row = rule_row("GOAL", json!({ "subtype": "NO_SHOW" }));

    let rule = Rule::try_from(row).expect("unknown condition should still convert");
    assert_eq!(rule.condition, RuleCondition::Unknown);
}

#[test]
fn test_rule_row_with_unknown_type_is_an_error() {
    let row = rule_row("CURFEW", json!({ "subtype": "LATE", "time": "09:00" }));

    assert!(Rule::try_from(row).is_err());
}

#[rstest]
#[case("OWNER", ParticipantRole::Owner)]
#[case("ADMIN", ParticipantRole::Admin)]
#[case("MEMBER", ParticipantRole::Member)]
fn test_participant_row_role_parsing(#[case] wire: &str, #[case] expected: ParticipantRole) {
    let row = DbRoomParticipant {
        room_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        role: wire.to_string(),
        vacation_count: 1,
        joined_at: Utc::now(),
    };

    let participant = RoomParticipant::try_from(row).expect("valid role should convert");
    assert_eq!(participant.role, expected);
}

#[test]
fn test_vacation_row_status_parsing() {
    let row = DbVacation {
        id: Uuid::new_v4(),
        room_id: Uuid::new_v4(),
        user_id: Uuid::new_v4(),
        start_date: "2024-05-01".parse().unwrap(),
        end_date: "2024-05-03".parse().unwrap(),
        status: "APPROVED".to_string(),
    };

    let vacation = Vacation::try_from(row).expect("valid status should convert");
    assert_eq!(vacation.status, VacationStatus::Approved);
    assert!(vacation.covers("2024-05-02".parse().unwrap()));
}
