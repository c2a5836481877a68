use crate::models::DbRule;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_rule(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    rule_type: &str,
    condition_json: serde_json::Value,
    penalty_amount: i64,
    description: Option<&str>,
) -> Result<DbRule> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating rule: id={}, room={}, type={}",
        id,
        room_id,
        rule_type
    );

    let rule = sqlx::query_as::<_, DbRule>(
        r#"
        INSERT INTO rules (id, room_id, rule_type, condition_json, penalty_amount, description)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, room_id, rule_type, condition_json, penalty_amount, description
        "#,
    )
    .bind(id)
    .bind(room_id)
    .bind(rule_type)
    .bind(condition_json)
    .bind(penalty_amount)
    .bind(description)
    .fetch_one(pool)
    .await?;

    Ok(rule)
}

pub async fn get_rules_by_room_id(pool: &Pool<Postgres>, room_id: Uuid) -> Result<Vec<DbRule>> {
    let rules = sqlx::query_as::<_, DbRule>(
        r#"
        SELECT id, room_id, rule_type, condition_json, penalty_amount, description
        FROM rules
        WHERE room_id = $1
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(rules)
}
