use crate::models::DbFine;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

#[allow(clippy::too_many_arguments)]
pub async fn create_fine(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    user_id: Uuid,
    rule_id: Option<Uuid>,
    amount: i64,
    status: &str,
    reason: Option<&str>,
    created_at: DateTime<Utc>,
) -> Result<DbFine> {
    let id = Uuid::new_v4();

    tracing::debug!(
        "Creating fine: id={}, room={}, user={}, amount={}",
        id,
        room_id,
        user_id,
        amount
    );

    let fine = sqlx::query_as::<_, DbFine>(
        r#"
        INSERT INTO fines (id, room_id, user_id, rule_id, amount, status, reason, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, room_id, user_id, rule_id, amount, status, reason, created_at
        "#,
    )
    .bind(id)
    .bind(room_id)
    .bind(user_id)
    .bind(rule_id)
    .bind(amount)
    .bind(status)
    .bind(reason)
    .bind(created_at)
    .fetch_one(pool)
    .await?;

    Ok(fine)
}

pub async fn get_fine_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbFine>> {
    let fine = sqlx::query_as::<_, DbFine>(
        r#"
        SELECT id, room_id, user_id, rule_id, amount, status, reason, created_at
        FROM fines
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(fine)
}

pub async fn get_fines_by_room_id(pool: &Pool<Postgres>, room_id: Uuid) -> Result<Vec<DbFine>> {
    let fines = sqlx::query_as::<_, DbFine>(
        r#"
        SELECT id, room_id, user_id, rule_id, amount, status, reason, created_at
        FROM fines
        WHERE room_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(fines)
}

/// Fines created in `[start, end)`, the idempotency pre-fetch for the
/// settlement runners.
pub async fn get_fines_created_between(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbFine>> {
    let fines = sqlx::query_as::<_, DbFine>(
        r#"
        SELECT id, room_id, user_id, rule_id, amount, status, reason, created_at
        FROM fines
        WHERE room_id = $1 AND created_at >= $2 AND created_at < $3
        "#,
    )
    .bind(room_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(fines)
}

pub async fn set_fine_status(pool: &Pool<Postgres>, id: Uuid, status: &str) -> Result<DbFine> {
    tracing::debug!("Setting fine status: id={}, status={}", id, status);

    let fine = sqlx::query_as::<_, DbFine>(
        r#"
        UPDATE fines
        SET status = $2
        WHERE id = $1
        RETURNING id, room_id, user_id, rule_id, amount, status, reason, created_at
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(fine)
}

/// Bulk PAID -> CONFIRMED transition for a room. Returns rows affected.
pub async fn confirm_all_paid(pool: &Pool<Postgres>, room_id: Uuid) -> Result<u64> {
    let result = sqlx::query(
        r#"
        UPDATE fines
        SET status = 'CONFIRMED'
        WHERE room_id = $1 AND status = 'PAID'
        "#,
    )
    .bind(room_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
