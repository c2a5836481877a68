use crate::models::DbRoom;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_room(
    pool: &Pool<Postgres>,
    name: &str,
    owner_id: Uuid,
    settlement_day: Option<i16>,
) -> Result<DbRoom> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    tracing::debug!("Creating room: id={}, name={}", id, name);

    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        INSERT INTO rooms (id, name, owner_id, settlement_day, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, owner_id, settlement_day, last_settlement_date, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(owner_id)
    .bind(settlement_day)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(room)
}

pub async fn get_room_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<DbRoom>> {
    tracing::debug!("Getting room by id: {}", id);

    let room = sqlx::query_as::<_, DbRoom>(
        r#"
        SELECT id, name, owner_id, settlement_day, last_settlement_date, created_at
        FROM rooms
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(room)
}

pub async fn set_last_settlement_date(
    pool: &Pool<Postgres>,
    id: Uuid,
    at: DateTime<Utc>,
) -> Result<()> {
    tracing::debug!("Setting last settlement date: room={}, at={}", id, at);

    sqlx::query(
        r#"
        UPDATE rooms
        SET last_settlement_date = $2
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(at)
    .execute(pool)
    .await?;

    Ok(())
}
