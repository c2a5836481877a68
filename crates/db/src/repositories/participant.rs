use crate::models::DbRoomParticipant;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn add_participant(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    user_id: Uuid,
    role: &str,
) -> Result<DbRoomParticipant> {
    tracing::debug!(
        "Adding participant: room={}, user={}, role={}",
        room_id,
        user_id,
        role
    );

    let participant = sqlx::query_as::<_, DbRoomParticipant>(
        r#"
        INSERT INTO room_participants (room_id, user_id, role)
        VALUES ($1, $2, $3)
        RETURNING room_id, user_id, role, vacation_count, joined_at
        "#,
    )
    .bind(room_id)
    .bind(user_id)
    .bind(role)
    .fetch_one(pool)
    .await?;

    Ok(participant)
}

pub async fn get_participants_by_room_id(
    pool: &Pool<Postgres>,
    room_id: Uuid,
) -> Result<Vec<DbRoomParticipant>> {
    let participants = sqlx::query_as::<_, DbRoomParticipant>(
        r#"
        SELECT room_id, user_id, role, vacation_count, joined_at
        FROM room_participants
        WHERE room_id = $1
        ORDER BY joined_at
        "#,
    )
    .bind(room_id)
    .fetch_all(pool)
    .await?;

    Ok(participants)
}
