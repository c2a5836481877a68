use crate::models::DbNotification;
use chrono::Utc;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_notification(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    room_id: Option<Uuid>,
    kind: &str,
    title: &str,
    message: &str,
    link: Option<&str>,
) -> Result<DbNotification> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    let notification = sqlx::query_as::<_, DbNotification>(
        r#"
        INSERT INTO notifications (id, user_id, room_id, kind, title, message, link, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_id, room_id, kind, title, message, link, created_at
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(room_id)
    .bind(kind)
    .bind(title)
    .bind(message)
    .bind(link)
    .bind(now)
    .fetch_one(pool)
    .await?;

    Ok(notification)
}

pub async fn get_notifications_by_user_id(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Vec<DbNotification>> {
    let notifications = sqlx::query_as::<_, DbNotification>(
        r#"
        SELECT id, user_id, room_id, kind, title, message, link, created_at
        FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(notifications)
}
