use crate::models::DbAttendanceLog;
use chrono::{DateTime, Utc};
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_attendance_log(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    user_id: Uuid,
    check_in_time: DateTime<Utc>,
    check_out_time: Option<DateTime<Utc>>,
    duration_seconds: Option<i64>,
) -> Result<DbAttendanceLog> {
    let id = Uuid::new_v4();

    let log = sqlx::query_as::<_, DbAttendanceLog>(
        r#"
        INSERT INTO attendance_logs
            (id, room_id, user_id, check_in_time, check_out_time, duration_seconds)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, room_id, user_id, check_in_time, check_out_time, duration_seconds
        "#,
    )
    .bind(id)
    .bind(room_id)
    .bind(user_id)
    .bind(check_in_time)
    .bind(check_out_time)
    .bind(duration_seconds)
    .fetch_one(pool)
    .await?;

    Ok(log)
}

/// Logs whose check-in falls in `[start, end)`.
pub async fn get_logs_in_window(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<DbAttendanceLog>> {
    let logs = sqlx::query_as::<_, DbAttendanceLog>(
        r#"
        SELECT id, room_id, user_id, check_in_time, check_out_time, duration_seconds
        FROM attendance_logs
        WHERE room_id = $1 AND check_in_time >= $2 AND check_in_time < $3
        ORDER BY check_in_time
        "#,
    )
    .bind(room_id)
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;

    Ok(logs)
}
