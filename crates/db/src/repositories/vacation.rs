use crate::models::DbVacation;
use chrono::NaiveDate;
use eyre::Result;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

pub async fn create_vacation(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    user_id: Uuid,
    start_date: NaiveDate,
    end_date: NaiveDate,
    status: &str,
) -> Result<DbVacation> {
    let id = Uuid::new_v4();

    let vacation = sqlx::query_as::<_, DbVacation>(
        r#"
        INSERT INTO vacations (id, room_id, user_id, start_date, end_date, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, room_id, user_id, start_date, end_date, status
        "#,
    )
    .bind(id)
    .bind(room_id)
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .bind(status)
    .fetch_one(pool)
    .await?;

    Ok(vacation)
}

/// APPROVED vacations overlapping the inclusive `[from, to]` range.
pub async fn get_approved_overlapping(
    pool: &Pool<Postgres>,
    room_id: Uuid,
    from: NaiveDate,
    to: NaiveDate,
) -> Result<Vec<DbVacation>> {
    let vacations = sqlx::query_as::<_, DbVacation>(
        r#"
        SELECT id, room_id, user_id, start_date, end_date, status
        FROM vacations
        WHERE room_id = $1 AND status = 'APPROVED' AND start_date <= $3 AND end_date >= $2
        "#,
    )
    .bind(room_id)
    .bind(from)
    .bind(to)
    .fetch_all(pool)
    .await?;

    Ok(vacations)
}
