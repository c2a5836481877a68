use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // Create rooms table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rooms (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            name VARCHAR(255) NOT NULL,
            owner_id UUID NOT NULL,
            settlement_day SMALLINT NULL,
            last_settlement_date TIMESTAMP WITH TIME ZONE NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create room_participants table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS room_participants (
            room_id UUID NOT NULL REFERENCES rooms(id),
            user_id UUID NOT NULL,
            role VARCHAR(32) NOT NULL DEFAULT 'MEMBER',
            vacation_count INTEGER NOT NULL DEFAULT 1,
            joined_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            PRIMARY KEY (room_id, user_id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create rules table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS rules (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            room_id UUID NOT NULL REFERENCES rooms(id),
            rule_type VARCHAR(32) NOT NULL,
            condition_json JSONB NOT NULL DEFAULT '{}'::jsonb,
            penalty_amount BIGINT NOT NULL,
            description TEXT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create attendance_logs table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS attendance_logs (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            room_id UUID NOT NULL REFERENCES rooms(id),
            user_id UUID NOT NULL,
            check_in_time TIMESTAMP WITH TIME ZONE NOT NULL,
            check_out_time TIMESTAMP WITH TIME ZONE NULL,
            duration_seconds BIGINT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create vacations table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS vacations (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            room_id UUID NOT NULL REFERENCES rooms(id),
            user_id UUID NOT NULL,
            start_date DATE NOT NULL,
            end_date DATE NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'PENDING',
            CONSTRAINT valid_vacation_range CHECK (end_date >= start_date)
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create fines table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS fines (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            room_id UUID NOT NULL REFERENCES rooms(id),
            user_id UUID NOT NULL,
            rule_id UUID NULL REFERENCES rules(id),
            amount BIGINT NOT NULL,
            status VARCHAR(32) NOT NULL DEFAULT 'PENDING',
            reason TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create notifications table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id UUID NOT NULL,
            room_id UUID NULL REFERENCES rooms(id),
            kind VARCHAR(32) NOT NULL,
            title VARCHAR(255) NOT NULL,
            message TEXT NOT NULL,
            link TEXT NULL,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW()
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_room_participants_user_id ON room_participants(user_id);
        CREATE INDEX IF NOT EXISTS idx_rules_room_id ON rules(room_id);
        CREATE INDEX IF NOT EXISTS idx_attendance_logs_room_id ON attendance_logs(room_id);
        CREATE INDEX IF NOT EXISTS idx_attendance_logs_check_in_time ON attendance_logs(check_in_time);
        CREATE INDEX IF NOT EXISTS idx_vacations_room_id ON vacations(room_id);
        CREATE INDEX IF NOT EXISTS idx_fines_room_id ON fines(room_id);
        CREATE INDEX IF NOT EXISTS idx_fines_created_at ON fines(created_at);
        CREATE INDEX IF NOT EXISTS idx_fines_user_rule ON fines(user_id, rule_id);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_fines_one_per_rule_day
            ON fines(user_id, rule_id, ((timezone('UTC', created_at))::date))
            WHERE rule_id IS NOT NULL;
        CREATE INDEX IF NOT EXISTS idx_notifications_user_id ON notifications(user_id);
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
