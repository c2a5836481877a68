use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use studypact_core::models::settlement::{RunDailyRequest, RunWeeklyRequest, SettlementResponse};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[axum::debug_handler]
pub async fn run_daily(
    State(state): State<Arc<ApiState>>,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<RunDailyRequest>,
) -> Result<Json<SettlementResponse>, AppError> {
    let outcome = state.engine.run_daily(room_id, payload.date).await?;

    Ok(Json(outcome.into()))
}

#[axum::debug_handler]
pub async fn run_weekly(
    State(state): State<Arc<ApiState>>,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<RunWeeklyRequest>,
) -> Result<Json<SettlementResponse>, AppError> {
    let outcome = state.engine.run_weekly(room_id, payload.week_end).await?;

    Ok(Json(outcome.into()))
}
