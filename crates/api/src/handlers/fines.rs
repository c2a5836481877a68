use axum::{
    Json,
    extract::{Path, State},
};
use std::sync::Arc;
use studypact_core::{
    errors::StudyError,
    models::fine::Fine,
    models::settlement::{ConfirmAllResponse, CreateManualFineRequest, RoomFinesResponse},
};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Lists a room's fines. Viewing a room is also the trigger point for the
/// opportunistic settlement check, which runs in the background so the
/// response never waits on a sweep.
#[axum::debug_handler]
pub async fn list_room_fines(
    State(state): State<Arc<ApiState>>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<RoomFinesResponse>, AppError> {
    let guard = Arc::clone(&state.guard);
    tokio::spawn(async move {
        match guard.maybe_run_weekly_settlement(room_id).await {
            Ok(outcome) => debug!(%room_id, ?outcome, "Settlement check finished"),
            Err(err) => warn!(%room_id, error = %err, "Settlement check failed"),
        }
    });

    let rows = studypact_db::repositories::fine::get_fines_by_room_id(&state.db_pool, room_id)
        .await
        .map_err(StudyError::Database)?;
    let fines = rows
        .into_iter()
        .map(Fine::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(RoomFinesResponse { fines }))
}

#[axum::debug_handler]
pub async fn mark_paid(
    State(state): State<Arc<ApiState>>,
    Path(fine_id): Path<Uuid>,
) -> Result<Json<Fine>, AppError> {
    let fine = state.engine.mark_as_paid(fine_id).await?;

    Ok(Json(fine))
}

#[axum::debug_handler]
pub async fn confirm(
    State(state): State<Arc<ApiState>>,
    Path(fine_id): Path<Uuid>,
) -> Result<Json<Fine>, AppError> {
    let fine = state.engine.confirm_payment(fine_id).await?;

    Ok(Json(fine))
}

#[axum::debug_handler]
pub async fn confirm_all(
    State(state): State<Arc<ApiState>>,
    Path(room_id): Path<Uuid>,
) -> Result<Json<ConfirmAllResponse>, AppError> {
    let confirmed = state.engine.confirm_all(room_id).await?;

    Ok(Json(ConfirmAllResponse { confirmed }))
}

#[axum::debug_handler]
pub async fn create_manual(
    State(state): State<Arc<ApiState>>,
    Path(room_id): Path<Uuid>,
    Json(payload): Json<CreateManualFineRequest>,
) -> Result<Json<Fine>, AppError> {
    let fine = state
        .engine
        .create_manual_fine(
            room_id,
            payload.user_id,
            payload.amount,
            &payload.reason,
            payload.status,
        )
        .await?;

    Ok(Json(fine))
}
