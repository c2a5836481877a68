use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/rooms/:id/settlement/daily",
            post(handlers::settlement::run_daily),
        )
        .route(
            "/api/rooms/:id/settlement/weekly",
            post(handlers::settlement::run_weekly),
        )
        .route(
            "/api/rooms/:id/fines",
            get(handlers::fines::list_room_fines).post(handlers::fines::create_manual),
        )
        .route(
            "/api/rooms/:id/fines/confirm-all",
            post(handlers::fines::confirm_all),
        )
}
