use axum::{Router, routing::post};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/fines/:id/paid", post(handlers::fines::mark_paid))
        .route("/api/fines/:id/confirm", post(handlers::fines::confirm))
}
