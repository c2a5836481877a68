//! # StudyPact API
//!
//! Web server for the StudyPact fine settlement service. Exposes endpoints
//! for triggering settlement passes, browsing a room's fines, and walking
//! fines through their payment lifecycle.
//!
//! ## Architecture
//!
//! - **Routes**: Define API endpoints and URL structure
//! - **Handlers**: Implement request processing logic
//! - **Middleware**: Error mapping and other cross-cutting concerns
//! - **Config**: Environment-driven configuration
//!
//! The settlement logic itself lives in `studypact-engine`; this crate only
//! wires it to HTTP and to the Postgres-backed store.

/// Configuration module for API settings
pub mod config;
/// Request handlers that implement endpoint logic
pub mod handlers;
/// Middleware for error handling
pub mod middleware;
/// Route definitions and API endpoint structure
pub mod routes;

use std::sync::Arc;

use axum::Router;
use eyre::Result;
use sqlx::PgPool;
use studypact_db::PgStore;
use studypact_engine::SettlementEngine;
use studypact_engine::scheduler::SettlementGuard;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

/// Engine wired to the Postgres store for both persistence and notifications.
pub type PgEngine = SettlementEngine<PgStore, PgStore>;

/// Shared application state that is accessible to all request handlers.
pub struct ApiState {
    /// Settlement engine backed by Postgres
    pub engine: Arc<PgEngine>,
    /// TTL-cached guard that triggers weekly sweeps opportunistically
    pub guard: Arc<SettlementGuard<PgStore, PgStore>>,
    /// PostgreSQL connection pool for direct queries
    pub db_pool: PgPool,
}

impl ApiState {
    /// Builds the full state from a pool and the timezone rules are
    /// evaluated in.
    pub fn new(db_pool: PgPool, timezone: chrono_tz::Tz) -> Self {
        let store = PgStore::new(db_pool.clone());
        let engine = Arc::new(SettlementEngine::new(store.clone(), store, timezone));
        let guard = Arc::new(SettlementGuard::new(Arc::clone(&engine)));
        Self {
            engine,
            guard,
            db_pool,
        }
    }
}

/// Builds the application router. Shared between `start_server` and tests.
pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        // Health check endpoints
        .merge(routes::health::routes())
        // Settlement and room-scoped fine endpoints
        .merge(routes::rooms::routes())
        // Per-fine lifecycle endpoints
        .merge(routes::fines::routes())
        // Attach shared state to all routes
        .with_state(state)
}

/// Starts the API server with the provided configuration and database
/// connection.
pub async fn start_server(config: config::ApiConfig, db_pool: PgPool) -> Result<()> {
    // Initialize tracing for logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let state = Arc::new(ApiState::new(db_pool, config.settlement_timezone));
    let app = router(state);

    // Apply CORS configuration if origins are specified
    let app = if let Some(origins) = &config.cors_origins {
        let cors = tower_http::cors::CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::PUT,
                axum::http::Method::DELETE,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers([
                axum::http::header::CONTENT_TYPE,
                axum::http::header::AUTHORIZATION,
                axum::http::header::ACCEPT,
            ])
            .allow_origin(
                origins
                    .iter()
                    .filter_map(|origin| origin.parse().ok())
                    .collect::<Vec<_>>(),
            )
            .allow_credentials(true);

        app.layer(cors)
    } else {
        app
    };

    // Add request timeout middleware
    let app = app.layer(tower_http::timeout::TimeoutLayer::new(
        std::time::Duration::from_secs(config.request_timeout),
    ));

    // Start the HTTP server
    let addr = config.server_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
