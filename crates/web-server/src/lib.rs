// In crates/web-server/src/lib.rs

use analytics::{AnalyticsEngine, PerformanceReport};
use app_config::types::{AnalyticsSettings, ServerSettings};
use axum::{
    Router,
    extract::{Path, Query, State},
    response::Json,
    routing::get,
};
use core_types::Trade;
use database::{TradeStore, build_report};
use std::sync::Arc;
use tokio::net::TcpListener;
use types::{PaginatedResponse, ReportQuery};

pub mod error;
pub mod types;

// Re-export our custom error type for convenience.
pub use error::{Error, Result};

/// The shared application state that is available to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TradeStore>,
    pub engine: AnalyticsEngine,
    /// Range token applied when a request does not name one.
    pub default_range: String,
}

impl AppState {
    pub fn new(store: Arc<dyn TradeStore>, analytics: &AnalyticsSettings) -> Self {
        Self {
            store,
            engine: AnalyticsEngine::new(analytics.report_config()),
            default_range: analytics.default_time_range.clone(),
        }
    }
}

/// Creates the main application router with all routes and middleware.
///
/// # Arguments
///
/// * `app_state`: The shared `AppState` containing the trade store and engine.
///
/// # Returns
///
/// The configured `axum::Router`.
pub fn create_router(app_state: AppState) -> Router {
    // The dashboard is served from a different origin.
    let cors = tower_http::cors::CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any);

    // Define the API sub-router
    let api_router = Router::new()
        .route("/users/{user_id}/performance", get(get_performance_handler))
        .route("/users/{user_id}/trades", get(get_trades_handler));

    // The main router.
    Router::new()
        .route("/health", get(health_check_handler))
        .nest("/api", api_router)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

/// A simple health check handler.
async fn health_check_handler() -> &'static str {
    "OK"
}

/// Handler for `GET /api/users/{user_id}/performance`
async fn get_performance_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<PerformanceReport>> {
    let filter = query.to_filter(&state.default_range)?;
    let engine = query.engine(&state.engine)?;

    let report = build_report(state.store.as_ref(), &engine, &user_id, &filter).await?;
    Ok(Json(report))
}

/// Handler for `GET /api/users/{user_id}/trades`. Newest trades come first.
async fn get_trades_handler(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<PaginatedResponse<Trade>>> {
    let filter = query.to_filter(&state.default_range)?;
    let mut trades = state.store.fetch_trades(&user_id, &filter).await?;
    trades.reverse();

    tracing::debug!(%user_id, total = trades.len(), page = query.page, "Listing trades.");
    Ok(Json(PaginatedResponse::from_slice(&trades, query.page, query.page_size)))
}

/// The main entry point for running the web server.
///
/// This function sets up the TCP listener and serves the application router.
/// It will run forever until the process is terminated.
pub async fn run(settings: &ServerSettings, app_state: AppState) -> Result<()> {
    let app = create_router(app_state);

    let address = format!("{}:{}", settings.host, settings.port);
    tracing::info!("Web server listening on {}", address);

    let listener = TcpListener::bind(&address).await.map_err(Error::ServerBindError)?;

    axum::serve(listener, app.into_make_service())
        .await
        .map_err(Error::ServerError)?;

    Ok(())
}
