use axum::{
    http::StatusCode,
    middleware,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    middleware::request_id::{make_span_with_request_id, request_id_middleware},
    services::{preferences::PreferenceStore, providers::CatalogProvider},
};

pub mod goals;
pub mod recommendations;
pub mod social;
pub mod stats;
pub mod trends;

/// Shared application state
pub struct AppState {
    pub db_pool: PgPool,
    pub catalog: Arc<dyn CatalogProvider>,
    pub preferences: Arc<dyn PreferenceStore>,
}

/// Creates the application router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", api_routes(state))
        .layer(
            TraceLayer::new_for_http().make_span_with(make_span_with_request_id),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
}

/// API routes under /api/v1
fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/users/:user_id/stats", get(stats::user_stats))
        .route("/users/:user_id/stats/annual", get(stats::annual))
        .route("/users/:user_id/trends/monthly", get(trends::monthly))
        .route("/users/:user_id/calendar", get(trends::calendar))
        .route(
            "/users/:user_id/goal",
            get(goals::goal_progress).put(goals::set_goal),
        )
        .route(
            "/users/:user_id/recommendations",
            get(recommendations::recommend),
        )
        .route(
            "/users/:user_id/preferences/genres",
            put(recommendations::save_genres),
        )
        .route(
            "/users/:user_id/suggested-follows",
            get(social::suggested_follows),
        )
        .route("/movies/top-rated", get(social::top_rated))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}
