use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::app::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub database: String,
}

/// Health check endpoint.
///
/// Reports overall service status along with database connectivity.
/// Returns 200 when healthy, 503 when the database is unreachable.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let database = match teamboard_shared::db::health_check(&state.db).await {
        Ok(()) => "connected".to_string(),
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            format!("error: {}", e)
        }
    };

    let healthy = database == "connected";
    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        version: teamboard_shared::VERSION.to_string(),
        database,
    };

    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}
