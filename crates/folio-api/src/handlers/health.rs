//! Health check handlers.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, DbHealthResponse, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/health
pub async fn health() -> Json<ApiResponse<HealthResponse>> {
    Json(ApiResponse::ok(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

/// GET /api/health/db
pub async fn health_db(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DbHealthResponse>>, ApiError> {
    state.db.health_check().await?;

    Ok(Json(ApiResponse::ok(DbHealthResponse {
        status: "ok".to_string(),
        database: "connected".to_string(),
    })))
}
