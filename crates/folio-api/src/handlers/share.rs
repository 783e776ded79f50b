//! Share-link handlers for the authenticated owner — issue, revoke,
//! inspect, and view statistics.

use axum::Json;
use axum::extract::{Path, State};

use folio_entity::view::model::ViewStats;

use crate::dto::request::CreateShareRequest;
use crate::error::ApiError;
use crate::dto::response::{ApiResponse, MessageResponse, ShareLinkResponse};
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/share
pub async fn create_share(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateShareRequest>,
) -> Result<Json<ApiResponse<ShareLinkResponse>>, ApiError> {
    let link = state
        .share_service
        .create_share_link(&auth, req.expires_at)
        .await?;

    Ok(Json(ApiResponse::ok(ShareLinkResponse::from(link))))
}

/// DELETE /api/share
pub async fn deactivate_share(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.share_service.deactivate_share_link(&auth).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Share link deactivated".to_string(),
    })))
}

/// GET /api/share
pub async fn sharing_status(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Option<ShareLinkResponse>>>, ApiError> {
    let link = state.share_service.current_share_link(&auth).await?;

    Ok(Json(ApiResponse::ok(link.map(ShareLinkResponse::from))))
}

/// GET /api/share/{token}/stats
pub async fn share_stats(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<ViewStats>>, ApiError> {
    let stats = state.share_service.stats(&auth, &token).await?;

    Ok(Json(ApiResponse::ok(stats)))
}
