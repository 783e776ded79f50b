//! User self-service handlers.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use folio_core::error::AppError;

use crate::dto::request::UpdateProfileRequest;
use crate::dto::response::{ApiResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// PUT /api/users/me
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .account_service
        .update_profile(&auth, req.display_name)
        .await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
