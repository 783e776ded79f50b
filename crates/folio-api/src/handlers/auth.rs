//! Auth handlers — register, login, refresh, me.

use axum::Json;
use axum::extract::State;
use validator::Validate;

use folio_core::error::AppError;

use crate::dto::request::{LoginRequest, RefreshRequest, RegisterRequest};
use crate::dto::response::{ApiResponse, AuthResponse, TokenResponse, UserResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, tokens) = state
        .account_service
        .register(&req.email, &req.display_name, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse::new(user, tokens))))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let (user, tokens) = state
        .account_service
        .login(&req.email, &req.password)
        .await?;

    Ok(Json(ApiResponse::ok(AuthResponse::new(user, tokens))))
}

/// POST /api/auth/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<ApiResponse<TokenResponse>>, ApiError> {
    let tokens = state.account_service.refresh(&req.refresh_token).await?;

    Ok(Json(ApiResponse::ok(TokenResponse::from(tokens))))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.account_service.profile(&auth).await?;

    Ok(Json(ApiResponse::ok(UserResponse::from(user))))
}
