//! Public handlers — anonymous access to shared portfolios.
//!
//! None of these routes require authentication; the share token in the
//! path is the only credential. Unusable tokens always produce the same
//! 404 body so callers cannot distinguish revoked, expired, and
//! never-issued tokens.

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::HeaderMap;

use folio_core::error::AppError;
use folio_entity::view::model::NewViewEvent;
use folio_service::share::SharedPortfolio;

use crate::dto::request::TrackViewRequest;
use crate::dto::response::{ApiResponse, CountedResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// The stable message anonymous callers see for any unusable token.
const INVALID_TOKEN_MESSAGE: &str = "Share link is invalid or expired";

/// GET /api/shared/{token}
pub async fn view_shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<ApiResponse<SharedPortfolio>>, ApiError> {
    let portfolio = state
        .public_access_service
        .list_shared_projects(&token)
        .await?
        .ok_or_else(|| AppError::not_found(INVALID_TOKEN_MESSAGE))?;

    Ok(Json(ApiResponse::ok(portfolio)))
}

/// POST /api/shared/{token}/view
///
/// Accepts an optional JSON body with viewer metadata; fields the body
/// omits are backfilled from the `X-Forwarded-For`, `User-Agent`, and
/// `Referer` headers. Responds 200 with `counted` indicating whether a
/// valid link absorbed the view — an unusable token is not an error
/// here, just an uncounted view.
pub async fn track_view(
    State(state): State<AppState>,
    Path(token): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<CountedResponse>>, ApiError> {
    let req: TrackViewRequest = if body.is_empty() {
        TrackViewRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|_| AppError::validation("Request body must be valid JSON"))?
    };

    let event = NewViewEvent {
        ip: req.ip.or_else(|| forwarded_ip(&headers)),
        user_agent: req
            .user_agent
            .or_else(|| header_value(&headers, "user-agent")),
        referrer: req.referrer.or_else(|| header_value(&headers, "referer")),
    };

    let counted = state
        .public_access_service
        .track_view(&token, event)
        .await?;

    Ok(Json(ApiResponse::ok(CountedResponse { counted })))
}

/// First entry of X-Forwarded-For, i.e. the originating client.
fn forwarded_ip(headers: &HeaderMap) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}
