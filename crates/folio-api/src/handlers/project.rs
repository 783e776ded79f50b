//! Project CRUD handlers. Every operation is scoped to the
//! authenticated owner.

use axum::Json;
use axum::extract::{Path, State};
use uuid::Uuid;
use validator::Validate;

use folio_core::error::AppError;
use folio_entity::project::model::Project;
use folio_service::project::ProjectFields;

use crate::dto::request::ProjectRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

fn into_fields(req: ProjectRequest) -> ProjectFields {
    ProjectFields {
        name: req.name,
        client: req.client,
        project_url: req.project_url,
        github_url: req.github_url,
    }
}

/// GET /api/projects
pub async fn list_projects(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = state.project_service.list_projects(&auth).await?;

    Ok(Json(ApiResponse::ok(projects)))
}

/// POST /api/projects
pub async fn create_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let project = state
        .project_service
        .create_project(&auth, into_fields(req))
        .await?;

    Ok(Json(ApiResponse::ok(project)))
}

/// PUT /api/projects/{id}
pub async fn update_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(req): Json<ProjectRequest>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    req.validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let project = state
        .project_service
        .update_project(&auth, id, into_fields(req))
        .await?;

    Ok(Json(ApiResponse::ok(project)))
}

/// DELETE /api/projects/{id}
pub async fn delete_project(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.project_service.delete_project(&auth, id).await?;

    Ok(Json(ApiResponse::ok(MessageResponse {
        message: "Project deleted".to_string(),
    })))
}
