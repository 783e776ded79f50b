//! Project CRUD service.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use folio_core::error::AppError;
use folio_database::repositories::project::ProjectRepository;
use folio_entity::project::model::{CreateProject, Project, UpdateProject};

use crate::context::RequestContext;

/// The editable fields of a project; create and update take the same
/// set.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProjectFields {
    /// Project name.
    pub name: String,
    /// Client the project was built for.
    pub client: String,
    /// Live project URL.
    pub project_url: String,
    /// Source-repository URL.
    pub github_url: String,
}

/// Manages the caller's portfolio projects.
#[derive(Debug, Clone)]
pub struct ProjectService {
    /// Project repository.
    project_repo: Arc<ProjectRepository>,
}

impl ProjectService {
    /// Creates a new project service.
    pub fn new(project_repo: Arc<ProjectRepository>) -> Self {
        Self { project_repo }
    }

    /// Lists the caller's projects, newest first.
    pub async fn list_projects(&self, ctx: &RequestContext) -> Result<Vec<Project>, AppError> {
        self.project_repo.list_by_owner(ctx.user_id).await
    }

    /// Creates a project owned by the caller.
    pub async fn create_project(
        &self,
        ctx: &RequestContext,
        fields: ProjectFields,
    ) -> Result<Project, AppError> {
        let project = self
            .project_repo
            .create(&CreateProject {
                owner_id: ctx.user_id,
                name: fields.name,
                client: fields.client,
                project_url: fields.project_url,
                github_url: fields.github_url,
            })
            .await?;

        info!(user_id = %ctx.user_id, project_id = %project.id, "Project created");

        Ok(project)
    }

    /// Updates one of the caller's projects. A project that does not
    /// exist or belongs to another user yields the same not-found error.
    pub async fn update_project(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        fields: ProjectFields,
    ) -> Result<Project, AppError> {
        let project = self
            .project_repo
            .update(
                id,
                ctx.user_id,
                &UpdateProject {
                    name: fields.name,
                    client: fields.client,
                    project_url: fields.project_url,
                    github_url: fields.github_url,
                },
            )
            .await?
            .ok_or_else(|| AppError::not_found("Project not found"))?;

        info!(user_id = %ctx.user_id, project_id = %id, "Project updated");

        Ok(project)
    }

    /// Deletes one of the caller's projects.
    pub async fn delete_project(&self, ctx: &RequestContext, id: Uuid) -> Result<(), AppError> {
        let deleted = self.project_repo.delete(id, ctx.user_id).await?;
        if !deleted {
            return Err(AppError::not_found("Project not found"));
        }

        info!(user_id = %ctx.user_id, project_id = %id, "Project deleted");

        Ok(())
    }
}
