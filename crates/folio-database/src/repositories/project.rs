//! Project repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;
use folio_entity::project::model::{CreateProject, Project, UpdateProject};

/// Repository for project CRUD operations.
///
/// Mutating queries are scoped by `owner_id` in the WHERE clause, so a
/// caller can never touch another user's project by guessing IDs.
#[derive(Debug, Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    /// Create a new project repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a project by ID, restricted to the given owner.
    pub async fn find_by_id(&self, id: Uuid, owner_id: Uuid) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find project", e))
    }

    /// List all projects for an owner, newest first.
    pub async fn list_by_owner(&self, owner_id: Uuid) -> AppResult<Vec<Project>> {
        sqlx::query_as::<_, Project>(
            "SELECT * FROM projects WHERE owner_id = $1 ORDER BY created_at DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list projects", e))
    }

    /// Insert a new project.
    pub async fn create(&self, data: &CreateProject) -> AppResult<Project> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (owner_id, name, client, project_url, github_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.name)
        .bind(&data.client)
        .bind(&data.project_url)
        .bind(&data.github_url)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create project", e))
    }

    /// Update a project owned by the given user. Returns `None` when the
    /// project does not exist or belongs to someone else.
    pub async fn update(
        &self,
        id: Uuid,
        owner_id: Uuid,
        data: &UpdateProject,
    ) -> AppResult<Option<Project>> {
        sqlx::query_as::<_, Project>(
            "UPDATE projects \
             SET name = $3, client = $4, project_url = $5, github_url = $6, updated_at = NOW() \
             WHERE id = $1 AND owner_id = $2 RETURNING *",
        )
        .bind(id)
        .bind(owner_id)
        .bind(&data.name)
        .bind(&data.client)
        .bind(&data.project_url)
        .bind(&data.github_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update project", e))
    }

    /// Delete a project owned by the given user.
    pub async fn delete(&self, id: Uuid, owner_id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete project", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
