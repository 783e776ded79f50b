//! Project entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A portfolio project registered by a user.
///
/// The owner sees every field. Anonymous visitors holding a valid share
/// token see a redacted projection without `github_url`; that projection
/// is a separate DTO in the API layer, so the field cannot leak by
/// accident.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Project {
    /// Unique project identifier.
    pub id: Uuid,
    /// User who owns this project.
    pub owner_id: Uuid,
    /// Project name.
    pub name: String,
    /// Client the project was built for.
    pub client: String,
    /// Live project URL.
    pub project_url: String,
    /// Source-repository URL. Owner-only.
    pub github_url: String,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
    /// When the project was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProject {
    /// User who will own the project.
    pub owner_id: Uuid,
    /// Project name.
    pub name: String,
    /// Client the project was built for.
    pub client: String,
    /// Live project URL.
    pub project_url: String,
    /// Source-repository URL.
    pub github_url: String,
}

/// Data for updating an existing project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProject {
    /// New project name.
    pub name: String,
    /// New client.
    pub client: String,
    /// New live project URL.
    pub project_url: String,
    /// New source-repository URL.
    pub github_url: String,
}
