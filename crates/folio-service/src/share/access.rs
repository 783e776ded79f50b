//! Public share access — token validation, view tracking, and the
//! redacted project listing served to anonymous visitors.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use folio_core::error::AppError;
use folio_database::repositories::project::ProjectRepository;
use folio_database::repositories::share::ShareRepository;
use folio_database::repositories::user::UserRepository;
use folio_entity::project::model::Project;
use folio_entity::share::model::ShareLink;
use folio_entity::view::model::NewViewEvent;

/// A project as shown to anonymous visitors. There is deliberately no
/// `github_url` field on this type: redaction is structural, not a
/// serializer option someone can forget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicProject {
    /// Project identifier.
    pub id: Uuid,
    /// Project name.
    pub name: String,
    /// Client the project was built for.
    pub client: String,
    /// Live project URL.
    pub project_url: String,
    /// When the project was created.
    pub created_at: DateTime<Utc>,
}

impl From<Project> for PublicProject {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            client: project.client,
            project_url: project.project_url,
            created_at: project.created_at,
        }
    }
}

/// Everything an anonymous visitor sees on a shared dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedPortfolio {
    /// The owner's public display name.
    pub owner_name: String,
    /// The owner's projects, newest first, redacted.
    pub projects: Vec<PublicProject>,
}

/// Handles all anonymous, token-gated operations.
#[derive(Debug, Clone)]
pub struct PublicAccessService {
    /// Share repository.
    share_repo: Arc<ShareRepository>,
    /// Project repository.
    project_repo: Arc<ProjectRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
}

impl PublicAccessService {
    /// Creates a new public access service.
    pub fn new(
        share_repo: Arc<ShareRepository>,
        project_repo: Arc<ProjectRepository>,
        user_repo: Arc<UserRepository>,
    ) -> Self {
        Self {
            share_repo,
            project_repo,
            user_repo,
        }
    }

    /// Checks whether a token currently grants access.
    ///
    /// `Ok(None)` is the expected outcome for unknown, deactivated, and
    /// expired tokens alike; only storage failures are errors. No side
    /// effects.
    pub async fn validate(&self, token: &str) -> Result<Option<ShareLink>, AppError> {
        self.share_repo.find_valid_by_token(token).await
    }

    /// Counts one view against a token if it is currently valid.
    ///
    /// Returns `false` without writing anything when the token does not
    /// grant access. The boolean is all an anonymous caller learns.
    pub async fn track_view(&self, token: &str, event: NewViewEvent) -> Result<bool, AppError> {
        let counted = self.share_repo.record_view(token, &event).await?;
        debug!(counted, "View tracking attempt");
        Ok(counted)
    }

    /// Returns the shared dashboard for a valid token: the owner's
    /// display name and their projects with owner-only fields stripped.
    pub async fn list_shared_projects(
        &self,
        token: &str,
    ) -> Result<Option<SharedPortfolio>, AppError> {
        let Some(link) = self.validate(token).await? else {
            return Ok(None);
        };

        // The owner row can only be missing if the account was deleted
        // after validation; the cascade is deleting this link too, so
        // treat the token as gone.
        let Some(owner) = self.user_repo.find_by_id(link.owner_id).await? else {
            return Ok(None);
        };

        let projects = self
            .project_repo
            .list_by_owner(link.owner_id)
            .await?
            .into_iter()
            .map(PublicProject::from)
            .collect();

        Ok(Some(SharedPortfolio {
            owner_name: owner.display_name,
            projects,
        }))
    }
}
