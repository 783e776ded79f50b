//! Owner-facing share-link lifecycle and statistics.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use folio_core::error::AppError;
use folio_database::repositories::share::ShareRepository;
use folio_entity::share::model::{CreateShareLink, ShareLink};
use folio_entity::view::model::ViewStats;

use super::token::TokenGenerator;
use crate::context::RequestContext;

/// Manages share-link issuance, deactivation, and owner statistics.
#[derive(Debug, Clone)]
pub struct ShareService {
    /// Share repository.
    share_repo: Arc<ShareRepository>,
    /// Token generator for new links.
    token_generator: Arc<TokenGenerator>,
}

impl ShareService {
    /// Creates a new share service.
    pub fn new(share_repo: Arc<ShareRepository>, token_generator: Arc<TokenGenerator>) -> Self {
        Self {
            share_repo,
            token_generator,
        }
    }

    /// Issues a new share link for the caller, replacing any active one.
    ///
    /// Deactivation of the old link and insertion of the new one happen
    /// in a single transaction, so the caller either keeps the old link
    /// or holds exactly the new one — never neither.
    pub async fn create_share_link(
        &self,
        ctx: &RequestContext,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<ShareLink, AppError> {
        if let Some(expires_at) = expires_at {
            if expires_at <= Utc::now() {
                return Err(AppError::validation("Expiry must lie in the future"));
            }
        }

        let token = self.token_generator.generate();
        let link = self
            .share_repo
            .issue(&CreateShareLink {
                owner_id: ctx.user_id,
                token,
                expires_at,
            })
            .await?;

        info!(
            user_id = %ctx.user_id,
            share_link_id = %link.id,
            expires_at = ?link.expires_at,
            "Share link created"
        );

        Ok(link)
    }

    /// Deactivates the caller's active share link.
    ///
    /// Idempotent: calling with no active link is a no-op, not an error.
    pub async fn deactivate_share_link(&self, ctx: &RequestContext) -> Result<(), AppError> {
        let deactivated = self.share_repo.deactivate_for_owner(ctx.user_id).await?;

        info!(
            user_id = %ctx.user_id,
            deactivated,
            "Share link deactivated"
        );

        Ok(())
    }

    /// Returns the caller's current active share link, if any.
    pub async fn current_share_link(
        &self,
        ctx: &RequestContext,
    ) -> Result<Option<ShareLink>, AppError> {
        self.share_repo.find_active_by_owner(ctx.user_id).await
    }

    /// Computes view statistics for one of the caller's share links.
    ///
    /// A token that does not exist — or exists but belongs to someone
    /// else — yields the same not-found error, so statistics can never
    /// leak across owners.
    pub async fn stats(&self, ctx: &RequestContext, token: &str) -> Result<ViewStats, AppError> {
        let link = self
            .share_repo
            .find_by_token_and_owner(token, ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("Share link not found"))?;

        self.share_repo.view_stats(link.id).await
    }
}
