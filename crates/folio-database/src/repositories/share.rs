//! Share-link repository implementation.
//!
//! This is the storage half of the sharing subsystem: token lookup with
//! the validity predicate applied in SQL, transactional link issuance,
//! the atomic increment-and-log view path, and the statistics rollups.

use sqlx::PgPool;
use uuid::Uuid;

use folio_core::error::{AppError, ErrorKind};
use folio_core::result::AppResult;
use folio_entity::share::model::{CreateShareLink, ShareLink};
use folio_entity::view::model::{NewViewEvent, ViewStats};

/// SQL fragment deciding whether a link currently grants access. Must
/// stay in sync with `ShareLink::is_valid_at`.
const VALIDITY_PREDICATE: &str = "is_active AND (expires_at IS NULL OR expires_at > NOW())";

/// Repository for share-link lifecycle, view tracking, and statistics.
#[derive(Debug, Clone)]
pub struct ShareRepository {
    pool: PgPool,
}

impl ShareRepository {
    /// Create a new share repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an owner's currently active link, if any.
    pub async fn find_active_by_owner(&self, owner_id: Uuid) -> AppResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE owner_id = $1 AND is_active",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find active share link", e)
        })
    }

    /// Find a link by token if it currently grants access (active and
    /// not expired). Inactive and expired links are indistinguishable
    /// from absent ones.
    pub async fn find_valid_by_token(&self, token: &str) -> AppResult<Option<ShareLink>> {
        let query =
            format!("SELECT * FROM share_links WHERE token = $1 AND {VALIDITY_PREDICATE}");
        sqlx::query_as::<_, ShareLink>(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find share link by token", e)
            })
    }

    /// Find a link by token restricted to its owner, regardless of
    /// validity. Statistics remain queryable on deactivated links.
    pub async fn find_by_token_and_owner(
        &self,
        token: &str,
        owner_id: Uuid,
    ) -> AppResult<Option<ShareLink>> {
        sqlx::query_as::<_, ShareLink>(
            "SELECT * FROM share_links WHERE token = $1 AND owner_id = $2",
        )
        .bind(token)
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to find share link", e)
        })
    }

    /// Issue a new share link inside one transaction: deactivate the
    /// owner's current active link(s), then insert the new active row.
    ///
    /// On any failure the transaction rolls back and the previous active
    /// link is left untouched, so the owner is never stranded between
    /// "old link gone" and "new link not yet created".
    pub async fn issue(&self, data: &CreateShareLink) -> AppResult<ShareLink> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query(
            "UPDATE share_links SET is_active = FALSE, updated_at = NOW() \
             WHERE owner_id = $1 AND is_active",
        )
        .bind(data.owner_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate old links", e)
        })?;

        let link = sqlx::query_as::<_, ShareLink>(
            "INSERT INTO share_links (owner_id, token, expires_at) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(data.owner_id)
        .bind(&data.token)
        .bind(data.expires_at)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert share link", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit share issuance", e)
        })?;

        Ok(link)
    }

    /// Deactivate all of an owner's active links. Returns how many rows
    /// changed; zero is a legitimate outcome, not an error.
    pub async fn deactivate_for_owner(&self, owner_id: Uuid) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE share_links SET is_active = FALSE, updated_at = NOW() \
             WHERE owner_id = $1 AND is_active",
        )
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to deactivate share links", e)
        })?;
        Ok(result.rows_affected())
    }

    /// Atomically count one view against a token: increment the counter
    /// and append a view event, or do nothing at all.
    ///
    /// The validity check and the increment are a single UPDATE, so a
    /// link that expires or is deactivated concurrently can never be
    /// half-counted. The relative `view_count + 1` keeps concurrent
    /// increments from losing updates; the event insert shares the
    /// transaction with the increment.
    ///
    /// Returns `true` when the view was counted, `false` for an invalid
    /// token (nothing written).
    pub async fn record_view(&self, token: &str, event: &NewViewEvent) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let update = format!(
            "UPDATE share_links SET view_count = view_count + 1, updated_at = NOW() \
             WHERE token = $1 AND {VALIDITY_PREDICATE} RETURNING id"
        );
        let link_id: Option<Uuid> = sqlx::query_scalar(&update)
            .bind(token)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to increment view count", e)
            })?;

        let Some(link_id) = link_id else {
            // Invalid token: no row matched, nothing to roll back.
            return Ok(false);
        };

        sqlx::query(
            "INSERT INTO view_events (share_link_id, ip, user_agent, referrer) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(link_id)
        .bind(&event.ip)
        .bind(&event.user_agent)
        .bind(&event.referrer)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to insert view event", e)
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit view tracking", e)
        })?;

        Ok(true)
    }

    /// Compute view statistics for one share link.
    ///
    /// "Today" is the server's calendar day; week and month are trailing
    /// 7- and 30-day windows. `unique_ips` counts distinct non-null IPs.
    pub async fn view_stats(&self, share_link_id: Uuid) -> AppResult<ViewStats> {
        let (total_views, unique_ips, views_today, views_this_week, views_this_month) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64)>(
                "SELECT \
                   COUNT(*), \
                   COUNT(DISTINCT ip), \
                   COUNT(*) FILTER (WHERE viewed_at >= date_trunc('day', NOW())), \
                   COUNT(*) FILTER (WHERE viewed_at >= NOW() - INTERVAL '7 days'), \
                   COUNT(*) FILTER (WHERE viewed_at >= NOW() - INTERVAL '30 days') \
                 FROM view_events WHERE share_link_id = $1",
            )
            .bind(share_link_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to aggregate view stats", e)
            })?;

        let recent_views = sqlx::query_scalar::<_, chrono::DateTime<chrono::Utc>>(
            "SELECT viewed_at FROM view_events \
             WHERE share_link_id = $1 ORDER BY viewed_at DESC LIMIT 10",
        )
        .bind(share_link_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch recent views", e)
        })?;

        Ok(ViewStats {
            total_views,
            unique_ips,
            views_today,
            views_this_week,
            views_this_month,
            recent_views,
        })
    }
}
