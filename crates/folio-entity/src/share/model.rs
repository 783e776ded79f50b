//! Share-link entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A share link granting anonymous read access to an owner's portfolio.
///
/// At most one link per owner is active at any time; old links are
/// deactivated, never deleted, so their view history survives re-sharing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ShareLink {
    /// Unique share-link identifier.
    pub id: Uuid,
    /// User who issued the link.
    pub owner_id: Uuid,
    /// Opaque URL-safe access token, globally unique, never reused.
    pub token: String,
    /// Whether the link currently grants access.
    pub is_active: bool,
    /// When the link stops granting access (None = never expires).
    pub expires_at: Option<DateTime<Utc>>,
    /// Number of successfully tracked views. Monotonically non-decreasing.
    pub view_count: i64,
    /// When the link was issued.
    pub created_at: DateTime<Utc>,
    /// When the link was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ShareLink {
    /// Check whether the link grants access at `now`.
    ///
    /// A link is valid iff it is active and its expiry, when set, lies
    /// strictly in the future. A link whose expiry has passed behaves
    /// exactly like a deactivated one.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        if !self.is_active {
            return false;
        }
        if let Some(expires_at) = self.expires_at {
            if expires_at <= now {
                return false;
            }
        }
        true
    }

    /// Check whether the link grants access right now.
    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }
}

/// Data required to issue a new share link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateShareLink {
    /// User issuing the link.
    pub owner_id: Uuid,
    /// Freshly generated access token.
    pub token: String,
    /// Optional expiry time.
    pub expires_at: Option<DateTime<Utc>>,
}
