//! View event and statistics models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One recorded visit to a shared dashboard.
///
/// Rows are insert-only and cascade-deleted with their share link.
/// `country` and `city` are reserved for geolocation enrichment and are
/// never populated by the server.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ViewEvent {
    /// Unique event identifier.
    pub id: Uuid,
    /// Share link this view was recorded against.
    pub share_link_id: Uuid,
    /// Visitor IP as reported, unvalidated free text.
    pub ip: Option<String>,
    /// Visitor user-agent string.
    pub user_agent: Option<String>,
    /// Referrer URL.
    pub referrer: Option<String>,
    /// Reserved; never populated.
    pub country: Option<String>,
    /// Reserved; never populated.
    pub city: Option<String>,
    /// When the view was recorded.
    pub viewed_at: DateTime<Utc>,
}

/// Visitor metadata captured when tracking a view. Every field is
/// optional; absent fields are stored as NULL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewViewEvent {
    /// Visitor IP.
    pub ip: Option<String>,
    /// Visitor user-agent.
    pub user_agent: Option<String>,
    /// Referrer URL.
    pub referrer: Option<String>,
}

/// Aggregated view statistics for one share link.
///
/// `views_today` uses the server's calendar day; the week and month
/// windows are trailing 7 and 30 days.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewStats {
    /// All views ever recorded.
    pub total_views: i64,
    /// Distinct non-null visitor IPs.
    pub unique_ips: i64,
    /// Views since midnight server time.
    pub views_today: i64,
    /// Views within the trailing 7 days.
    pub views_this_week: i64,
    /// Views within the trailing 30 days.
    pub views_this_month: i64,
    /// Up to 10 most recent view timestamps, newest first.
    pub recent_views: Vec<DateTime<Utc>>,
}
