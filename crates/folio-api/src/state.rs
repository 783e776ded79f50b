//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use folio_auth::JwtDecoder;
use folio_core::config::AppConfig;
use folio_database::DatabasePool;
use folio_service::{AccountService, ProjectService, PublicAccessService, ShareService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,

    // ── Infrastructure ───────────────────────────────────────
    /// PostgreSQL connection pool
    pub db: DatabasePool,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Account registration, login, and profile service
    pub account_service: Arc<AccountService>,
    /// Portfolio project CRUD service
    pub project_service: Arc<ProjectService>,
    /// Share-link lifecycle and statistics service
    pub share_service: Arc<ShareService>,
    /// Anonymous access service for shared portfolios
    pub public_access_service: Arc<PublicAccessService>,
}
