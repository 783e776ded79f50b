//! Request DTOs with validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// E-mail address; doubles as the login identifier.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
    /// Public display name.
    #[validate(length(min = 1, max = 100, message = "Display name is required"))]
    pub display_name: String,
    /// Password; minimum length is enforced by the account service.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    /// E-mail address.
    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Token refresh request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Refresh token.
    pub refresh_token: String,
}

/// Update profile request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    /// New display name.
    #[validate(length(min = 1, max = 100, message = "Display name is required"))]
    pub display_name: String,
}

/// Create/update project request. Both operations take the full field
/// set; partial updates are not supported.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProjectRequest {
    /// Project name.
    #[validate(length(min = 1, max = 255, message = "Name is required"))]
    pub name: String,
    /// Client the project was built for.
    #[validate(length(min = 1, max = 255, message = "Client is required"))]
    pub client: String,
    /// Live project URL.
    #[validate(url(message = "Project URL must be a valid URL"))]
    pub project_url: String,
    /// Source-repository URL.
    #[validate(url(message = "GitHub URL must be a valid URL"))]
    pub github_url: String,
}

/// Create share link request.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateShareRequest {
    /// Optional expiry; `None` means the link never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

/// View tracking request. All fields are optional; the handler
/// backfills missing ones from request headers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackViewRequest {
    /// Viewer IP as reported by the client or proxy.
    pub ip: Option<String>,
    /// Viewer user agent.
    pub user_agent: Option<String>,
    /// Referrer URL.
    pub referrer: Option<String>,
}
