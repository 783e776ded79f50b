//! Account lifecycle — registration, login, token refresh, and profile
//! management.

use std::sync::Arc;

use tracing::info;

use folio_auth::jwt::{JwtDecoder, JwtEncoder, TokenPair};
use folio_auth::password::PasswordHasher;
use folio_core::config::auth::AuthConfig;
use folio_core::error::AppError;
use folio_database::repositories::user::UserRepository;
use folio_entity::user::model::{CreateUser, UpdateUser, User};

use crate::context::RequestContext;

/// Handles account registration, authentication, and profile updates.
#[derive(Debug, Clone)]
pub struct AccountService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// JWT encoder for issuing token pairs.
    encoder: Arc<JwtEncoder>,
    /// JWT decoder for the refresh path.
    decoder: Arc<JwtDecoder>,
    /// Minimum accepted password length.
    password_min_length: usize,
}

impl AccountService {
    /// Creates a new account service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        hasher: Arc<PasswordHasher>,
        encoder: Arc<JwtEncoder>,
        decoder: Arc<JwtDecoder>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            user_repo,
            hasher,
            encoder,
            decoder,
            password_min_length: config.password_min_length,
        }
    }

    /// Registers a new account and signs the user in immediately.
    pub async fn register(
        &self,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<(User, TokenPair), AppError> {
        if password.len() < self.password_min_length {
            return Err(AppError::validation(format!(
                "Password must be at least {} characters",
                self.password_min_length
            )));
        }

        let password_hash = self.hasher.hash_password(password)?;
        let user = self
            .user_repo
            .create(&CreateUser {
                email: email.to_string(),
                display_name: display_name.to_string(),
                password_hash,
            })
            .await?;

        let tokens = self.encoder.generate_token_pair(user.id, &user.email)?;

        info!(user_id = %user.id, "Account registered");

        Ok((user, tokens))
    }

    /// Authenticates with email and password.
    ///
    /// Unknown email and wrong password produce the identical error, so
    /// the login form cannot be used to probe which addresses exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, TokenPair), AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid email or password"))?;

        let valid = self.hasher.verify_password(password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Invalid email or password"));
        }

        let tokens = self.encoder.generate_token_pair(user.id, &user.email)?;

        info!(user_id = %user.id, "User logged in");

        Ok((user, tokens))
    }

    /// Exchanges a valid refresh token for a fresh token pair.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.decoder.decode_refresh_token(refresh_token)?;

        // The account may have been deleted since the token was issued.
        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("Account no longer exists"))?;

        self.encoder.generate_token_pair(user.id, &user.email)
    }

    /// Returns the caller's full profile.
    pub async fn profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the caller's display name.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        display_name: String,
    ) -> Result<User, AppError> {
        if display_name.trim().is_empty() {
            return Err(AppError::validation("Display name cannot be empty"));
        }

        let user = self
            .user_repo
            .update(ctx.user_id, &UpdateUser { display_name })
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        info!(user_id = %ctx.user_id, "Profile updated");

        Ok(user)
    }
}
