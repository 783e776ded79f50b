//! Application builder — wires repositories, services, and state into a
//! running Axum server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;

use folio_auth::{JwtDecoder, JwtEncoder, PasswordHasher};
use folio_core::config::AppConfig;
use folio_core::error::AppError;
use folio_database::DatabasePool;
use folio_database::repositories::{project, share, user};
use folio_service::{
    AccountService, ProjectService, PublicAccessService, ShareService, TokenGenerator,
};

use crate::router::build_router;
use crate::state::AppState;

/// Wires repositories, auth primitives, and services into an `AppState`.
///
/// Shared by the server entry point and the integration tests so both
/// exercise the exact same dependency graph.
pub fn build_state(config: AppConfig, db: DatabasePool) -> Result<AppState, AppError> {
    // ── Step 1: Initialize repositories ──────────────────────────
    let user_repo = Arc::new(user::UserRepository::new(db.pool().clone()));
    let project_repo = Arc::new(project::ProjectRepository::new(db.pool().clone()));
    let share_repo = Arc::new(share::ShareRepository::new(db.pool().clone()));

    // ── Step 2: Initialize auth system ───────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Step 3: Initialize services ──────────────────────────────
    let token_generator = Arc::new(TokenGenerator::new(&config.sharing)?);
    let account_service = Arc::new(AccountService::new(
        Arc::clone(&user_repo),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        Arc::clone(&jwt_decoder),
        &config.auth,
    ));
    let project_service = Arc::new(ProjectService::new(Arc::clone(&project_repo)));
    let share_service = Arc::new(ShareService::new(
        Arc::clone(&share_repo),
        Arc::clone(&token_generator),
    ));
    let public_access_service = Arc::new(PublicAccessService::new(
        Arc::clone(&share_repo),
        Arc::clone(&project_repo),
        Arc::clone(&user_repo),
    ));

    Ok(AppState {
        config: Arc::new(config),
        db,
        jwt_decoder,
        account_service,
        project_service,
        share_service,
        public_access_service,
    })
}

/// Runs the Folio server with the given configuration and database pool.
///
/// Blocks until a shutdown signal arrives and in-flight requests have
/// drained (bounded by the configured grace period).
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    tracing::info!("Starting Folio server...");

    let server_config = config.server.clone();
    let app_state = build_state(config, db.clone())?;

    // ── Shutdown channel ─────────────────────────────────────────
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    // ── Build and start HTTP server ──────────────────────────────
    let app = build_router(app_state);
    let addr = format!("{}:{}", server_config.host, server_config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("Folio server listening on {}", addr);

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    // ── Drain with a bounded grace period ────────────────────────
    let grace = Duration::from_secs(server_config.shutdown_grace_seconds);
    let result = tokio::select! {
        res = server => res.map_err(|e| AppError::internal(format!("Server error: {}", e))),
        _ = async {
            let _ = shutdown_rx.wait_for(|stopping| *stopping).await;
            tokio::time::sleep(grace).await;
        } => {
            tracing::warn!(
                grace_seconds = grace.as_secs(),
                "Grace period elapsed with requests still in flight"
            );
            Ok(())
        }
    };

    db.close().await;
    tracing::info!("Folio server shut down");

    result
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
