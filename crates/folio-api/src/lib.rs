//! # folio-api
//!
//! HTTP API layer for Folio built on Axum.
//!
//! Provides all REST endpoints, middleware (request logging, CORS,
//! timeouts), extractors, DTOs, and error mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_state, run_server};
pub use router::build_router;
pub use state::AppState;
