//! # folio-service
//!
//! Business logic service layer for Folio. Each service orchestrates
//! repositories and authentication to implement application-level use
//! cases.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references.

pub mod account;
pub mod context;
pub mod project;
pub mod share;

pub use account::AccountService;
pub use context::RequestContext;
pub use project::ProjectService;
pub use share::{PublicAccessService, ShareService, TokenGenerator};
