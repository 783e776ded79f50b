//! Dashboard sharing — token issuance, public access, and view analytics.

pub mod access;
pub mod service;
pub mod token;

pub use access::{PublicAccessService, PublicProject, SharedPortfolio};
pub use service::ShareService;
pub use token::TokenGenerator;
