//! Route handlers organized by domain.

pub mod auth;
pub mod health;
pub mod project;
pub mod public;
pub mod share;
pub mod user;
