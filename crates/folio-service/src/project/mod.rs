//! Project management services.

pub mod service;

pub use service::{ProjectFields, ProjectService};
