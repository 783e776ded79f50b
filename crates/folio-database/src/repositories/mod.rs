//! Repository implementations for all Folio entities.

pub mod project;
pub mod share;
pub mod user;

pub use project::ProjectRepository;
pub use share::ShareRepository;
pub use user::UserRepository;
