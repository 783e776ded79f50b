//! # folio-auth
//!
//! Authentication primitives for Folio.
//!
//! ## Modules
//!
//! - `jwt` — stateless JWT access/refresh token creation and validation
//! - `password` — Argon2id password hashing and verification

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, TokenPair};
pub use password::PasswordHasher;
