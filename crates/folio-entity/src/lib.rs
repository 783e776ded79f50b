//! # folio-entity
//!
//! Domain entity models for Folio. Every struct in this crate represents
//! a database table row or a domain value object. All entities derive
//! `Debug`, `Clone`, `Serialize`, `Deserialize`, and database entities
//! additionally derive `sqlx::FromRow`.

pub mod project;
pub mod share;
pub mod user;
pub mod view;
