//! Integration tests for the Folio HTTP API.
//!
//! Each test gets its own freshly migrated database from `#[sqlx::test]`
//! and drives the real router (full middleware stack) in-process via
//! `tower::ServiceExt::oneshot`.

mod helpers;

mod auth_test;
mod project_test;
mod share_test;
