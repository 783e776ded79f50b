//! View-tracking domain entities.

pub mod model;

pub use model::{NewViewEvent, ViewEvent, ViewStats};
