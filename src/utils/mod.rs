//! Helper functions shared across the service:
//!
//! - [`filename`] - Screenshot filename generation and traversal-safe
//!   validation
//! - [`target`] - Analysis target normalization

pub mod filename;
pub mod target;
