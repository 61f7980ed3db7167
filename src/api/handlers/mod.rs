//! HTTP request handlers for API endpoints.

pub mod analyze;
pub mod health;
pub mod screenshot;

pub use analyze::analyze_handler;
pub use health::health_handler;
pub use screenshot::{analyze_screenshot_handler, screenshot_handler};
