//! # Backlink Report
//!
//! A small analysis service that queries the SEObserver backlink metrics API
//! for a domain and renders the result as a JPEG report image.
//!
//! ## Architecture
//!
//! The crate follows a layered layout with clear seams:
//!
//! - **Domain Layer** ([`domain`]) - The [`domain::metrics::MetricsSnapshot`]
//!   value type and the [`domain::source::MetricsSource`] trait
//! - **Application Layer** ([`application`]) - The fetch-then-render pipeline
//! - **Infrastructure Layer** ([`infrastructure`]) - SEObserver HTTP client
//!   and the ephemeral screenshot store
//! - **Rendering** ([`render`]) - Layout composition and JPEG rasterization
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! # Set required environment variables
//! export SEOBSERVER_API_KEY="your-api-key"
//!
//! # Start the service
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via
//! [`config::Config`]. See the [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod render;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::ReportService;
    pub use crate::domain::metrics::MetricsSnapshot;
    pub use crate::domain::source::{MetricsSource, UpstreamError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
