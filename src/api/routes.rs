//! API route configuration.

use crate::api::handlers::{analyze_handler, analyze_screenshot_handler, screenshot_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All `/api` routes.
///
/// # Endpoints
///
/// - `POST /analyze`              - Backlink metrics as JSON
/// - `POST /analyze/screenshot`   - Rendered report image (bytes or URL)
/// - `GET  /screenshot/{filename}` - Stored report image (`url` mode)
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/analyze/screenshot", post(analyze_screenshot_handler))
        .route("/screenshot/{filename}", get(screenshot_handler))
}
