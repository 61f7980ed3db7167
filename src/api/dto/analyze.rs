//! DTOs for the analysis endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::metrics::MetricsSnapshot;

/// Request to analyze a domain's backlink profile.
///
/// `target` is optional at the JSON level so an absent field produces the
/// same validation error as an empty one instead of a 422 from the
/// deserializer.
#[derive(Debug, Deserialize, Validate)]
pub struct AnalyzeRequest {
    /// Domain to analyze, e.g. `example.com`.
    #[validate(length(max = 253, message = "Target exceeds the maximum domain length"))]
    pub target: Option<String>,
}

/// Successful JSON analysis result.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub status: &'static str,
    pub target: String,
    pub metrics: MetricsSnapshot,
}

/// Successful screenshot result in `url` response mode.
#[derive(Debug, Serialize)]
pub struct ScreenshotUrlResponse {
    pub status: &'static str,
    pub target: String,
    pub screenshot_url: String,
}
