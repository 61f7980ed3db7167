//! Handler for the JSON analysis endpoint.

use axum::{Json, extract::State};
use validator::Validate;

use crate::api::dto::analyze::{AnalyzeRequest, AnalyzeResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::target::normalize_target;

/// Analyzes a domain and returns its backlink metrics as JSON.
///
/// # Endpoint
///
/// `POST /api/analyze`
///
/// # Request Body
///
/// ```json
/// { "target": "example.com" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "success",
///   "target": "example.com",
///   "metrics": {
///     "referring_domains": 120,
///     "backlinks": 4500,
///     "active_domains": 80,
///     "dofollow_domains": 95
///   }
/// }
/// ```
///
/// # Errors
///
/// - 400 when `target` is missing, empty, or not a single domain name
/// - upstream HTTP status when the metrics API rejects the request
/// - 500 when the upstream is unreachable or returns malformed data
pub async fn analyze_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    payload.validate()?;
    let target = normalize_target(payload.target.as_deref())?;

    let metrics = state.report_service.analyze(&target).await?;

    Ok(Json(AnalyzeResponse {
        status: "success",
        target,
        metrics,
    }))
}
