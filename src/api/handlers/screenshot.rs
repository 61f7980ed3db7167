//! Handlers for the screenshot endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::analyze::{AnalyzeRequest, ScreenshotUrlResponse};
use crate::config::ScreenshotResponseMode;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::filename::{REPORT_EXTENSION, is_safe_report_filename, sanitize_domain};
use crate::utils::target::normalize_target;

/// Analyzes a domain and returns the rendered report image.
///
/// # Endpoint
///
/// `POST /api/analyze/screenshot`
///
/// # Response Modes
///
/// Controlled by the `SCREENSHOT_RESPONSE` setting:
///
/// - `bytes` (default): the JPEG itself, served as `image/jpeg` with a
///   `Content-Disposition: attachment` filename derived from the target
/// - `url`: the image is stored on disk and a JSON body points at
///   `GET /api/screenshot/{filename}`
///
/// # Errors
///
/// Same validation and upstream mapping as `POST /api/analyze`, plus 500
/// when the image cannot be rendered or stored.
pub async fn analyze_screenshot_handler(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Response, AppError> {
    payload.validate()?;
    let target = normalize_target(payload.target.as_deref())?;

    let bytes = state.report_service.analyze_report(&target).await?;

    match state.config.screenshot_response {
        ScreenshotResponseMode::Bytes => {
            let attachment = format!(
                "attachment; filename=\"seo_report_{}{}\"",
                sanitize_domain(&target),
                REPORT_EXTENSION
            );
            Ok((
                [
                    (header::CONTENT_TYPE, "image/jpeg".to_string()),
                    (header::CONTENT_DISPOSITION, attachment),
                ],
                bytes,
            )
                .into_response())
        }
        ScreenshotResponseMode::Url => {
            let filename = state.screenshots.store(&target, bytes).await?;
            Ok(Json(ScreenshotUrlResponse {
                status: "success",
                target,
                screenshot_url: format!("/api/screenshot/{filename}"),
            })
            .into_response())
        }
    }
}

/// Serves a previously stored report image.
///
/// # Endpoint
///
/// `GET /api/screenshot/{filename}`
///
/// Only filenames shaped like the ones this service generates are accepted;
/// anything with path separators or parent references is rejected before
/// touching the filesystem.
///
/// # Errors
///
/// - 400 for a malformed filename
/// - 404 when no such image exists (including after TTL expiry)
pub async fn screenshot_handler(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, AppError> {
    if !is_safe_report_filename(&filename) {
        return Err(AppError::bad_request(
            "Invalid screenshot filename",
            json!({ "filename": filename }),
        ));
    }

    let bytes = state.screenshots.read(&filename).await?;

    Ok((
        [(header::CONTENT_TYPE, "image/jpeg".to_string())],
        bytes,
    )
        .into_response())
}
