//! Handler for health check endpoint.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// Returns service liveness.
///
/// # Endpoint
///
/// `GET /health`
///
/// Always responds 200; the service holds no connections whose loss would
/// degrade it between requests. The upstream API is deliberately not probed
/// here so that health checks never consume upstream quota.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}
