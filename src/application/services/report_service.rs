//! The fetch-then-render analysis pipeline.

use serde_json::json;
use std::sync::Arc;

use crate::domain::metrics::MetricsSnapshot;
use crate::domain::source::MetricsSource;
use crate::error::AppError;
use crate::render::ReportRenderer;

/// Orchestrates one analysis: a single upstream fetch, optionally followed
/// by a report render.
///
/// Holds no per-request state; every call allocates its own snapshot and
/// canvas, so concurrent requests never share mutable data.
pub struct ReportService<S: MetricsSource> {
    source: Arc<S>,
    renderer: Arc<ReportRenderer>,
}

impl<S: MetricsSource> ReportService<S> {
    pub fn new(source: Arc<S>, renderer: Arc<ReportRenderer>) -> Self {
        Self { source, renderer }
    }

    /// Fetches the metrics snapshot for `target`.
    ///
    /// `target` must already be validated (non-empty, trimmed).
    ///
    /// # Errors
    ///
    /// Upstream failures map to the matching [`AppError`] variant; the
    /// caller surfaces them without retrying.
    pub async fn analyze(&self, target: &str) -> Result<MetricsSnapshot, AppError> {
        let snapshot = self.source.fetch(target).await?;
        tracing::info!(
            domain = target,
            referring_domains = snapshot.referring_domains,
            backlinks = snapshot.backlinks,
            "analysis complete"
        );
        Ok(snapshot)
    }

    /// Fetches metrics and renders the report image, returning JPEG bytes.
    ///
    /// Rasterization is CPU-bound, so it runs on a blocking task.
    pub async fn analyze_report(&self, target: &str) -> Result<Vec<u8>, AppError> {
        let snapshot = self.source.fetch(target).await?;

        let renderer = self.renderer.clone();
        let domain = target.to_string();
        let bytes = tokio::task::spawn_blocking(move || renderer.render(&domain, &snapshot))
            .await
            .map_err(|e| {
                AppError::internal("Render task failed", json!({ "cause": e.to_string() }))
            })??;

        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DEFAULT_API_URL, ScreenshotResponseMode};
    use crate::domain::source::{MockMetricsSource, UpstreamError};
    use crate::render::fonts::FontSet;

    fn sample_snapshot() -> MetricsSnapshot {
        MetricsSnapshot {
            referring_domains: 120,
            backlinks: 4500,
            active_domains: 80,
            dofollow_domains: 95,
        }
    }

    fn test_renderer() -> Arc<ReportRenderer> {
        let config = Config {
            api_key: "test-key-123456".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            upstream_timeout_seconds: 30,
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            screenshot_response: ScreenshotResponseMode::Bytes,
            screenshot_dir: std::env::temp_dir(),
            screenshot_ttl_seconds: 3600,
            report_font: None,
            report_font_bold: None,
        };
        Arc::new(ReportRenderer::new(FontSet::load(&config)))
    }

    #[tokio::test]
    async fn test_analyze_returns_snapshot() {
        let mut source = MockMetricsSource::new();
        source
            .expect_fetch()
            .withf(|domain| domain == "example.com")
            .times(1)
            .returning(|_| Ok(sample_snapshot()));

        let service = ReportService::new(Arc::new(source), test_renderer());

        let snapshot = service.analyze("example.com").await.unwrap();
        assert_eq!(snapshot, sample_snapshot());
    }

    #[tokio::test]
    async fn test_analyze_propagates_malformed() {
        let mut source = MockMetricsSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Err(UpstreamError::Malformed("no data entries".to_string())));

        let service = ReportService::new(Arc::new(source), test_renderer());

        let err = service.analyze("example.com").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamMalformed { .. }));
    }

    #[tokio::test]
    async fn test_analyze_propagates_rejected_status() {
        let mut source = MockMetricsSource::new();
        source.expect_fetch().times(1).returning(|_| {
            Err(UpstreamError::Rejected {
                status: 403,
                body: "invalid key".to_string(),
            })
        });

        let service = ReportService::new(Arc::new(source), test_renderer());

        let err = service.analyze("example.com").await.unwrap_err();
        assert!(matches!(
            err,
            AppError::UpstreamRejected { status: 403, .. }
        ));
    }

    #[tokio::test]
    async fn test_analyze_report_produces_jpeg() {
        let mut source = MockMetricsSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(sample_snapshot()));

        let service = ReportService::new(Arc::new(source), test_renderer());

        let bytes = service.analyze_report("example.com").await.unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[tokio::test]
    async fn test_analyze_report_skips_render_on_fetch_error() {
        let mut source = MockMetricsSource::new();
        source
            .expect_fetch()
            .times(1)
            .returning(|_| Err(UpstreamError::Unreachable("connect refused".to_string())));

        let service = ReportService::new(Arc::new(source), test_renderer());

        let err = service.analyze_report("example.com").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamUnreachable { .. }));
    }
}
