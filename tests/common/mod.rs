#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use backlink_report::application::services::ReportService;
use backlink_report::config::{Config, ScreenshotResponseMode};
use backlink_report::infrastructure::screenshots::ScreenshotStore;
use backlink_report::infrastructure::seobserver::SeoObserverClient;
use backlink_report::render::fonts::FontSet;
use backlink_report::render::ReportRenderer;
use backlink_report::state::AppState;

pub fn test_config(api_url: &str, dir: &std::path::Path, mode: ScreenshotResponseMode) -> Config {
    Config {
        api_key: "test-key-123456".to_string(),
        api_url: api_url.to_string(),
        upstream_timeout_seconds: 5,
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        screenshot_response: mode,
        screenshot_dir: dir.to_path_buf(),
        screenshot_ttl_seconds: 3600,
        report_font: None,
        report_font_bold: None,
    }
}

/// Builds an [`AppState`] whose upstream client points at `api_url`.
///
/// The returned `TempDir` owns the screenshot directory; keep it alive for
/// the duration of the test.
pub async fn create_test_state(
    api_url: &str,
    mode: ScreenshotResponseMode,
) -> (AppState, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = test_config(api_url, dir.path(), mode);

    let source = Arc::new(
        SeoObserverClient::with_endpoint(api_url, config.api_key.as_str(), Duration::from_secs(5))
            .unwrap(),
    );
    let renderer = Arc::new(ReportRenderer::new(FontSet::load(&config)));
    let report_service = Arc::new(ReportService::new(source, renderer));
    let screenshots = Arc::new(
        ScreenshotStore::open(dir.path().to_path_buf(), Duration::from_secs(3600))
            .await
            .unwrap(),
    );

    let state = AppState::new(Arc::new(config), report_service, screenshots);
    (state, dir)
}

/// Canonical upstream response body used across handler tests.
pub fn upstream_body() -> serde_json::Value {
    serde_json::json!({
        "data": [{
            "RefDomains": 120,
            "ExtBackLinks": 4500,
            "RefDomainTypeLive": 80,
            "RefDomainTypeFollow": 95
        }]
    })
}
