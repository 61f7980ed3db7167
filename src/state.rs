//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::application::services::ReportService;
use crate::config::Config;
use crate::infrastructure::screenshots::ScreenshotStore;
use crate::infrastructure::seobserver::SeoObserverClient;

/// Everything the HTTP layer needs, cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub report_service: Arc<ReportService<SeoObserverClient>>,
    pub screenshots: Arc<ScreenshotStore>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        report_service: Arc<ReportService<SeoObserverClient>>,
        screenshots: Arc<ScreenshotStore>,
    ) -> Self {
        Self {
            config,
            report_service,
            screenshots,
        }
    }
}
