//! HTTP server initialization and runtime setup.
//!
//! Wires the upstream client, renderer, and screenshot store together and
//! runs the Axum server lifecycle.

use crate::application::services::ReportService;
use crate::config::{Config, ScreenshotResponseMode};
use crate::infrastructure::screenshots::ScreenshotStore;
use crate::infrastructure::seobserver::SeoObserverClient;
use crate::render::{ReportRenderer, fonts::FontSet};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// How often the screenshot sweeper wakes up in `url` mode.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SEObserver API client
/// - Report renderer with the configured font set
/// - Screenshot store (plus a TTL sweeper in `url` response mode)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if the upstream client cannot be constructed, the
/// screenshot directory cannot be created, or the server bind fails.
pub async fn run(config: Config) -> Result<()> {
    let source = Arc::new(SeoObserverClient::new(&config)?);

    let fonts = FontSet::load(&config);
    let renderer = Arc::new(ReportRenderer::new(fonts));

    let screenshots = Arc::new(
        ScreenshotStore::open(
            config.screenshot_dir.clone(),
            Duration::from_secs(config.screenshot_ttl_seconds),
        )
        .await?,
    );

    if config.screenshot_response == ScreenshotResponseMode::Url {
        screenshots.clone().spawn_sweeper(SWEEP_INTERVAL);
        tracing::info!("Screenshot sweeper started");
    }

    let report_service = Arc::new(ReportService::new(source, renderer));

    let state = AppState::new(Arc::new(config.clone()), report_service, screenshots);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
