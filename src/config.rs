//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. It is passed explicitly into the pieces that need it; request
//! handlers never read the environment themselves.
//!
//! ## Required Variables
//!
//! - `SEOBSERVER_API_KEY` - API key for the SEObserver backlink metrics API.
//!   Startup fails without it; the service never sends an unauthenticated
//!   upstream request.
//!
//! ## Optional Variables
//!
//! - `SEOBSERVER_API_URL` - Upstream endpoint
//!   (default: `https://api1.seobserver.com/backlinks/metrics.json`)
//! - `UPSTREAM_TIMEOUT_SECONDS` - Upstream request timeout (default: 30)
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `SCREENSHOT_RESPONSE` - `bytes` to return raw JPEG from the screenshot
//!   endpoint, `url` to store the image and return a retrieval link
//!   (default: `bytes`)
//! - `SCREENSHOT_DIR` - Storage directory for `url` mode
//!   (default: `<system tmp>/backlink-report`)
//! - `SCREENSHOT_TTL_SECONDS` - Stored image lifetime in `url` mode
//!   (default: 3600)
//! - `REPORT_FONT` / `REPORT_FONT_BOLD` - Preferred font files for the
//!   report renderer; well-known system fonts and an embedded fallback are
//!   used when unset or unreadable

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Default SEObserver endpoint queried for backlink metrics.
pub const DEFAULT_API_URL: &str = "https://api1.seobserver.com/backlinks/metrics.json";

/// How `POST /api/analyze/screenshot` delivers the rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenshotResponseMode {
    /// Respond with raw `image/jpeg` bytes.
    Bytes,
    /// Store the image and respond with a JSON body carrying a retrieval URL.
    Url,
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// SEObserver API key sent in the `X-SEObserver-key` header.
    pub api_key: String,
    /// SEObserver metrics endpoint.
    pub api_url: String,
    /// Fixed timeout for the single upstream request, in seconds.
    pub upstream_timeout_seconds: u64,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// Delivery mode for the screenshot endpoint.
    pub screenshot_response: ScreenshotResponseMode,
    /// Directory where `url` mode stores rendered images.
    pub screenshot_dir: PathBuf,
    /// Lifetime of stored images before the sweeper removes them.
    pub screenshot_ttl_seconds: u64,
    /// Preferred regular font file, tried before the system/embedded chain.
    pub report_font: Option<PathBuf>,
    /// Preferred bold font file, tried before the system/embedded chain.
    pub report_font_bold: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SEOBSERVER_API_KEY` is missing. Every analysis
    /// request requires the key, so the process fails fast instead.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("SEOBSERVER_API_KEY")
            .context("SEOBSERVER_API_KEY must be set")?;

        let api_url =
            env::var("SEOBSERVER_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let upstream_timeout_seconds = env::var("UPSTREAM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let screenshot_response = match env::var("SCREENSHOT_RESPONSE") {
            Ok(v) if v.eq_ignore_ascii_case("url") => ScreenshotResponseMode::Url,
            Ok(v) if v.eq_ignore_ascii_case("bytes") => ScreenshotResponseMode::Bytes,
            Ok(other) => anyhow::bail!(
                "SCREENSHOT_RESPONSE must be 'bytes' or 'url', got '{}'",
                other
            ),
            Err(_) => ScreenshotResponseMode::Bytes,
        };

        let screenshot_dir = env::var("SCREENSHOT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| env::temp_dir().join("backlink-report"));

        let screenshot_ttl_seconds = env::var("SCREENSHOT_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let report_font = env::var("REPORT_FONT").ok().map(PathBuf::from);
        let report_font_bold = env::var("REPORT_FONT_BOLD").ok().map(PathBuf::from);

        Ok(Self {
            api_key,
            api_url,
            upstream_timeout_seconds,
            listen_addr,
            log_level,
            log_format,
            screenshot_response,
            screenshot_dir,
            screenshot_ttl_seconds,
            report_font,
            report_font_bold,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the API key is empty
    /// - the upstream URL is not `http(s)://`
    /// - `listen_addr` is not `host:port`
    /// - `log_format` is not `text` or `json`
    /// - the upstream timeout or screenshot TTL is zero
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("SEOBSERVER_API_KEY must not be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!(
                "SEOBSERVER_API_URL must start with 'http://' or 'https://', got '{}'",
                self.api_url
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.upstream_timeout_seconds == 0 {
            anyhow::bail!("UPSTREAM_TIMEOUT_SECONDS must be greater than 0");
        }

        if self.screenshot_ttl_seconds == 0 {
            anyhow::bail!("SCREENSHOT_TTL_SECONDS must be greater than 0");
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upstream: {}", self.api_url);
        tracing::info!("  Upstream API key: {}", mask_api_key(&self.api_key));
        tracing::info!("  Upstream timeout: {}s", self.upstream_timeout_seconds);
        tracing::info!("  Screenshot response: {:?}", self.screenshot_response);

        if self.screenshot_response == ScreenshotResponseMode::Url {
            tracing::info!("  Screenshot dir: {}", self.screenshot_dir.display());
            tracing::info!("  Screenshot TTL: {}s", self.screenshot_ttl_seconds);
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks an API key for logging, keeping only a short prefix.
///
/// - `sk-1234567890` → `sk-1***`
/// - short keys are fully masked
fn mask_api_key(key: &str) -> String {
    if key.len() > 8 {
        format!("{}***", &key[..4])
    } else {
        "***".to_string()
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
