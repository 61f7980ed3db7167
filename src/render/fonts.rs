//! Font loading with a graceful fallback chain.
//!
//! The renderer never deals with load failures: [`FontSet::load`] tries the
//! configured font path first, then a list of well-known system locations,
//! and finally falls back to DejaVu Sans faces embedded in the binary, which
//! always parse. Which source won is logged once at startup.

use rusttype::Font;
use std::path::Path;

use crate::config::Config;

static EMBEDDED_REGULAR: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
static EMBEDDED_BOLD: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// System locations tried for the regular face, in order.
const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/Library/Fonts/Arial.ttf",
];

/// System locations tried for the bold face, in order.
const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
];

/// The two faces the report renderer draws with.
pub struct FontSet {
    pub regular: Font<'static>,
    pub bold: Font<'static>,
}

impl FontSet {
    /// Loads both faces through the fallback chain. Never fails.
    pub fn load(config: &Config) -> Self {
        Self {
            regular: load_chain(
                config.report_font.as_deref(),
                REGULAR_CANDIDATES,
                EMBEDDED_REGULAR,
                "regular",
            ),
            bold: load_chain(
                config.report_font_bold.as_deref(),
                BOLD_CANDIDATES,
                EMBEDDED_BOLD,
                "bold",
            ),
        }
    }
}

/// Tries `preferred`, then each candidate path, then the embedded face.
fn load_chain(
    preferred: Option<&Path>,
    candidates: &[&str],
    embedded: &'static [u8],
    kind: &str,
) -> Font<'static> {
    let paths = preferred
        .into_iter()
        .map(Path::to_path_buf)
        .chain(candidates.iter().map(Into::into));

    for path in paths {
        match std::fs::read(&path) {
            Ok(bytes) => {
                if let Some(font) = Font::try_from_vec(bytes) {
                    tracing::debug!(kind, path = %path.display(), "loaded report font");
                    return font;
                }
                tracing::warn!(kind, path = %path.display(), "font file is not parseable, trying next");
            }
            Err(_) => continue,
        }
    }

    tracing::debug!(kind, "using embedded DejaVu Sans font");
    // The embedded faces are compiled into the binary and known to parse.
    Font::try_from_bytes(embedded).expect("embedded font is valid")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DEFAULT_API_URL, ScreenshotResponseMode};
    use std::path::PathBuf;

    fn test_config(font: Option<PathBuf>) -> Config {
        Config {
            api_key: "test-key-123456".to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            upstream_timeout_seconds: 30,
            listen_addr: "0.0.0.0:8080".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            screenshot_response: ScreenshotResponseMode::Bytes,
            screenshot_dir: std::env::temp_dir(),
            screenshot_ttl_seconds: 3600,
            report_font: font,
            report_font_bold: None,
        }
    }

    #[test]
    fn test_load_always_succeeds() {
        // Even with no usable preferred path, the embedded fallback applies.
        let config = test_config(Some(PathBuf::from("/nonexistent/font.ttf")));
        let fonts = FontSet::load(&config);

        // A glyph lookup on both faces proves they parsed.
        assert!(fonts.regular.glyph_count() > 0);
        assert!(fonts.bold.glyph_count() > 0);
    }

    #[test]
    fn test_embedded_fonts_parse() {
        assert!(Font::try_from_bytes(EMBEDDED_REGULAR).is_some());
        assert!(Font::try_from_bytes(EMBEDDED_BOLD).is_some());
    }
}
