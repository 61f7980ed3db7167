//! Report image rendering: layout composition, font fallback, and JPEG
//! rasterization.

pub mod fonts;
pub mod layout;
pub mod report;

pub use report::ReportRenderer;

/// Failure modes of report rasterization.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to encode report image: {0}")]
    Encode(#[from] image::ImageError),
}
