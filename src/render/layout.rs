//! Structured pre-render layout model for the report image.
//!
//! The layout is computed separately from rasterization so the exact card
//! geometry, labels, and formatted values can be asserted directly in tests
//! without decoding pixels. Composing the same snapshot with the same
//! timestamp always yields an identical layout.

use chrono::{DateTime, Utc};

use crate::domain::metrics::MetricsSnapshot;

pub const CANVAS_WIDTH: u32 = 1000;
pub const CANVAS_HEIGHT: u32 = 600;

/// RGB triple used throughout the layout.
pub type Color = [u8; 3];

pub const PRIMARY: Color = [63, 81, 181];
pub const SECONDARY: Color = [33, 150, 243];
pub const TEXT: Color = [33, 33, 33];
pub const FOOTER: Color = [117, 117, 117];
pub const HEADER_TINT: Color = [237, 242, 252];

/// Pastel fills, one per card, in grid order.
pub const CARD_FILLS: [Color; 4] = [
    [232, 244, 253],
    [232, 245, 233],
    [255, 243, 224],
    [252, 232, 230],
];

/// Card labels in the fixed metric order: referring domains, backlinks,
/// active domains, dofollow domains.
pub const CARD_LABELS: [&str; 4] = [
    "REFERRING DOMAINS",
    "BACKLINKS",
    "ACTIVE DOMAINS",
    "DOFOLLOW DOMAINS",
];

pub const HEADER_HEIGHT: i32 = 120;
pub const TITLE_TOP: i32 = 40;
pub const TITLE_SIZE: f32 = 36.0;
pub const SEPARATOR_MARGIN: i32 = 50;

pub const GRID_TOP: i32 = 160;
pub const CARD_ORIGIN_X: i32 = 50;
pub const CARD_WIDTH: u32 = 400;
pub const CARD_HEIGHT: u32 = 150;
pub const CARD_STRIDE_X: i32 = 450;
pub const CARD_STRIDE_Y: i32 = 180;
pub const CARD_RADIUS: i32 = 15;
pub const LABEL_TOP: i32 = 30;
pub const LABEL_SIZE: f32 = 18.0;
pub const VALUE_TOP: i32 = 60;
pub const VALUE_SIZE: f32 = 48.0;

pub const FOOTER_TOP: i32 = 560;
pub const FOOTER_SIZE: f32 = 14.0;

/// One metric card: a label, a formatted value, and its pixel geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCard {
    pub label: &'static str,
    /// Plain decimal rendering of the counter, no grouping separators.
    pub value_text: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub fill: Color,
}

/// Complete pre-render description of one report image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportLayout {
    pub width: u32,
    pub height: u32,
    /// Header title built from the analyzed domain.
    pub title: String,
    /// 2x2 grid, row-major: top-left, top-right, bottom-left, bottom-right.
    pub cards: [MetricCard; 4],
    /// Footer line carrying the generation timestamp.
    pub footer: String,
}

impl ReportLayout {
    /// Lays out a report for `domain` with the given snapshot and timestamp.
    pub fn compose(
        domain: &str,
        metrics: &MetricsSnapshot,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let values = [
            metrics.referring_domains,
            metrics.backlinks,
            metrics.active_domains,
            metrics.dofollow_domains,
        ];

        let cards = std::array::from_fn(|i| {
            let row = (i / 2) as i32;
            let col = (i % 2) as i32;
            MetricCard {
                label: CARD_LABELS[i],
                value_text: values[i].to_string(),
                x: CARD_ORIGIN_X + col * CARD_STRIDE_X,
                y: GRID_TOP + row * CARD_STRIDE_Y,
                width: CARD_WIDTH,
                height: CARD_HEIGHT,
                fill: CARD_FILLS[i],
            }
        });

        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            title: format!("SEO Analysis - {domain}"),
            cards,
            footer: format!(
                "Generated {}",
                generated_at.format("%Y-%m-%d %H:%M:%S UTC")
            ),
        }
    }
}
