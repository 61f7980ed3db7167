//! Rasterizes a [`ReportLayout`] onto an RGB canvas and encodes it as JPEG.
//!
//! Drawing is plain per-pixel work: rounded rectangles by point-in-shape
//! tests and text by rusttype glyph coverage blended onto the canvas. The
//! canvas is written once per render and the encoded bytes are handed to the
//! caller; nothing is retained between renders.

use chrono::{DateTime, Utc};
use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use rusttype::{Font, Scale, point};

use crate::domain::metrics::MetricsSnapshot;
use crate::render::RenderError;
use crate::render::fonts::FontSet;
use crate::render::layout::{
    self, Color, FOOTER_SIZE, FOOTER_TOP, HEADER_HEIGHT, LABEL_SIZE, LABEL_TOP, ReportLayout,
    SEPARATOR_MARGIN, TITLE_SIZE, TITLE_TOP, VALUE_SIZE, VALUE_TOP,
};

/// JPEG quality used for report output.
const JPEG_QUALITY: u8 = 95;

/// Stateless report image renderer.
///
/// Holds only the loaded fonts; every call allocates a fresh canvas.
pub struct ReportRenderer {
    fonts: FontSet,
}

impl ReportRenderer {
    pub fn new(fonts: FontSet) -> Self {
        Self { fonts }
    }

    /// Renders the report for `domain`, stamped with the current time.
    pub fn render(
        &self,
        domain: &str,
        metrics: &MetricsSnapshot,
    ) -> Result<Vec<u8>, RenderError> {
        self.render_at(domain, metrics, Utc::now())
    }

    /// Renders with an explicit generation timestamp.
    ///
    /// Layout and textual content depend only on the inputs, so two calls
    /// with equal arguments produce identical bytes.
    pub fn render_at(
        &self,
        domain: &str,
        metrics: &MetricsSnapshot,
        generated_at: DateTime<Utc>,
    ) -> Result<Vec<u8>, RenderError> {
        let layout = ReportLayout::compose(domain, metrics, generated_at);
        let mut canvas = RgbImage::from_pixel(layout.width, layout.height, Rgb([255, 255, 255]));

        self.draw(&mut canvas, &layout);

        let mut buf = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY);
        canvas.write_with_encoder(encoder)?;

        tracing::debug!(domain, bytes = buf.len(), "rendered report image");
        Ok(buf)
    }

    fn draw(&self, canvas: &mut RgbImage, layout: &ReportLayout) {
        let width = layout.width as i32;

        // Header band: vertical fade from a light tint down to white.
        for y in 0..HEADER_HEIGHT {
            let t = y as f64 / HEADER_HEIGHT as f64;
            let color = lerp_color(layout::HEADER_TINT, [255, 255, 255], t);
            for x in 0..width {
                canvas.put_pixel(x as u32, y as u32, Rgb(color));
            }
        }

        draw_text_centered(
            canvas,
            &self.fonts.bold,
            TITLE_SIZE,
            width as f32 / 2.0,
            TITLE_TOP,
            layout::PRIMARY,
            &layout.title,
        );

        // Separator rule under the header.
        fill_rect(
            canvas,
            SEPARATOR_MARGIN,
            HEADER_HEIGHT,
            (width - 2 * SEPARATOR_MARGIN) as u32,
            2,
            layout::SECONDARY,
        );

        for card in &layout.cards {
            draw_card(canvas, &self.fonts, card);
        }

        draw_text_centered(
            canvas,
            &self.fonts.regular,
            FOOTER_SIZE,
            width as f32 / 2.0,
            FOOTER_TOP,
            layout::FOOTER,
            &layout.footer,
        );
    }
}

fn draw_card(canvas: &mut RgbImage, fonts: &FontSet, card: &layout::MetricCard) {
    draw_rounded_rect(
        canvas,
        card.x,
        card.y,
        card.width,
        card.height,
        layout::CARD_RADIUS,
        card.fill,
        layout::SECONDARY,
    );

    let center_x = card.x as f32 + card.width as f32 / 2.0;

    draw_text_centered(
        canvas,
        &fonts.regular,
        LABEL_SIZE,
        center_x,
        card.y + LABEL_TOP,
        layout::TEXT,
        card.label,
    );
    draw_text_centered(
        canvas,
        &fonts.bold,
        VALUE_SIZE,
        center_x,
        card.y + VALUE_TOP,
        layout::PRIMARY,
        &card.value_text,
    );
}

/// Linear interpolation between two colors, `t` in `[0, 1]`.
fn lerp_color(c1: Color, c2: Color, t: f64) -> Color {
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    [mix(c1[0], c2[0]), mix(c1[1], c2[1]), mix(c1[2], c2[2])]
}

fn fill_rect(canvas: &mut RgbImage, x: i32, y: i32, w: u32, h: u32, color: Color) {
    for py in 0..h as i32 {
        for px in 0..w as i32 {
            put_pixel_checked(canvas, x + px, y + py, color);
        }
    }
}

/// Point-in-rounded-rectangle test in local coordinates.
fn rounded_rect_contains(x: i32, y: i32, w: i32, h: i32, r: i32) -> bool {
    if x < 0 || y < 0 || x >= w || y >= h {
        return false;
    }
    if x >= r && x < w - r {
        return true;
    }
    if y >= r && y < h - r {
        return true;
    }
    let cx = if x < r { r - 1 } else { w - r };
    let cy = if y < r { r - 1 } else { h - r };
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy <= r * r
}

fn draw_rounded_rect(
    canvas: &mut RgbImage,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    radius: i32,
    fill: Color,
    outline: Color,
) {
    let (w, h) = (w as i32, h as i32);
    for py in 0..h {
        for px in 0..w {
            if !rounded_rect_contains(px, py, w, h, radius) {
                continue;
            }
            // A pixel is on the outline if shrinking the shape by one pixel
            // on every side excludes it.
            let inner = rounded_rect_contains(px - 1, py - 1, w - 2, h - 2, radius - 1);
            let color = if inner { fill } else { outline };
            put_pixel_checked(canvas, x + px, y + py, color);
        }
    }
}

fn put_pixel_checked(canvas: &mut RgbImage, x: i32, y: i32, color: Color) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    canvas.put_pixel(x, y, Rgb(color));
}

/// Pixel width of `text` at the given size, from glyph bounding boxes.
fn text_width(font: &Font<'static>, px: f32, text: &str) -> f32 {
    if text.is_empty() {
        return 0.0;
    }
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let mut width: f32 = 0.0;
    for glyph in font.layout(text, scale, point(0.0, v_metrics.ascent)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            width = width.max(bb.max.x as f32);
        }
    }
    width
}

/// Draws `text` with its top edge at `y`, blending glyph coverage onto the
/// canvas.
fn draw_text(
    canvas: &mut RgbImage,
    font: &Font<'static>,
    px: f32,
    x: i32,
    y: i32,
    color: Color,
    text: &str,
) {
    let scale = Scale::uniform(px);
    let v_metrics = font.v_metrics(scale);
    let baseline = y as f32 + v_metrics.ascent;

    for glyph in font.layout(text, scale, point(x as f32, baseline)) {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, coverage| {
                let px = gx as i32 + bb.min.x;
                let py = gy as i32 + bb.min.y;
                if px < 0 || py < 0 {
                    return;
                }
                let (px, py) = (px as u32, py as u32);
                if px >= canvas.width() || py >= canvas.height() {
                    return;
                }
                if coverage <= 0.0 {
                    return;
                }
                let dst = canvas.get_pixel_mut(px, py);
                let inv = 1.0 - coverage;
                dst.0[0] = (color[0] as f32 * coverage + dst.0[0] as f32 * inv) as u8;
                dst.0[1] = (color[1] as f32 * coverage + dst.0[1] as f32 * inv) as u8;
                dst.0[2] = (color[2] as f32 * coverage + dst.0[2] as f32 * inv) as u8;
            });
        }
    }
}

/// Draws `text` horizontally centered on `cx`, top edge at `y`.
fn draw_text_centered(
    canvas: &mut RgbImage,
    font: &Font<'static>,
    px: f32,
    cx: f32,
    y: i32,
    color: Color,
    text: &str,
) {
    let w = text_width(font, px, text);
    let x = (cx - w / 2.0).round() as i32;
    draw_text(canvas, font, px, x, y, color, text);
}
