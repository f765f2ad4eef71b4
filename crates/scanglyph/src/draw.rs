// this_file: crates/scanglyph/src/draw.rs

//! Putting glyphs on a surface
//!
//! Drawing never fails. A character the font can't draw is reported in the
//! returned status and the surface is left alone.

use scanglyph_core::PixelSurface;
use scanglyph_render_scanline::composite;

use crate::font::{is_supported, FontProgram};

/// What happened to one requested character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawStatus {
    /// Rasterized and blitted; `pixels` non-zero coverage values written
    Drawn { pixels: usize },
    /// Outside the supported set, unmapped, or dropped at load time
    Unsupported,
    /// Had an outline but rasterizing it failed
    Failed,
}

impl DrawStatus {
    pub fn pixels(&self) -> usize {
        match self {
            Self::Drawn { pixels } => *pixels,
            _ => 0,
        }
    }

    pub fn is_drawn(&self) -> bool {
        matches!(self, Self::Drawn { .. })
    }
}

/// Totals for a run of text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextSummary {
    pub drawn: usize,
    pub skipped: usize,
    pub pixels: usize,
    /// Horizontal distance covered, in pixels
    pub advance: i32,
}

impl FontProgram {
    /// Draw `ch` with its bitmap's top-left corner at `(x, y)`
    ///
    /// Lowercase glyphs are smaller, so their bitmap is pushed down until
    /// its baseline meets the baseline of a full-size glyph at `(x, y)`.
    pub fn draw_glyph<S: PixelSurface + ?Sized>(
        &self,
        surface: &mut S,
        ch: char,
        pixel_size: u32,
        x: i32,
        y: i32,
    ) -> DrawStatus {
        if !is_supported(ch) {
            return DrawStatus::Unsupported;
        }

        let size = self.effective_size(ch, pixel_size);
        if size == 0 {
            return DrawStatus::Drawn { pixels: 0 };
        }

        let bitmap = match self.rasterize_char(ch, pixel_size) {
            Ok(Some(bitmap)) => bitmap,
            Ok(None) => return DrawStatus::Unsupported,
            Err(e) => {
                log::warn!("Failed to rasterize '{}' at {}px: {}", ch, pixel_size, e);
                return DrawStatus::Failed;
            },
        };

        let shift = self.placement(pixel_size).baseline - self.placement(size).baseline;
        let pixels = composite(surface, &bitmap, x, y.saturating_add(shift.round() as i32));
        DrawStatus::Drawn { pixels }
    }

    /// Horizontal advance `draw_text` would use for `text`
    pub fn measure_text(&self, text: &str, pixel_size: u32) -> i32 {
        text.chars()
            .map(|ch| match ch {
                ' ' => pen_advance(pixel_size),
                ch if self.outline(ch).is_some() => pen_advance(self.effective_size(ch, pixel_size)),
                _ => 0,
            })
            .fold(0, i32::saturating_add)
    }

    /// Draw `text` left to right starting at `(x, y)`
    ///
    /// Each drawn glyph advances the pen by its effective size; spaces
    /// advance by the full size. Anything else unsupported is skipped in place.
    pub fn draw_text<S: PixelSurface + ?Sized>(
        &self,
        surface: &mut S,
        text: &str,
        pixel_size: u32,
        x: i32,
        y: i32,
    ) -> TextSummary {
        let mut summary = TextSummary::default();

        for ch in text.chars() {
            if ch == ' ' {
                summary.advance = summary.advance.saturating_add(pen_advance(pixel_size));
                continue;
            }

            let pen = x.saturating_add(summary.advance);
            match self.draw_glyph(surface, ch, pixel_size, pen, y) {
                DrawStatus::Drawn { pixels } => {
                    summary.drawn += 1;
                    summary.pixels += pixels;
                    let size = self.effective_size(ch, pixel_size);
                    summary.advance = summary.advance.saturating_add(pen_advance(size));
                },
                DrawStatus::Unsupported | DrawStatus::Failed => summary.skipped += 1,
            }
        }

        log::debug!(
            "Drew {:?} at {}px: {} glyphs, {} skipped",
            text,
            pixel_size,
            summary.drawn,
            summary.skipped
        );
        summary
    }
}

/// Pen movement for a glyph of `size` pixels; saturates for absurd sizes
fn pen_advance(size: u32) -> i32 {
    i32::try_from(size).unwrap_or(i32::MAX)
}

/// Draw one character from `font` onto `surface`
pub fn draw_glyph<S: PixelSurface + ?Sized>(
    font: &FontProgram,
    surface: &mut S,
    ch: char,
    pixel_size: u32,
    x: i32,
    y: i32,
) -> DrawStatus {
    font.draw_glyph(surface, ch, pixel_size, x, y)
}
