//! Scanglyph: TrueType glyphs, scanline rendered
//!
//! Load a font once, then draw letters and digits onto anything that can
//! take a coverage value per pixel.
//!
//! ```ignore
//! use scanglyph::prelude::*;
//!
//! let font = load_font("DejaVuSans.ttf")?;
//! let mut canvas = GrayCanvas::new(320, 64)?;
//! font.draw_text(&mut canvas, "Hello 42", 48, 8, 8);
//! std::fs::write("hello.pgm", canvas.to_pgm()?)?;
//! ```
//!
//! Only ASCII letters and digits are decoded; see [`SUPPORTED_CHARS`].
//! Lowercase letters render at 80% of the requested size by default.

mod draw;
mod font;

pub use draw::{draw_glyph, DrawStatus, TextSummary};
pub use font::{is_supported, load_font, FontMetrics, FontProgram, SUPPORTED_CHARS};

pub use scanglyph_render_scanline as render;
pub use scanglyph_sfnt as sfnt;

pub use scanglyph_core::{
    error, FontFormatError, GeometryError, RenderError, ResourceError, Result, ScanglyphError,
};

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{draw_glyph, load_font, DrawStatus, FontProgram, TextSummary};
    pub use scanglyph_core::{
        ByteSource, CoverageBitmap, FsSource, GrayCanvas, PixelSurface, RenderConfig, Result,
        ScanglyphError,
    };
}
