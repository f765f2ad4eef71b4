//! Scanline Renderer: where quadratic outlines become coverage
//!
//! Outlines arrive in font units with curves hiding behind off-curve points.
//! They leave as a square coverage bitmap, one byte per pixel, ready to be
//! stamped onto whatever surface the host owns.
//!
//! ## The Pipeline
//!
//! - `tessellate`: Implied points restored, curves flattened in fixed steps
//! - `edge`: Closed polylines cut into the segments a scanline can cross
//! - `rasterizer`: Several sub-scanlines per row, even-odd spans, fractional ends
//!
//! [`GlyphRenderer`] ties the three together and [`composite`] blits the result.

pub mod edge;
pub mod rasterizer;
pub mod tessellate;

use scanglyph_core::{
    CoverageBitmap, PixelSurface, Point2F, RenderConfig, RenderError, Result,
};
use scanglyph_sfnt::GlyphOutline;

pub use edge::{Edge, EdgeList};
pub use rasterizer::ScanlineRasterizer;
pub use tessellate::{Tessellation, Tessellator};

/// Largest glyph bitmap side we agree to allocate
pub const MAX_GLYPH_SIZE: u32 = 4096;

/// Font units to bitmap pixels
///
/// Font space points up, bitmaps point down. The baseline sits
/// `typo_ascender * scale` pixels below the bitmap's top edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub scale: f32,
    pub baseline: f32,
}

impl Placement {
    pub fn new(pixel_size: u32, units_per_em: u16, typo_ascender: i16) -> Self {
        let scale = pixel_size as f32 / units_per_em.max(1) as f32;
        Self {
            scale,
            baseline: typo_ascender as f32 * scale,
        }
    }

    #[inline]
    pub fn to_pixel(&self, p: Point2F) -> Point2F {
        Point2F::new(p.x * self.scale, self.baseline - p.y * self.scale)
    }
}

/// Tessellator and rasterizer configured as one unit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GlyphRenderer {
    tessellator: Tessellator,
    rasterizer: ScanlineRasterizer,
}

impl GlyphRenderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            tessellator: Tessellator::new(config.curve_subdivisions),
            rasterizer: ScanlineRasterizer::new(config.sub_scanlines),
        }
    }

    pub fn tessellator(&self) -> &Tessellator {
        &self.tessellator
    }

    pub fn rasterizer(&self) -> &ScanlineRasterizer {
        &self.rasterizer
    }

    /// Rasterize `outline` into a `pixel_size` x `pixel_size` bitmap
    pub fn render(
        &self,
        outline: &GlyphOutline,
        placement: &Placement,
        pixel_size: u32,
    ) -> Result<CoverageBitmap> {
        if pixel_size == 0 || pixel_size > MAX_GLYPH_SIZE {
            return Err(RenderError::InvalidDimensions {
                width: pixel_size,
                height: pixel_size,
            }
            .into());
        }

        let tessellation = self.tessellator.tessellate(outline);
        let edges = EdgeList::from_tessellation(&tessellation, |p| placement.to_pixel(p));
        log::trace!(
            "Glyph {} at {}px: {} points, {} edges",
            outline.glyph_id,
            pixel_size,
            tessellation.points.len(),
            edges.len()
        );

        Ok(self.rasterizer.rasterize(&edges, pixel_size, pixel_size))
    }
}

/// Stamp non-zero coverage onto `surface` with the bitmap's top-left at `(x, y)`
///
/// Zero coverage leaves the destination alone, and so do pixels whose
/// position does not fit in an `i32`. Returns the pixels written.
pub fn composite<S: PixelSurface + ?Sized>(
    surface: &mut S,
    bitmap: &CoverageBitmap,
    x: i32,
    y: i32,
) -> usize {
    let mut written = 0;
    for row in 0..bitmap.height() {
        let Some(py) = offset(y, row as usize) else {
            break;
        };
        for (col, &coverage) in bitmap.row(row).iter().enumerate() {
            if coverage == 0 {
                continue;
            }
            let Some(px) = offset(x, col) else {
                break;
            };
            surface.set_pixel(px, py, coverage);
            written += 1;
        }
    }
    written
}

#[inline]
fn offset(origin: i32, delta: usize) -> Option<i32> {
    i32::try_from(delta).ok().and_then(|d| origin.checked_add(d))
}
