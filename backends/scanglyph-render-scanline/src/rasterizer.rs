// this_file: backends/scanglyph-render-scanline/src/rasterizer.rs

//! Super-sampled scanline fill
//!
//! Each pixel row is sampled by several horizontal lines. Along each line
//! the sorted edge crossings are paired up even-odd, and every pair paints a
//! span: full weight for the pixels it covers completely, a fraction for the
//! pixels at either end. Summing the lines gives anti-aliased coverage.

use scanglyph_core::config::{DEFAULT_SUB_SCANLINES, MAX_SAMPLING_COUNT};
use scanglyph_core::CoverageBitmap;

use crate::edge::EdgeList;

/// Even-odd scanline rasterizer with vertical super-sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanlineRasterizer {
    sub_scanlines: u32,
}

impl Default for ScanlineRasterizer {
    fn default() -> Self {
        Self::new(DEFAULT_SUB_SCANLINES)
    }
}

impl ScanlineRasterizer {
    /// Clamped to `1..=MAX_SAMPLING_COUNT`
    pub fn new(sub_scanlines: u32) -> Self {
        Self {
            sub_scanlines: sub_scanlines.clamp(1, MAX_SAMPLING_COUNT),
        }
    }

    pub fn sub_scanlines(&self) -> u32 {
        self.sub_scanlines
    }

    /// Fill `edges` into a `width` x `height` coverage bitmap
    pub fn rasterize(&self, edges: &EdgeList, width: u32, height: u32) -> CoverageBitmap {
        let w = width as usize;
        let mut coverage = vec![0f32; w * height as usize];
        let Some((top, bottom)) = edges.y_bounds() else {
            return to_bitmap(width, height, &coverage);
        };
        if w == 0 {
            return to_bitmap(width, height, &coverage);
        }

        // Rows outside the edges' vertical extent have no crossings
        let first_row = top.floor().max(0.0) as usize;
        let last_row = (bottom.ceil().max(0.0) as usize).min(height as usize);

        let n = self.sub_scanlines;
        let weight = 255.0 / n as f32;
        let mut crossings: Vec<f32> = Vec::with_capacity(edges.len());

        let rows = coverage
            .chunks_exact_mut(w)
            .enumerate()
            .take(last_row)
            .skip(first_row);
        for (y, row) in rows {
            for k in 0..n {
                let scanline = y as f32 + k as f32 / n as f32;

                crossings.clear();
                crossings.extend(edges.iter().filter_map(|e| e.intersect(scanline)));
                if crossings.len() < 2 {
                    continue;
                }
                crossings.sort_by(f32::total_cmp);

                // A trailing unpaired crossing is dropped
                for pair in crossings.chunks_exact(2) {
                    fill_span(row, pair[0], pair[1], weight);
                }
            }
        }

        to_bitmap(width, height, &coverage)
    }
}

/// Add `weight` over `[start, end)` with fractional end pixels
fn fill_span(row: &mut [f32], start: f32, end: f32, weight: f32) {
    let width = row.len() as f32;
    let x0 = start.clamp(0.0, width);
    let x1 = end.clamp(0.0, width);
    if x1 <= x0 {
        return;
    }

    let i0 = x0.floor() as usize;
    let i1 = x1.floor() as usize;

    if i0 == i1 {
        if let Some(px) = row.get_mut(i0) {
            *px += (x1 - x0) * weight;
        }
        return;
    }

    if let Some(px) = row.get_mut(i0) {
        *px += (1.0 - (x0 - i0 as f32)) * weight;
    }
    for px in row.iter_mut().take(i1).skip(i0 + 1) {
        *px += weight;
    }
    if let Some(px) = row.get_mut(i1) {
        *px += (x1 - i1 as f32) * weight;
    }
}

fn to_bitmap(width: u32, height: u32, coverage: &[f32]) -> CoverageBitmap {
    let data = coverage
        .iter()
        .map(|&c| c.round().clamp(0.0, 255.0) as u8)
        .collect();
    CoverageBitmap::from_data(width, height, data)
        .unwrap_or_else(|| CoverageBitmap::new(width, height))
}
