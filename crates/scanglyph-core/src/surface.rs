//! A grayscale canvas for tests, tools and headless rendering

use std::io::Write;

use crate::error::{RenderError, Result};
use crate::traits::PixelSurface;

/// Largest canvas side we agree to allocate
const MAX_CANVAS_SIDE: u32 = 16_384;

/// An 8-bit grayscale surface that records the coverage written to it
#[derive(Debug, Clone)]
pub struct GrayCanvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    writes: usize,
}

impl GrayCanvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_CANVAS_SIDE || height > MAX_CANVAS_SIDE {
            return Err(RenderError::InvalidDimensions { width, height }.into());
        }

        Ok(Self {
            width,
            height,
            pixels: vec![0; width as usize * height as usize],
            writes: 0,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[(y * self.width + x) as usize])
    }

    /// How many `set_pixel` calls landed, including clipped ones
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Binary PGM (P5) encoding of the canvas
    pub fn to_pgm(&self) -> Result<Vec<u8>> {
        let mut output = Vec::with_capacity(self.pixels.len() + 32);
        writeln!(&mut output, "P5")?;
        writeln!(&mut output, "{} {}", self.width, self.height)?;
        writeln!(&mut output, "255")?;
        output.extend_from_slice(&self.pixels);
        Ok(output)
    }

    /// Coarse text preview, one character per pixel
    pub fn to_ascii(&self) -> String {
        const RAMP: &[u8] = b" .:-=+*#%@";
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in self.pixels.chunks_exact(self.width as usize) {
            for &c in row {
                let idx = c as usize * (RAMP.len() - 1) / 255;
                out.push(RAMP[idx] as char);
            }
            out.push('\n');
        }
        out
    }
}

impl PixelSurface for GrayCanvas {
    fn set_pixel(&mut self, x: i32, y: i32, coverage: u8) {
        self.writes += 1;
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let idx = (y as u32 * self.width + x as u32) as usize;
        // Overlapping glyphs keep the darker ink
        self.pixels[idx] = self.pixels[idx].max(coverage);
    }
}
