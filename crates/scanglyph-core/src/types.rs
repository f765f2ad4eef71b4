//! The data structures shared by every stage
//!
//! Outlines leave the parser in font units, get flattened into [`Point2F`]
//! polylines, and end up as a [`CoverageBitmap`] that a caller blits onto
//! whatever surface it owns.

/// A point in floating-point font units or pixel space
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point2F {
    pub x: f32,
    pub y: f32,
}

impl Point2F {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Halfway between two points
    pub fn midpoint(self, other: Point2F) -> Point2F {
        Point2F {
            x: self.x + (other.x - self.x) / 2.0,
            y: self.y + (other.y - self.y) / 2.0,
        }
    }
}

impl From<(i32, i32)> for Point2F {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

/// Per-pixel glyph coverage, 0 = untouched, 255 = fully inside
///
/// Rows are stored top-down; `data[y * width + x]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CoverageBitmap {
    /// An all-zero bitmap
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Wrap existing coverage values; `None` when the length doesn't match
    pub fn from_data(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Coverage at `(x, y)`, or `None` outside the bitmap
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get((y * self.width + x) as usize).copied()
    }

    /// One row of coverage values; empty past the last row
    pub fn row(&self, y: u32) -> &[u8] {
        let start = y as usize * self.width as usize;
        self.data
            .get(start..start + self.width as usize)
            .unwrap_or(&[])
    }

    /// Number of pixels with non-zero coverage
    pub fn covered_pixels(&self) -> usize {
        self.data.iter().filter(|&&c| c != 0).count()
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|&c| c == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_halfway() {
        let m = Point2F::new(0.0, 10.0).midpoint(Point2F::new(4.0, -2.0));
        assert_eq!(m, Point2F::new(2.0, 4.0));
    }

    #[test]
    fn bitmap_indexing_is_row_major() {
        let mut data = vec![0u8; 6];
        data[4] = 200; // x = 1, y = 1
        let bitmap = CoverageBitmap::from_data(3, 2, data).unwrap();
        assert_eq!(bitmap.get(1, 1), Some(200));
        assert_eq!(bitmap.get(3, 0), None);
        assert_eq!(bitmap.row(1), &[0, 200, 0]);
        assert_eq!(bitmap.covered_pixels(), 1);
    }

    #[test]
    fn from_data_rejects_wrong_length() {
        assert!(CoverageBitmap::from_data(2, 2, vec![0; 3]).is_none());
        assert!(CoverageBitmap::new(4, 4).is_blank());
    }
}
