// this_file: backends/scanglyph-render-scanline/src/edge.rs

//! The edge list: polylines broken into the segments a scanline can cross
//!
//! Contours come out of the tessellator already closed, with the first point
//! repeated at the end. Only consecutive pairs inside one contour become
//! edges; a segment from the last point back to the first would just be a
//! zero-length duplicate.

use scanglyph_core::Point2F;

use crate::tessellate::Tessellation;

/// A directed segment in pixel space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub p0: Point2F,
    pub p1: Point2F,
}

impl Edge {
    pub fn new(p0: Point2F, p1: Point2F) -> Self {
        Self { p0, p1 }
    }

    #[inline]
    pub fn is_horizontal(&self) -> bool {
        self.p0.y == self.p1.y
    }

    /// X where this edge crosses scanline `y`, if the edge spans it
    ///
    /// The top end is included and the bottom end is not, so two edges
    /// meeting at a vertex never both report it.
    #[inline]
    pub fn intersect(&self, y: f32) -> Option<f32> {
        if self.is_horizontal() {
            return None;
        }
        let (min_y, max_y) = if self.p0.y < self.p1.y {
            (self.p0.y, self.p1.y)
        } else {
            (self.p1.y, self.p0.y)
        };
        if y < min_y || y >= max_y {
            return None;
        }

        let dx = self.p1.x - self.p0.x;
        if dx == 0.0 {
            return Some(self.p0.x);
        }
        let t = (y - self.p0.y) / (self.p1.y - self.p0.y);
        Some(self.p0.x + t * dx)
    }
}

/// Every edge of one glyph
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeList {
    edges: Vec<Edge>,
}

impl EdgeList {
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            edges: Vec::with_capacity(capacity),
        }
    }

    /// Edges from every contour, each point mapped through `to_pixel`
    pub fn from_tessellation(
        tessellation: &Tessellation,
        to_pixel: impl Fn(Point2F) -> Point2F,
    ) -> Self {
        let mut list = Self::with_capacity(tessellation.points.len());
        for contour in tessellation.contours() {
            for pair in contour.windows(2) {
                list.push(Edge::new(to_pixel(pair[0]), to_pixel(pair[1])));
            }
        }
        list
    }

    #[inline]
    pub fn push(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Edge] {
        &self.edges
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edge> {
        self.edges.iter()
    }

    /// Lowest and highest y touched by any edge
    pub fn y_bounds(&self) -> Option<(f32, f32)> {
        self.edges
            .iter()
            .flat_map(|e| [e.p0.y, e.p1.y])
            .fold(None, |acc, y| match acc {
                None => Some((y, y)),
                Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            })
    }
}

impl<'a> IntoIterator for &'a EdgeList {
    type Item = &'a Edge;
    type IntoIter = std::slice::Iter<'a, Edge>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.iter()
    }
}
