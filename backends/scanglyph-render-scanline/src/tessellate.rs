// this_file: backends/scanglyph-render-scanline/src/tessellate.rs

//! Turning on/off-curve point soup into closed polylines
//!
//! TrueType only stores the points you can't infer. Two off-curve points in a
//! row hide an on-curve point at their midpoint, and every off-curve point is
//! the control of a quadratic curve. The tessellator puts the hidden points
//! back and flattens each curve into a fixed number of straight steps, so the
//! same outline always produces exactly the same polyline.

use scanglyph_core::config::{DEFAULT_CURVE_SUBDIVISIONS, MAX_SAMPLING_COUNT};
use scanglyph_core::Point2F;
use scanglyph_sfnt::GlyphOutline;

/// Flattened contours in font units
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tessellation {
    pub points: Vec<Point2F>,
    /// Cumulative point count after each contour is closed
    pub contour_ends: Vec<usize>,
}

impl Tessellation {
    /// Each contour as its own slice of points
    pub fn contours(&self) -> impl Iterator<Item = &[Point2F]> + '_ {
        let mut start = 0;
        self.contour_ends.iter().map(move |&end| {
            let contour = self.points.get(start..end).unwrap_or(&[]);
            start = end;
            contour
        })
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Flattens quadratic outlines with a fixed subdivision count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tessellator {
    subdivisions: u32,
}

impl Default for Tessellator {
    fn default() -> Self {
        Self::new(DEFAULT_CURVE_SUBDIVISIONS)
    }
}

impl Tessellator {
    /// Clamped to `1..=MAX_SAMPLING_COUNT`
    pub fn new(subdivisions: u32) -> Self {
        Self {
            subdivisions: subdivisions.clamp(1, MAX_SAMPLING_COUNT),
        }
    }

    pub fn subdivisions(&self) -> u32 {
        self.subdivisions
    }

    pub fn tessellate(&self, outline: &GlyphOutline) -> Tessellation {
        let mut out = Tessellation {
            points: Vec::with_capacity(outline.num_points() * (self.subdivisions as usize + 1)),
            contour_ends: Vec::with_capacity(outline.num_contours()),
        };

        for range in outline.contours() {
            let raw: Vec<(Point2F, bool)> = range
                .filter_map(|i| outline.point(i))
                .map(|(x, y, on)| (Point2F::from((x, y)), on))
                .collect();
            self.tessellate_contour(&raw, &mut out.points);
            out.contour_ends.push(out.points.len());
        }

        out
    }

    /// Append one closed contour to `out`
    pub fn tessellate_contour(&self, raw: &[(Point2F, bool)], out: &mut Vec<Point2F>) {
        let n = raw.len();
        let Some(&(first_raw, first_on)) = raw.first() else {
            return;
        };
        let start = out.len();
        let started_off = !first_on;

        let mut i = 0;
        while i < n {
            let (p, on) = raw[i];
            let (next, next_on) = raw[(i + 1) % n];

            if on {
                out.push(p);
                i += 1;
            } else if i == 0 {
                if next_on {
                    out.push(next);
                    i += 2;
                } else {
                    out.push(p.midpoint(next));
                    i += 1;
                }
            } else {
                let end = if next_on {
                    i += 2;
                    next
                } else {
                    i += 1;
                    p.midpoint(next)
                };
                let from = out.last().copied().unwrap_or(p);
                self.push_quadratic(from, p, end, out);
            }
        }

        let (Some(&first), Some(&last)) = (out.get(start), out.last()) else {
            return;
        };
        if started_off {
            self.push_quadratic(last, first_raw, first, out);
        } else if last != first {
            out.push(first);
        }
    }

    /// Append the curve's samples at t = i/n for i in 1..=n
    fn push_quadratic(&self, p0: Point2F, p1: Point2F, p2: Point2F, out: &mut Vec<Point2F>) {
        let n = self.subdivisions;
        out.extend((1..=n).map(|i| quadratic_at(p0, p1, p2, i as f32 / n as f32)));
    }
}

/// `(1-t)²·p0 + 2(1-t)t·p1 + t²·p2`
#[inline]
pub fn quadratic_at(p0: Point2F, p1: Point2F, p2: Point2F, t: f32) -> Point2F {
    let mt = 1.0 - t;
    let a = mt * mt;
    let b = 2.0 * mt * t;
    let c = t * t;
    Point2F::new(
        a * p0.x + b * p1.x + c * p2.x,
        a * p0.y + b * p1.y + c * p2.y,
    )
}
