// this_file: crates/scanglyph-sfnt/src/glyf.rs

//! Simple glyph outlines from `loca` + `glyf`.
//!
//! A glyph record is a header, the contour end points, hinting instructions
//! (kept but never run), run-length packed flags and then two delta-encoded
//! coordinate streams. Decoding undoes all of that and hands back absolute
//! font-unit points.

use std::ops::Range;

use scanglyph_core::{FontFormatError, GeometryError, Result};

use crate::reader::{read_u16_at, read_u32_at, ByteReader, ReadResult};

/// Width of `loca` entries, from `head.indexToLocFormat`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaFormat {
    /// u16 entries holding offset / 2
    Short,
    /// u32 entries holding the offset
    Long,
}

impl LocaFormat {
    pub fn from_index_to_loc_format(value: i16) -> ReadResult<Self> {
        match value {
            0 => Ok(Self::Short),
            1 => Ok(Self::Long),
            _ => Err(FontFormatError::InvalidValue("head.indexToLocFormat is not 0 or 1")),
        }
    }

    fn offset(self, loca: &[u8], index: usize) -> Option<usize> {
        match self {
            Self::Short => read_u16_at(loca, index * 2).map(|v| v as usize * 2),
            Self::Long => read_u32_at(loca, index * 4).map(|v| v as usize),
        }
    }
}

/// Byte range of one glyph inside `glyf`; empty for outline-less glyphs
pub fn glyph_range(loca: &[u8], format: LocaFormat, glyph: u16) -> ReadResult<Range<usize>> {
    let index = glyph as usize;
    let eof = |offset| FontFormatError::UnexpectedEof {
        context: "loca",
        offset,
    };
    let start = format.offset(loca, index).ok_or_else(|| eof(index))?;
    let end = format.offset(loca, index + 1).ok_or_else(|| eof(index + 1))?;
    if end < start {
        return Err(FontFormatError::InvalidValue("loca offsets decrease"));
    }
    Ok(start..end)
}

/// One outline flag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlyphFlag(pub u8);

impl GlyphFlag {
    pub const ON_CURVE: u8 = 0x01;
    pub const X_SHORT: u8 = 0x02;
    pub const Y_SHORT: u8 = 0x04;
    pub const REPEAT: u8 = 0x08;
    pub const X_SAME_OR_POSITIVE: u8 = 0x10;
    pub const Y_SAME_OR_POSITIVE: u8 = 0x20;

    #[inline]
    pub fn on_curve(self) -> bool {
        self.0 & Self::ON_CURVE != 0
    }

    #[inline]
    pub fn repeats(self) -> bool {
        self.0 & Self::REPEAT != 0
    }

    #[inline]
    pub fn encoding(self, axis: Axis) -> CoordEncoding {
        let (short, same) = match axis {
            Axis::X => (Self::X_SHORT, Self::X_SAME_OR_POSITIVE),
            Axis::Y => (Self::Y_SHORT, Self::Y_SAME_OR_POSITIVE),
        };
        match (self.0 & short != 0, self.0 & same != 0) {
            (false, false) => CoordEncoding::Word,
            (false, true) => CoordEncoding::Same,
            (true, false) => CoordEncoding::NegativeByte,
            (true, true) => CoordEncoding::PositiveByte,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// How one coordinate delta is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordEncoding {
    /// Signed 16-bit delta
    Word,
    /// No bytes; the delta is zero
    Same,
    /// One byte, negated
    NegativeByte,
    /// One byte
    PositiveByte,
}

/// Glyph bounding box in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoundingBox {
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
}

/// A decoded simple glyph
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphOutline {
    pub glyph_id: u16,
    pub bbox: BoundingBox,
    /// Index of the last point of each contour, strictly increasing
    pub end_points: Vec<u16>,
    pub instructions: Vec<u8>,
    pub flags: Vec<GlyphFlag>,
    /// Absolute coordinates; i32 so summed deltas cannot wrap
    pub xs: Vec<i32>,
    pub ys: Vec<i32>,
}

impl GlyphOutline {
    pub fn num_contours(&self) -> usize {
        self.end_points.len()
    }

    pub fn num_points(&self) -> usize {
        self.flags.len()
    }

    /// `(x, y, on_curve)` for point `i`
    pub fn point(&self, i: usize) -> Option<(i32, i32, bool)> {
        Some((*self.xs.get(i)?, *self.ys.get(i)?, self.flags.get(i)?.on_curve()))
    }

    /// Point index ranges, one per contour
    pub fn contours(&self) -> impl Iterator<Item = Range<usize>> + '_ {
        let mut start = 0usize;
        self.end_points.iter().map(move |&end| {
            let range = start..end as usize + 1;
            start = range.end;
            range
        })
    }
}

/// Accumulate one axis worth of deltas into absolute coordinates
pub fn decode_coordinates(
    r: &mut ByteReader<'_>,
    flags: &[GlyphFlag],
    axis: Axis,
) -> ReadResult<Vec<i32>> {
    let mut value = 0i32;
    flags
        .iter()
        .map(|flag| {
            let delta = match flag.encoding(axis) {
                CoordEncoding::Word => r.read_i16()? as i32,
                CoordEncoding::Same => 0,
                CoordEncoding::NegativeByte => -(r.read_u8()? as i32),
                CoordEncoding::PositiveByte => r.read_u8()? as i32,
            };
            value += delta;
            Ok(value)
        })
        .collect()
}

/// Decode glyph `glyph` from the `glyf` and `loca` table bytes
pub fn decode_outline(
    glyf: &[u8],
    loca: &[u8],
    format: LocaFormat,
    glyph: u16,
) -> Result<GlyphOutline> {
    let range = glyph_range(loca, format, glyph)?;
    if range.is_empty() {
        return Err(GeometryError::Empty(glyph).into());
    }
    let record = glyf.get(range.clone()).ok_or(FontFormatError::UnexpectedEof {
        context: "glyf",
        offset: range.end,
    })?;
    let mut r = ByteReader::new(record, "glyf");

    let num_contours = r.read_i16()?;
    if num_contours < 0 {
        return Err(GeometryError::Composite(glyph).into());
    }
    if num_contours == 0 {
        return Err(GeometryError::Empty(glyph).into());
    }

    let bbox = BoundingBox {
        x_min: r.read_i16()?,
        y_min: r.read_i16()?,
        x_max: r.read_i16()?,
        y_max: r.read_i16()?,
    };

    let mut end_points = Vec::with_capacity(num_contours as usize);
    for contour in 0..num_contours as usize {
        let end = r.read_u16()?;
        if end_points.last().is_some_and(|&prev| end <= prev) {
            return Err(GeometryError::NonIncreasingEndPoints { glyph, contour }.into());
        }
        end_points.push(end);
    }
    let num_points = end_points.last().map_or(0, |&e| e as usize + 1);

    let instruction_len = r.read_u16()? as usize;
    let instructions = r.bytes(instruction_len)?.to_vec();

    let mut flags = Vec::with_capacity(num_points);
    while flags.len() < num_points {
        let flag = GlyphFlag(r.read_u8()?);
        flags.push(flag);
        if flag.repeats() {
            let count = r.read_u8()? as usize;
            if flags.len() + count > num_points {
                return Err(GeometryError::FlagOverflow {
                    glyph,
                    points: num_points,
                }
                .into());
            }
            flags.extend(std::iter::repeat(flag).take(count));
        }
    }

    let xs = decode_coordinates(&mut r, &flags, Axis::X)?;
    let ys = decode_coordinates(&mut r, &flags, Axis::Y)?;

    log::trace!(
        "Decoded glyph {}: {} contours, {} points",
        glyph,
        end_points.len(),
        num_points
    );

    Ok(GlyphOutline {
        glyph_id: glyph,
        bbox,
        end_points,
        instructions,
        flags,
        xs,
        ys,
    })
}
