//! Scanglyph SFNT: just enough TrueType to find and decode simple glyphs
//!
//! No font-parsing crate here. This reads the table directory, `head`,
//! `OS/2`, `loca`, `glyf` and a format 4 `cmap` straight from the bytes,
//! with every read bounds-checked.
//!
//! ```ignore
//! let tables = FontTables::parse(&data)?;
//! let gid = tables.cmap.as_ref().map_or(0, |c| c.resolve('A' as u32));
//! let outline = decode_outline(
//!     tables.glyf.slice(&data),
//!     tables.loca.slice(&data),
//!     tables.loca_format,
//!     gid,
//! )?;
//! ```

pub mod cmap;
pub mod glyf;
pub mod reader;
pub mod tables;

#[cfg(any(test, feature = "synth"))]
pub mod synth;

pub use cmap::{parse_cmap, CmapFormat4, CmapSegment4};
pub use glyf::{
    decode_coordinates, decode_outline, glyph_range, Axis, BoundingBox, CoordEncoding,
    GlyphFlag, GlyphOutline, LocaFormat,
};
pub use reader::{ByteReader, ReadResult};
pub use tables::{FontTables, HeadTable, Os2Table, TableRange, TableRecord, Tag};

#[cfg(any(test, feature = "synth"))]
pub use synth::FontBuilder;
