// this_file: crates/scanglyph-sfnt/src/tables.rs

//! The sfnt container: offset subtable, table directory, `head` and `OS/2`.
//!
//! Tables are remembered as byte ranges into the font buffer, never as
//! borrowed slices, so a [`FontTables`] can live next to the `Vec<u8>` it
//! describes without tying the two together with a lifetime.

use std::ops::Range;

use scanglyph_core::FontFormatError;

use crate::cmap::{parse_cmap, CmapFormat4};
use crate::glyf::LocaFormat;
use crate::reader::{ByteReader, ReadResult};

/// TrueType outlines, the Microsoft/Adobe flavor
pub const SCALER_TRUETYPE: u32 = 0x0001_0000;
/// TrueType outlines, the Apple flavor (`'true'`)
pub const SCALER_APPLE_TRUE: u32 = 0x7472_7565;

/// A 4-byte table tag
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag(pub [u8; 4]);

impl Tag {
    pub const HEAD: Self = Self(*b"head");
    pub const OS2: Self = Self(*b"OS/2");
    pub const LOCA: Self = Self(*b"loca");
    pub const GLYF: Self = Self(*b"glyf");
    pub const CMAP: Self = Self(*b"cmap");

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl std::fmt::Debug for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag('{}')", self.as_str())
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The first 12 bytes of the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetSubtable {
    pub scaler_type: u32,
    pub num_tables: u16,
    pub search_range: u16,
    pub entry_selector: u16,
    pub range_shift: u16,
}

impl OffsetSubtable {
    pub fn parse(r: &mut ByteReader<'_>) -> ReadResult<Self> {
        Ok(Self {
            scaler_type: r.read_u32()?,
            num_tables: r.read_u16()?,
            search_range: r.read_u16()?,
            entry_selector: r.read_u16()?,
            range_shift: r.read_u16()?,
        })
    }
}

/// One table directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: Tag,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    pub fn parse(r: &mut ByteReader<'_>) -> ReadResult<Self> {
        Ok(Self {
            tag: Tag(r.read_tag()?),
            checksum: r.read_u32()?,
            offset: r.read_u32()?,
            length: r.read_u32()?,
        })
    }

    /// The table's bytes as a range, checked against the file length
    pub fn range(&self, file_len: usize) -> ReadResult<TableRange> {
        let start = self.offset as usize;
        let end = start.checked_add(self.length as usize);
        match end {
            Some(end) if end <= file_len => Ok(TableRange { start, end }),
            _ => Err(FontFormatError::TableOutOfBounds {
                tag: self.tag.to_string(),
                offset: self.offset,
                length: self.length,
            }),
        }
    }
}

/// A validated byte range inside the font buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TableRange {
    pub start: usize,
    pub end: usize,
}

impl TableRange {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn as_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// The table's bytes; empty if `data` is not the buffer this came from
    pub fn slice<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        data.get(self.as_range()).unwrap_or(&[])
    }
}

/// The parts of `head` the rasterizer needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeadTable {
    pub flags: u16,
    pub units_per_em: u16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub mac_style: u16,
    pub index_to_loc_format: i16,
}

impl HeadTable {
    pub fn parse(data: &[u8]) -> ReadResult<Self> {
        let mut r = ByteReader::new(data, "head");
        let _major_version = r.read_u16()?;
        let _minor_version = r.read_u16()?;
        let _font_revision = r.read_u32()?;
        let _checksum_adjustment = r.read_u32()?;
        let _magic = r.read_u32()?;
        let flags = r.read_u16()?;
        let units_per_em = r.read_u16()?;
        r.skip(16)?; // created + modified
        let x_min = r.read_i16()?;
        let y_min = r.read_i16()?;
        let x_max = r.read_i16()?;
        let y_max = r.read_i16()?;
        let mac_style = r.read_u16()?;
        let _lowest_rec_ppem = r.read_u16()?;
        let _font_direction_hint = r.read_i16()?;
        let index_to_loc_format = r.read_i16()?;

        if units_per_em == 0 {
            return Err(FontFormatError::InvalidValue("head.unitsPerEm is zero"));
        }

        Ok(Self {
            flags,
            units_per_em,
            x_min,
            y_min,
            x_max,
            y_max,
            mac_style,
            index_to_loc_format,
        })
    }

    pub fn loca_format(&self) -> ReadResult<LocaFormat> {
        LocaFormat::from_index_to_loc_format(self.index_to_loc_format)
    }
}

/// Vertical metrics from `OS/2`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Os2Table {
    pub version: u16,
    pub typo_ascender: i16,
    pub typo_descender: i16,
    pub typo_line_gap: i16,
    pub win_ascent: u16,
    pub win_descent: u16,
}

impl Os2Table {
    /// Byte offset of `sTypoAscender`; every version shares this prefix
    const TYPO_ASCENDER_OFFSET: usize = 68;

    pub fn parse(data: &[u8]) -> ReadResult<Self> {
        let mut r = ByteReader::new(data, "OS/2");
        let version = r.read_u16()?;
        r.set_position(Self::TYPO_ASCENDER_OFFSET)?;
        Ok(Self {
            version,
            typo_ascender: r.read_i16()?,
            typo_descender: r.read_i16()?,
            typo_line_gap: r.read_i16()?,
            win_ascent: r.read_u16()?,
            win_descent: r.read_u16()?,
        })
    }
}

/// Everything the loader pulls out of the table directory
#[derive(Debug, Clone)]
pub struct FontTables {
    pub offset_subtable: OffsetSubtable,
    pub records: Vec<TableRecord>,
    pub head: HeadTable,
    pub os2: Os2Table,
    pub loca_format: LocaFormat,
    pub loca: TableRange,
    pub glyf: TableRange,
    /// `None` when the cmap is absent or unusable; lookups then all miss
    pub cmap: Option<CmapFormat4>,
}

impl FontTables {
    /// Walk the directory and capture every table the rasterizer uses
    pub fn parse(data: &[u8]) -> ReadResult<Self> {
        let mut r = ByteReader::new(data, "table directory");
        let offset_subtable = OffsetSubtable::parse(&mut r)?;

        if !matches!(
            offset_subtable.scaler_type,
            SCALER_TRUETYPE | SCALER_APPLE_TRUE
        ) {
            return Err(FontFormatError::UnsupportedScaler(offset_subtable.scaler_type));
        }

        let mut records = Vec::with_capacity(offset_subtable.num_tables as usize);
        let mut head = None;
        let mut os2 = None;
        let mut loca = None;
        let mut glyf = None;
        let mut cmap = None;

        for _ in 0..offset_subtable.num_tables {
            let record = TableRecord::parse(&mut r)?;
            let range = record.range(data.len())?;
            log::debug!(
                "Table '{}' at {} ({} bytes)",
                record.tag,
                record.offset,
                record.length
            );

            match record.tag {
                Tag::HEAD => head = Some(range),
                Tag::OS2 => os2 = Some(range),
                Tag::LOCA => loca = Some(range),
                Tag::GLYF => glyf = Some(range),
                Tag::CMAP => {
                    cmap = match parse_cmap(range.slice(data)) {
                        Ok(table) => Some(table),
                        Err(e) => {
                            log::warn!("Ignoring unusable cmap, no characters will resolve: {}", e);
                            None
                        },
                    };
                },
                _ => {},
            }

            records.push(record);
        }

        let head = head.ok_or(FontFormatError::MissingTable("head"))?;
        let os2 = os2.ok_or(FontFormatError::MissingTable("OS/2"))?;
        let loca = loca.ok_or(FontFormatError::MissingTable("loca"))?;
        let glyf = glyf.ok_or(FontFormatError::MissingTable("glyf"))?;

        let head = HeadTable::parse(head.slice(data))?;
        let os2 = Os2Table::parse(os2.slice(data))?;
        let loca_format = head.loca_format()?;

        Ok(Self {
            offset_subtable,
            records,
            head,
            os2,
            loca_format,
            loca,
            glyf,
            cmap,
        })
    }

    pub fn find(&self, tag: Tag) -> Option<&TableRecord> {
        self.records.iter().find(|t| t.tag == tag)
    }
}
