// this_file: crates/scanglyph-sfnt/src/cmap.rs

//! Character to glyph mapping, format 4 only.
//!
//! The first encoding subtable is used whatever its platform. Anything other
//! than a segment-mapped format 4 subtable is reported as an error and the
//! loader carries on without a cmap.

use scanglyph_core::FontFormatError;

use crate::reader::{ByteReader, ReadResult};

/// The 4-byte cmap header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmapHeader {
    pub version: u16,
    pub num_subtables: u16,
}

/// Where one encoding's subtable lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingRecord {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub offset: u32,
}

/// One contiguous run of codepoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CmapSegment4 {
    pub start_code: u16,
    pub end_code: u16,
    pub id_delta: i16,
    /// Byte offset from this segment's own idRangeOffset slot, or 0
    pub id_range_offset: u16,
}

impl CmapSegment4 {
    pub fn contains(&self, cp: u16) -> bool {
        self.start_code <= cp && cp <= self.end_code
    }
}

/// A parsed format 4 subtable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmapFormat4 {
    pub language: u16,
    segments: Vec<CmapSegment4>,
    glyph_ids: Vec<u16>,
}

impl CmapFormat4 {
    /// Build from already-decoded arrays; segments must be sorted by end code
    pub fn from_segments(segments: Vec<CmapSegment4>, glyph_ids: Vec<u16>) -> ReadResult<Self> {
        if segments.windows(2).any(|w| w[0].end_code >= w[1].end_code) {
            return Err(FontFormatError::InvalidValue(
                "cmap segments are not sorted by end code",
            ));
        }
        Ok(Self {
            language: 0,
            segments,
            glyph_ids,
        })
    }

    /// Parse a format 4 subtable starting at the beginning of `data`
    pub fn parse(data: &[u8]) -> ReadResult<Self> {
        let mut r = ByteReader::new(data, "cmap format 4");
        let format = r.read_u16()?;
        if format != 4 {
            return Err(FontFormatError::UnsupportedCmapFormat(format));
        }
        let length = r.read_u16()? as usize;
        let language = r.read_u16()?;
        let seg_count_x2 = r.read_u16()?;
        if seg_count_x2 % 2 != 0 {
            return Err(FontFormatError::InvalidValue("cmap segCountX2 is odd"));
        }
        let seg_count = (seg_count_x2 / 2) as usize;
        let _search_range = r.read_u16()?;
        let _entry_selector = r.read_u16()?;
        let _range_shift = r.read_u16()?;

        // The declared length bounds the rest of the subtable
        let body = data.get(..length).ok_or(FontFormatError::UnexpectedEof {
            context: "cmap format 4",
            offset: data.len(),
        })?;
        let mut r = ByteReader::at(body, r.position(), "cmap format 4");

        let end_codes = read_u16_array(&mut r, seg_count)?;
        let _reserved_pad = r.read_u16()?;
        let start_codes = read_u16_array(&mut r, seg_count)?;
        let id_deltas = read_u16_array(&mut r, seg_count)?;
        let id_range_offsets = read_u16_array(&mut r, seg_count)?;
        let glyph_id_count = r.remaining() / 2;
        let glyph_ids = read_u16_array(&mut r, glyph_id_count)?;

        let segments = end_codes
            .iter()
            .zip(&start_codes)
            .zip(id_deltas.iter().zip(&id_range_offsets))
            .map(|((&end_code, &start_code), (&id_delta, &id_range_offset))| CmapSegment4 {
                start_code,
                end_code,
                id_delta: id_delta as i16,
                id_range_offset,
            })
            .collect();

        let mut table = Self::from_segments(segments, glyph_ids)?;
        table.language = language;
        Ok(table)
    }

    pub fn segments(&self) -> &[CmapSegment4] {
        &self.segments
    }

    pub fn glyph_ids(&self) -> &[u16] {
        &self.glyph_ids
    }

    /// Glyph index for a codepoint; 0 means "not mapped"
    pub fn resolve(&self, codepoint: u32) -> u16 {
        let Ok(cp) = u16::try_from(codepoint) else {
            return 0;
        };

        let i = self.segments.partition_point(|s| s.end_code < cp);
        let Some(seg) = self.segments.get(i) else {
            return 0;
        };
        if !seg.contains(cp) {
            return 0;
        }

        if seg.id_range_offset == 0 {
            return cp.wrapping_add(seg.id_delta as u16);
        }

        // idRangeOffset counts bytes from its own slot in the offsets array.
        // The glyph array starts right after that array, seg_count slots on.
        let word = i + (seg.id_range_offset / 2) as usize + (cp - seg.start_code) as usize;
        let glyph = word
            .checked_sub(self.segments.len())
            .and_then(|idx| self.glyph_ids.get(idx))
            .copied()
            .unwrap_or(0);

        if glyph == 0 {
            0
        } else {
            glyph.wrapping_add(seg.id_delta as u16)
        }
    }
}

fn read_u16_array(r: &mut ByteReader<'_>, n: usize) -> ReadResult<Vec<u16>> {
    (0..n).map(|_| r.read_u16()).collect()
}

/// Parse the cmap table and decode its first subtable
pub fn parse_cmap(data: &[u8]) -> ReadResult<CmapFormat4> {
    let mut r = ByteReader::new(data, "cmap");
    let header = CmapHeader {
        version: r.read_u16()?,
        num_subtables: r.read_u16()?,
    };

    let mut records = Vec::with_capacity(header.num_subtables as usize);
    for _ in 0..header.num_subtables {
        records.push(EncodingRecord {
            platform_id: r.read_u16()?,
            encoding_id: r.read_u16()?,
            offset: r.read_u32()?,
        });
    }

    let first = records
        .first()
        .ok_or(FontFormatError::InvalidValue("cmap has no encoding subtables"))?;
    log::debug!(
        "Using cmap subtable platform {} encoding {} of {}",
        first.platform_id,
        first.encoding_id,
        records.len()
    );

    let subtable = data
        .get(first.offset as usize..)
        .ok_or(FontFormatError::UnexpectedEof {
            context: "cmap",
            offset: first.offset as usize,
        })?;
    CmapFormat4::parse(subtable)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(start_code: u16, end_code: u16, id_delta: i16) -> CmapSegment4 {
        CmapSegment4 {
            start_code,
            end_code,
            id_delta,
            id_range_offset: 0,
        }
    }

    fn uppercase_table() -> CmapFormat4 {
        CmapFormat4::from_segments(
            vec![seg(0x41, 0x5A, 1 - 0x41), seg(0xFFFF, 0xFFFF, 1)],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn resolves_identity_segment() {
        let table = CmapFormat4::from_segments(vec![seg(65, 90, 0)], vec![]).unwrap();
        assert_eq!(table.resolve('A' as u32), 65);
        assert_eq!(table.resolve('Z' as u32), 90);
        assert_eq!(table.resolve(64), 0);
        assert_eq!(table.resolve(91), 0);
    }

    #[test]
    fn resolves_inclusive_range() {
        let table = uppercase_table();
        assert_eq!(table.resolve(65), 1);
        assert_eq!(table.resolve(90), 26);
        assert_eq!(table.resolve(64), 0);
        assert_eq!(table.resolve(91), 0);
    }

    #[test]
    fn sentinel_and_out_of_range_codepoints() {
        let table = uppercase_table();
        assert_eq!(table.resolve(0xFFFF), 0);
        assert_eq!(table.resolve(0x1F600), 0);
    }

    #[test]
    fn range_offset_reads_glyph_array() {
        // Two segments, so the glyph array starts two slots after slot 0.
        let table = CmapFormat4::from_segments(
            vec![
                CmapSegment4 {
                    start_code: 0x30,
                    end_code: 0x32,
                    id_delta: 0,
                    id_range_offset: 4,
                },
                seg(0xFFFF, 0xFFFF, 1),
            ],
            vec![7, 0, 9],
        )
        .unwrap();

        assert_eq!(table.resolve(0x30), 7);
        assert_eq!(table.resolve(0x31), 0);
        assert_eq!(table.resolve(0x32), 9);
    }

    #[test]
    fn delta_applies_to_nonzero_array_values() {
        let table = CmapFormat4::from_segments(
            vec![
                CmapSegment4 {
                    start_code: 0x61,
                    end_code: 0x61,
                    id_delta: 10,
                    id_range_offset: 4,
                },
                seg(0xFFFF, 0xFFFF, 1),
            ],
            vec![5],
        )
        .unwrap();
        assert_eq!(table.resolve(0x61), 15);
    }

    #[test]
    fn unsorted_segments_are_rejected() {
        let result = CmapFormat4::from_segments(vec![seg(0x61, 0x7A, 0), seg(0x41, 0x5A, 0)], vec![]);
        assert!(matches!(result, Err(FontFormatError::InvalidValue(_))));
    }

    #[test]
    fn parses_raw_subtable() {
        let mut data = Vec::new();
        let push = |data: &mut Vec<u8>, v: u16| data.extend_from_slice(&v.to_be_bytes());
        // cmap header + one encoding record
        push(&mut data, 0);
        push(&mut data, 1);
        push(&mut data, 3);
        push(&mut data, 1);
        data.extend_from_slice(&12u32.to_be_bytes());
        // format 4, 2 segments, no glyph array
        for v in [4u16, 32, 0, 4, 4, 1, 0] {
            push(&mut data, v);
        }
        for v in [0x5Au16, 0xFFFF, 0, 0x41, 0xFFFF] {
            push(&mut data, v);
        }
        for v in [(1i16 - 0x41) as u16, 1, 0, 0] {
            push(&mut data, v);
        }

        let table = parse_cmap(&data).unwrap();
        assert_eq!(table.segments().len(), 2);
        assert_eq!(table.resolve('C' as u32), 3);
    }

    #[test]
    fn trailing_words_fill_the_glyph_array() {
        let mut data = Vec::new();
        let push = |data: &mut Vec<u8>, v: u16| data.extend_from_slice(&v.to_be_bytes());
        push(&mut data, 0);
        push(&mut data, 1);
        push(&mut data, 3);
        push(&mut data, 1);
        data.extend_from_slice(&12u32.to_be_bytes());
        // Declared length covers two glyph ids after the segment arrays
        for v in [4u16, 36, 0, 4, 4, 1, 0] {
            push(&mut data, v);
        }
        for v in [0x5Au16, 0xFFFF, 0, 0x41, 0xFFFF] {
            push(&mut data, v);
        }
        for v in [(1i16 - 0x41) as u16, 1, 0, 0, 7, 9] {
            push(&mut data, v);
        }
        // Bytes past the declared length are not part of the subtable
        push(&mut data, 11);

        let table = parse_cmap(&data).unwrap();
        assert_eq!(table.glyph_ids(), &[7, 9]);
        assert_eq!(table.resolve('A' as u32), 1);
    }

    #[test]
    fn other_formats_are_reported() {
        let mut data = vec![0, 0, 0, 1, 0, 3, 0, 1, 0, 0, 0, 12];
        data.extend_from_slice(&[0, 12, 0, 0]);
        assert_eq!(
            parse_cmap(&data).unwrap_err(),
            FontFormatError::UnsupportedCmapFormat(12)
        );
    }

    #[test]
    fn truncated_subtable_is_eof() {
        let mut data = vec![0, 0, 0, 1, 0, 3, 0, 1, 0, 0, 0, 12];
        // claims 64 bytes but only the header is present
        data.extend_from_slice(&[0, 4, 0, 64, 0, 0, 0, 4, 0, 4, 0, 1, 0, 0]);
        assert!(matches!(
            parse_cmap(&data),
            Err(FontFormatError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn empty_cmap_is_invalid() {
        let data = [0u8, 0, 0, 0];
        assert!(matches!(
            parse_cmap(&data),
            Err(FontFormatError::InvalidValue(_))
        ));
    }
}
