// this_file: crates/scanglyph-sfnt/src/synth.rs

//! Build small TrueType fonts in memory.
//!
//! Tests and benches need fonts with known geometry. [`FontBuilder`] writes
//! just the tables the loader reads (`head`, `OS/2`, `loca`, `glyf`, `cmap`)
//! and lets a test leave any of them out or swap in raw bytes.

use crate::glyf::{GlyphFlag, LocaFormat};
use crate::tables::{Tag, SCALER_TRUETYPE};

/// `(x, y, on_curve)` in font units
pub type SynthPoint = (i16, i16, bool);

#[derive(Debug, Clone)]
enum GlyphData {
    Outline(Vec<Vec<SynthPoint>>),
    Raw(Vec<u8>),
}

/// An in-memory TrueType font
#[derive(Debug, Clone)]
pub struct FontBuilder {
    scaler: u32,
    units_per_em: u16,
    typo_ascender: i16,
    typo_descender: i16,
    loca_format: LocaFormat,
    cmap_format: u16,
    glyph_id_array: bool,
    glyphs: Vec<GlyphData>,
    mappings: Vec<(u16, u16)>,
    omitted: Vec<Tag>,
    raw_tables: Vec<(Tag, Vec<u8>)>,
}

impl Default for FontBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FontBuilder {
    /// 1000 units per em, ascender 800, glyph 0 empty
    pub fn new() -> Self {
        Self {
            scaler: SCALER_TRUETYPE,
            units_per_em: 1000,
            typo_ascender: 800,
            typo_descender: -200,
            loca_format: LocaFormat::Short,
            cmap_format: 4,
            glyph_id_array: false,
            glyphs: vec![GlyphData::Raw(Vec::new())],
            mappings: Vec::new(),
            omitted: Vec::new(),
            raw_tables: Vec::new(),
        }
    }

    pub fn scaler(&mut self, scaler: u32) -> &mut Self {
        self.scaler = scaler;
        self
    }

    pub fn units_per_em(&mut self, upem: u16) -> &mut Self {
        self.units_per_em = upem;
        self
    }

    pub fn typo_ascender(&mut self, ascender: i16) -> &mut Self {
        self.typo_ascender = ascender;
        self
    }

    pub fn typo_descender(&mut self, descender: i16) -> &mut Self {
        self.typo_descender = descender;
        self
    }

    pub fn long_loca(&mut self, long: bool) -> &mut Self {
        self.loca_format = if long { LocaFormat::Long } else { LocaFormat::Short };
        self
    }

    /// Write a subtable claiming this format; anything but 4 is a stub
    pub fn cmap_format(&mut self, format: u16) -> &mut Self {
        self.cmap_format = format;
        self
    }

    /// Map through glyphIdArray instead of idDelta
    pub fn glyph_id_array(&mut self, enabled: bool) -> &mut Self {
        self.glyph_id_array = enabled;
        self
    }

    pub fn omit_table(&mut self, tag: Tag) -> &mut Self {
        self.omitted.push(tag);
        self
    }

    /// Replace a generated table with exact bytes
    pub fn raw_table(&mut self, tag: Tag, bytes: Vec<u8>) -> &mut Self {
        self.raw_tables.retain(|(t, _)| *t != tag);
        self.raw_tables.push((tag, bytes));
        self
    }

    /// Add a simple glyph, returning its index
    pub fn glyph(&mut self, contours: &[&[SynthPoint]]) -> u16 {
        let contours = contours.iter().map(|c| c.to_vec()).collect();
        self.glyphs.push(GlyphData::Outline(contours));
        (self.glyphs.len() - 1) as u16
    }

    /// Add a glyph record verbatim, returning its index
    pub fn raw_glyph(&mut self, bytes: Vec<u8>) -> u16 {
        self.glyphs.push(GlyphData::Raw(bytes));
        (self.glyphs.len() - 1) as u16
    }

    /// Axis-aligned rectangle, wound clockwise in font space
    pub fn rect(&mut self, x0: i16, y0: i16, x1: i16, y1: i16) -> u16 {
        self.glyph(&[&[(x0, y0, true), (x0, y1, true), (x1, y1, true), (x1, y0, true)]])
    }

    pub fn map(&mut self, ch: char, glyph: u16) -> &mut Self {
        if let Ok(code) = u16::try_from(ch as u32) {
            self.mappings.retain(|(c, _)| *c != code);
            self.mappings.push((code, glyph));
        }
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let (glyf, loca) = self.glyf_and_loca();
        let generated = [
            (Tag::OS2, self.os2()),
            (Tag::CMAP, self.cmap()),
            (Tag::GLYF, glyf),
            (Tag::HEAD, self.head()),
            (Tag::LOCA, loca),
        ];

        let tables: Vec<(Tag, Vec<u8>)> = generated
            .into_iter()
            .filter(|(tag, _)| !self.omitted.contains(tag))
            .map(|(tag, bytes)| {
                let bytes = self
                    .raw_tables
                    .iter()
                    .find(|(t, _)| *t == tag)
                    .map_or(bytes, |(_, raw)| raw.clone());
                (tag, bytes)
            })
            .collect();

        let num_tables = tables.len() as u16;
        let entry_selector = if num_tables == 0 { 0 } else { 15 - num_tables.leading_zeros() as u16 };
        let search_range = (1u16 << entry_selector) * 16;

        let mut out = Vec::new();
        put_u32(&mut out, self.scaler);
        put_u16(&mut out, num_tables);
        put_u16(&mut out, search_range);
        put_u16(&mut out, entry_selector);
        put_u16(&mut out, (num_tables * 16).saturating_sub(search_range));

        let mut offset = 12 + 16 * tables.len();
        for (tag, bytes) in &tables {
            out.extend_from_slice(&tag.0);
            put_u32(&mut out, checksum(bytes));
            put_u32(&mut out, offset as u32);
            put_u32(&mut out, bytes.len() as u32);
            offset += padded(bytes.len());
        }
        for (_, bytes) in &tables {
            out.extend_from_slice(bytes);
            out.resize(padded(out.len()), 0);
        }
        out
    }

    fn head(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(54);
        put_u32(&mut out, 0x0001_0000);
        put_u32(&mut out, 0x0001_0000); // fontRevision
        put_u32(&mut out, 0); // checksumAdjustment
        put_u32(&mut out, 0x5F0F_3CF5);
        put_u16(&mut out, 0x000B); // flags
        put_u16(&mut out, self.units_per_em);
        out.extend_from_slice(&[0u8; 16]); // created, modified
        put_i16(&mut out, 0);
        put_i16(&mut out, self.typo_descender);
        put_i16(&mut out, self.units_per_em as i16);
        put_i16(&mut out, self.typo_ascender);
        put_u16(&mut out, 0); // macStyle
        put_u16(&mut out, 8); // lowestRecPPEM
        put_i16(&mut out, 2); // fontDirectionHint
        put_i16(&mut out, match self.loca_format {
            LocaFormat::Short => 0,
            LocaFormat::Long => 1,
        });
        put_i16(&mut out, 0); // glyphDataFormat
        out
    }

    fn os2(&self) -> Vec<u8> {
        let mut out = vec![0u8; 68]; // version 0 up to sTypoAscender
        put_i16(&mut out, self.typo_ascender);
        put_i16(&mut out, self.typo_descender);
        put_i16(&mut out, 0); // sTypoLineGap
        put_u16(&mut out, self.typo_ascender.max(0) as u16);
        put_u16(&mut out, self.typo_descender.unsigned_abs());
        out
    }

    fn glyf_and_loca(&self) -> (Vec<u8>, Vec<u8>) {
        let mut glyf = Vec::new();
        let mut offsets = vec![0usize];
        for glyph in &self.glyphs {
            match glyph {
                GlyphData::Outline(contours) => encode_glyph(contours, &mut glyf),
                GlyphData::Raw(bytes) => glyf.extend_from_slice(bytes),
            }
            glyf.resize(glyf.len() + glyf.len() % 2, 0);
            offsets.push(glyf.len());
        }

        let mut loca = Vec::new();
        for offset in offsets {
            match self.loca_format {
                LocaFormat::Short => put_u16(&mut loca, (offset / 2) as u16),
                LocaFormat::Long => put_u32(&mut loca, offset as u32),
            }
        }
        (glyf, loca)
    }

    fn cmap(&self) -> Vec<u8> {
        let mut out = Vec::new();
        put_u16(&mut out, 0);
        put_u16(&mut out, 1);
        put_u16(&mut out, 3); // Windows
        put_u16(&mut out, 1); // Unicode BMP
        put_u32(&mut out, 12);

        if self.cmap_format != 4 {
            put_u16(&mut out, self.cmap_format);
            out.extend_from_slice(&[0u8; 10]);
            return out;
        }

        let mut mappings = self.mappings.clone();
        mappings.sort_unstable();

        // Runs where both the code and the glyph step by one share a segment
        let mut runs: Vec<Vec<(u16, u16)>> = Vec::new();
        for (code, glyph) in mappings {
            match runs.last_mut() {
                Some(run)
                    if run.last().is_some_and(|&(c, g)| {
                        c.checked_add(1) == Some(code) && g.checked_add(1) == Some(glyph)
                    }) =>
                {
                    run.push((code, glyph))
                },
                _ => runs.push(vec![(code, glyph)]),
            }
        }
        runs.retain(|run| run.first().is_some_and(|&(c, _)| c != 0xFFFF));

        let seg_count = runs.len() + 1;
        let mut ends = Vec::with_capacity(seg_count);
        let mut starts = Vec::with_capacity(seg_count);
        let mut deltas = Vec::with_capacity(seg_count);
        let mut range_offsets = Vec::with_capacity(seg_count);
        let mut glyph_ids: Vec<u16> = Vec::new();

        for (i, run) in runs.iter().enumerate() {
            let (first_code, first_glyph) = run[0];
            starts.push(first_code);
            ends.push(run[run.len() - 1].0);
            if self.glyph_id_array {
                deltas.push(0u16);
                range_offsets.push((2 * (seg_count - i + glyph_ids.len())) as u16);
                glyph_ids.extend(run.iter().map(|&(_, g)| g));
            } else {
                deltas.push(first_glyph.wrapping_sub(first_code));
                range_offsets.push(0);
            }
        }
        starts.push(0xFFFF);
        ends.push(0xFFFF);
        deltas.push(1);
        range_offsets.push(0);

        let seg_count = seg_count as u16;
        let entry_selector = 15 - seg_count.leading_zeros() as u16;
        let search_range = 2 * (1u16 << entry_selector);
        let length = 16 + 8 * seg_count as usize + 2 * glyph_ids.len();

        put_u16(&mut out, 4);
        put_u16(&mut out, length as u16);
        put_u16(&mut out, 0); // language
        put_u16(&mut out, seg_count * 2);
        put_u16(&mut out, search_range);
        put_u16(&mut out, entry_selector);
        put_u16(&mut out, seg_count * 2 - search_range);
        ends.iter().for_each(|&v| put_u16(&mut out, v));
        put_u16(&mut out, 0); // reservedPad
        starts.iter().for_each(|&v| put_u16(&mut out, v));
        deltas.iter().for_each(|&v| put_u16(&mut out, v));
        range_offsets.iter().for_each(|&v| put_u16(&mut out, v));
        glyph_ids.iter().for_each(|&v| put_u16(&mut out, v));
        out
    }
}

/// Write one simple glyph record with packed flags and short deltas
fn encode_glyph(contours: &[Vec<SynthPoint>], out: &mut Vec<u8>) {
    let points: Vec<SynthPoint> = contours.iter().flatten().copied().collect();
    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let y_min = points.iter().map(|p| p.1).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_max = points.iter().map(|p| p.1).max().unwrap_or(0);

    put_i16(out, contours.len() as i16);
    for v in [x_min, y_min, x_max, y_max] {
        put_i16(out, v);
    }
    let mut end = 0usize;
    for contour in contours {
        end += contour.len();
        put_u16(out, end.saturating_sub(1) as u16);
    }
    put_u16(out, 0); // no instructions

    let mut flags = Vec::with_capacity(points.len());
    let mut xs = Vec::new();
    let mut ys = Vec::new();
    let (mut px, mut py) = (0i32, 0i32);
    for &(x, y, on) in &points {
        let mut flag = if on { GlyphFlag::ON_CURVE } else { 0 };
        flag |= encode_delta(
            x as i32 - px,
            GlyphFlag::X_SHORT,
            GlyphFlag::X_SAME_OR_POSITIVE,
            &mut xs,
        );
        flag |= encode_delta(
            y as i32 - py,
            GlyphFlag::Y_SHORT,
            GlyphFlag::Y_SAME_OR_POSITIVE,
            &mut ys,
        );
        flags.push(flag);
        (px, py) = (x as i32, y as i32);
    }

    let mut i = 0;
    while i < flags.len() {
        let flag = flags[i];
        let run = flags[i..].iter().take(256).take_while(|&&f| f == flag).count();
        if run > 1 {
            out.push(flag | GlyphFlag::REPEAT);
            out.push((run - 1) as u8);
        } else {
            out.push(flag);
        }
        i += run;
    }
    out.extend_from_slice(&xs);
    out.extend_from_slice(&ys);
}

fn encode_delta(delta: i32, short: u8, same: u8, out: &mut Vec<u8>) -> u8 {
    if delta == 0 {
        same
    } else if delta.unsigned_abs() <= 255 {
        out.push(delta.unsigned_abs() as u8);
        if delta > 0 {
            short | same
        } else {
            short
        }
    } else {
        out.extend_from_slice(&(delta as i16).to_be_bytes());
        0
    }
}

fn padded(len: usize) -> usize {
    (len + 3) & !3
}

fn checksum(bytes: &[u8]) -> u32 {
    bytes.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn put_i16(out: &mut Vec<u8>, v: i16) {
    out.extend_from_slice(&v.to_be_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_be_bytes());
}
