// this_file: crates/scanglyph/src/font.rs

//! A loaded font and everything decoded from it

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use scanglyph_core::{
    BitmapCache, BitmapKey, ByteSource, CacheMetrics, CoverageBitmap, FsSource, GeometryError,
    RenderConfig, Result, ScanglyphError,
};
use scanglyph_render_scanline::{GlyphRenderer, Placement};
use scanglyph_sfnt::{decode_outline, FontTables, GlyphOutline, LocaFormat};

/// Characters decoded at load time; nothing else is drawn
pub const SUPPORTED_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn is_supported(ch: char) -> bool {
    ch.is_ascii_alphanumeric()
}

/// Font-wide numbers, in font units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub x_min: i16,
    pub y_min: i16,
    pub x_max: i16,
    pub y_max: i16,
    pub typo_ascender: i16,
    pub typo_descender: i16,
    pub typo_line_gap: i16,
    pub loca_format: LocaFormat,
}

/// An owned font buffer, its tables, and the outlines decoded from it
pub struct FontProgram {
    data: Vec<u8>,
    tables: FontTables,
    outlines: HashMap<char, GlyphOutline>,
    broken: HashMap<char, GeometryError>,
    config: RenderConfig,
    renderer: GlyphRenderer,
    bitmaps: BitmapCache,
}

impl std::fmt::Debug for FontProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontProgram")
            .field("bytes", &self.data.len())
            .field("units_per_em", &self.tables.head.units_per_em)
            .field("outlines", &self.outlines.len())
            .field("config", &self.config)
            .finish()
    }
}

impl FontProgram {
    /// Parse `data` with the default configuration
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        Self::with_config(data, RenderConfig::default())
    }

    /// Parse `data` and decode every supported character's outline
    ///
    /// Missing or malformed tables fail the load. A glyph with broken
    /// geometry only loses that one character.
    pub fn with_config(data: Vec<u8>, config: RenderConfig) -> Result<Self> {
        let config = config.normalized();
        let tables = FontTables::parse(&data)?;

        let mut outlines = HashMap::new();
        let mut broken = HashMap::new();
        if tables.cmap.is_none() {
            log::warn!("Font has no usable cmap, nothing will be drawn");
        }

        for ch in SUPPORTED_CHARS.chars() {
            let glyph = tables.cmap.as_ref().map_or(0, |c| c.resolve(ch as u32));
            if glyph == 0 {
                log::debug!("'{}' is not mapped", ch);
                continue;
            }

            let glyf = tables.glyf.slice(&data);
            let loca = tables.loca.slice(&data);
            match decode_outline(glyf, loca, tables.loca_format, glyph) {
                Ok(outline) => {
                    outlines.insert(ch, outline);
                },
                Err(ScanglyphError::DegenerateGeometry(e)) => {
                    log::warn!("Skipping '{}': {}", ch, e);
                    broken.insert(ch, e);
                },
                Err(e) => return Err(e),
            }
        }

        log::info!(
            "Loaded font: {} bytes, {} tables, {} units/em, {} of {} characters decoded",
            data.len(),
            tables.records.len(),
            tables.head.units_per_em,
            outlines.len(),
            SUPPORTED_CHARS.len()
        );

        Ok(Self {
            renderer: GlyphRenderer::new(&config),
            bitmaps: BitmapCache::new(config.bitmap_cache_capacity),
            data,
            tables,
            outlines,
            broken,
            config,
        })
    }

    /// Read `path` from disk and load it with the environment's configuration
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::load_from(&FsSource, path.as_ref(), RenderConfig::from_env())
    }

    pub fn load_from(source: &dyn ByteSource, path: &Path, config: RenderConfig) -> Result<Self> {
        Self::with_config(source.read_all(path)?, config)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn tables(&self) -> &FontTables {
        &self.tables
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn metrics(&self) -> FontMetrics {
        let head = &self.tables.head;
        let os2 = &self.tables.os2;
        FontMetrics {
            units_per_em: head.units_per_em,
            x_min: head.x_min,
            y_min: head.y_min,
            x_max: head.x_max,
            y_max: head.y_max,
            typo_ascender: os2.typo_ascender,
            typo_descender: os2.typo_descender,
            typo_line_gap: os2.typo_line_gap,
            loca_format: self.tables.loca_format,
        }
    }

    /// Glyph index for `ch`; 0 when unmapped
    pub fn resolve(&self, ch: char) -> u16 {
        self.tables
            .cmap
            .as_ref()
            .map_or(0, |cmap| cmap.resolve(ch as u32))
    }

    /// The outline decoded at load time, if `ch` has one
    pub fn outline(&self, ch: char) -> Option<&GlyphOutline> {
        self.outlines.get(&ch)
    }

    /// Why `ch` was dropped at load time, if it was
    pub fn geometry_error(&self, ch: char) -> Option<&GeometryError> {
        self.broken.get(&ch)
    }

    /// Characters with a decoded outline, in no particular order
    pub fn decoded_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.outlines.keys().copied()
    }

    /// Pixel size `ch` is actually drawn at
    ///
    /// Lowercase letters are shrunk so their x-height sits closer to the
    /// capitals drawn at the same nominal size.
    pub fn effective_size(&self, ch: char, pixel_size: u32) -> u32 {
        if ch >= 'a' {
            (pixel_size as f32 * self.config.lowercase_scale).floor() as u32
        } else {
            pixel_size
        }
    }

    /// Placement for a glyph rasterized at `pixel_size`
    pub fn placement(&self, pixel_size: u32) -> Placement {
        Placement::new(
            pixel_size,
            self.tables.head.units_per_em,
            self.tables.os2.typo_ascender,
        )
    }

    /// Coverage for `ch` at its effective size, or `None` without an outline
    ///
    /// Results are cached per (effective size, character) unless caching is
    /// switched off.
    pub fn rasterize_char(&self, ch: char, pixel_size: u32) -> Result<Option<Arc<CoverageBitmap>>> {
        let Some(outline) = self.outlines.get(&ch) else {
            return Ok(None);
        };
        let size = self.effective_size(ch, pixel_size);
        let render = || {
            self.renderer
                .render(outline, &self.placement(size), size)
                .map(Arc::new)
        };

        let bitmap = if self.config.cache_enabled {
            self.bitmaps
                .get_or_try_insert_with(BitmapKey::new(size, ch), render)?
        } else {
            render()?
        };
        Ok(Some(bitmap))
    }

    pub fn cache_metrics(&self) -> CacheMetrics {
        self.bitmaps.metrics()
    }

    pub fn clear_cache(&self) {
        self.bitmaps.clear();
    }
}

/// Load a font file with the environment's configuration
pub fn load_font(path: impl AsRef<Path>) -> Result<FontProgram> {
    FontProgram::load(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scanglyph_core::{FontFormatError, ResourceError};
    use scanglyph_sfnt::{FontBuilder, Tag};

    fn abc_font() -> Vec<u8> {
        let mut builder = FontBuilder::new();
        for ch in ['A', 'B', 'a'] {
            let gid = builder.rect(100, 0, 600, 700);
            builder.map(ch, gid);
        }
        builder.build()
    }

    #[test]
    fn decodes_only_mapped_supported_chars() {
        let font = FontProgram::from_bytes(abc_font()).unwrap();
        let mut chars: Vec<char> = font.decoded_chars().collect();
        chars.sort_unstable();
        assert_eq!(chars, vec!['A', 'B', 'a']);
        assert!(font.outline('Z').is_none());
        assert_eq!(font.resolve('B'), 2);
    }

    #[test]
    fn metrics_come_from_head_and_os2() {
        let font = FontProgram::from_bytes(abc_font()).unwrap();
        let metrics = font.metrics();
        assert_eq!(metrics.units_per_em, 1000);
        assert_eq!(metrics.typo_ascender, 800);
        assert_eq!(metrics.typo_descender, -200);
        assert_eq!(metrics.loca_format, LocaFormat::Short);
    }

    #[test]
    fn lowercase_is_scaled_down() {
        let font = FontProgram::from_bytes(abc_font()).unwrap();
        assert_eq!(font.effective_size('A', 50), 50);
        assert_eq!(font.effective_size('7', 50), 50);
        assert_eq!(font.effective_size('a', 50), 40);
        assert_eq!(font.effective_size('z', 33), 26);
    }

    #[test]
    fn missing_head_fails_load() {
        let data = FontBuilder::new().omit_table(Tag::HEAD).build();
        let err = FontProgram::from_bytes(data).unwrap_err();
        assert!(matches!(
            err,
            ScanglyphError::FontFormat(FontFormatError::MissingTable("head"))
        ));
    }

    #[test]
    fn composite_glyph_is_skipped_not_fatal() {
        let mut builder = FontBuilder::new();
        let good = builder.rect(0, 0, 500, 500);
        let composite = builder.raw_glyph(vec![0xFF, 0xFF, 0, 0, 0, 0, 0, 0, 0, 0]);
        builder.map('G', good).map('C', composite);

        let font = FontProgram::from_bytes(builder.build()).unwrap();
        assert!(font.outline('G').is_some());
        assert!(font.outline('C').is_none());
        assert_eq!(font.geometry_error('C'), Some(&GeometryError::Composite(composite)));
    }

    #[test]
    fn bitmaps_are_cached_per_effective_size() {
        let font = FontProgram::from_bytes(abc_font()).unwrap();
        let first = font.rasterize_char('A', 32).unwrap().unwrap();
        let second = font.rasterize_char('A', 32).unwrap().unwrap();
        assert!(Arc::ptr_eq(&first, &second));

        let lower = font.rasterize_char('a', 32).unwrap().unwrap();
        assert_eq!(lower.width(), 25);

        let metrics = font.cache_metrics();
        assert_eq!(metrics.hits, 1);
        assert_eq!(metrics.misses, 2);
        assert_eq!(metrics.entries, 2);
    }

    #[test]
    fn disabled_cache_stays_empty() {
        let config = RenderConfig {
            cache_enabled: false,
            ..Default::default()
        };
        let font = FontProgram::with_config(abc_font(), config).unwrap();
        font.rasterize_char('B', 16).unwrap();
        font.rasterize_char('B', 16).unwrap();
        assert_eq!(font.cache_metrics().total_requests(), 0);
    }

    #[test]
    fn unmapped_char_rasterizes_to_none() {
        let font = FontProgram::from_bytes(abc_font()).unwrap();
        assert!(font.rasterize_char('q', 16).unwrap().is_none());
        assert!(font.rasterize_char('!', 16).unwrap().is_none());
    }

    #[test]
    fn missing_file_is_resource_error() {
        let err = load_font("/definitely/not/a/font.ttf").unwrap_err();
        assert!(matches!(
            err,
            ScanglyphError::ResourceUnavailable(ResourceError::NotFound(_))
        ));
    }
}
