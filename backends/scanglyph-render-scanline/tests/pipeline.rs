//! Outline to coverage with fonts built in memory

use scanglyph_render_scanline::{composite, GlyphRenderer, Placement};
use scanglyph_core::{GrayCanvas, RenderConfig};
use scanglyph_sfnt::{decode_outline, FontBuilder, FontTables, GlyphOutline};

fn decode(builder: &FontBuilder, glyph: u16) -> (GlyphOutline, FontTables) {
    let data = builder.build();
    let tables = FontTables::parse(&data).unwrap();
    let outline = decode_outline(
        tables.glyf.slice(&data),
        tables.loca.slice(&data),
        tables.loca_format,
        glyph,
    )
    .unwrap();
    (outline, tables)
}

#[test]
fn inset_square_has_clean_borders() {
    let mut builder = FontBuilder::new();
    builder.units_per_em(64).typo_ascender(64);
    let gid = builder.rect(16, 16, 48, 48);
    let (outline, tables) = decode(&builder, gid);

    let placement = Placement::new(64, tables.head.units_per_em, tables.os2.typo_ascender);
    let bitmap = GlyphRenderer::default().render(&outline, &placement, 64).unwrap();

    for y in 0..64 {
        for x in 0..64 {
            let inside = (16..48).contains(&x) && (16..48).contains(&y);
            let expected = if inside { 255 } else { 0 };
            assert_eq!(bitmap.get(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn curved_glyph_stays_within_bounds() {
    let mut builder = FontBuilder::new();
    builder.units_per_em(100).typo_ascender(100);
    // A lens shape: two curves bulging out from a vertical chord
    let gid = builder.glyph(&[&[
        (50, 10, true),
        (10, 50, false),
        (50, 90, true),
        (90, 50, false),
    ]]);
    let (outline, tables) = decode(&builder, gid);

    let placement = Placement::new(50, tables.head.units_per_em, tables.os2.typo_ascender);
    let bitmap = GlyphRenderer::default().render(&outline, &placement, 50).unwrap();

    assert_eq!(bitmap.get(25, 25), Some(255));
    assert_eq!(bitmap.get(2, 2), Some(0));
    assert_eq!(bitmap.get(47, 47), Some(0));
    assert!(bitmap.covered_pixels() > 100);
}

#[test]
fn coarser_config_still_renders() {
    let config = RenderConfig {
        curve_subdivisions: 1,
        sub_scanlines: 1,
        ..Default::default()
    };
    let mut builder = FontBuilder::new();
    let gid = builder.rect(0, 0, 500, 500);
    let (outline, tables) = decode(&builder, gid);

    let placement = Placement::new(20, tables.head.units_per_em, tables.os2.typo_ascender);
    let bitmap = GlyphRenderer::new(&config).render(&outline, &placement, 20).unwrap();
    assert!(bitmap.data().iter().all(|&c| c == 0 || c == 255));

    let mut canvas = GrayCanvas::new(40, 40).unwrap();
    let written = composite(&mut canvas, &bitmap, 10, 10);
    assert_eq!(written, bitmap.covered_pixels());
}
