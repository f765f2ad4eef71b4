// this_file: backends/scanglyph-render-scanline/benches/rasterize.rs

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use scanglyph_render_scanline::{EdgeList, GlyphRenderer, Placement, ScanlineRasterizer, Tessellator};
use scanglyph_sfnt::{decode_outline, FontBuilder, FontTables, GlyphOutline};

/// An "O": outer and inner rings, all curves
fn ring_outline() -> GlyphOutline {
    let mut builder = FontBuilder::new();
    let gid = builder.glyph(&[
        &[
            (500, 0, true),
            (100, 0, false),
            (100, 400, true),
            (100, 800, false),
            (500, 800, true),
            (900, 800, false),
            (900, 400, true),
            (900, 0, false),
        ],
        &[
            (500, 150, true),
            (750, 150, false),
            (750, 400, true),
            (750, 650, false),
            (500, 650, true),
            (250, 650, false),
            (250, 400, true),
            (250, 150, false),
        ],
    ]);
    let data = builder.build();
    let tables = FontTables::parse(&data).unwrap();
    decode_outline(
        tables.glyf.slice(&data),
        tables.loca.slice(&data),
        tables.loca_format,
        gid,
    )
    .unwrap()
}

fn bench_tessellate(c: &mut Criterion) {
    let outline = ring_outline();
    c.bench_function("tessellate_ring", |b| {
        let tess = Tessellator::default();
        b.iter(|| black_box(tess.tessellate(black_box(&outline))));
    });
}

fn bench_rasterize(c: &mut Criterion) {
    let outline = ring_outline();
    let tessellation = Tessellator::default().tessellate(&outline);
    let mut group = c.benchmark_group("rasterize_ring");

    for size in [16u32, 32, 64, 128] {
        let placement = Placement::new(size, 1000, 800);
        let edges = EdgeList::from_tessellation(&tessellation, |p| placement.to_pixel(p));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let rasterizer = ScanlineRasterizer::default();
            b.iter(|| black_box(rasterizer.rasterize(&edges, size, size)));
        });
    }
    group.finish();
}

fn bench_full_glyph(c: &mut Criterion) {
    let outline = ring_outline();
    let renderer = GlyphRenderer::default();
    let placement = Placement::new(48, 1000, 800);
    c.bench_function("render_ring_48px", |b| {
        b.iter(|| black_box(renderer.render(&outline, &placement, 48)))
    });
}

criterion_group!(benches, bench_tessellate, bench_rasterize, bench_full_glyph);
criterion_main!(benches);
