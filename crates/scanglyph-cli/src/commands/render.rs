//! `scanglyph render`

use std::fs;

use anyhow::{bail, Context, Result};
use scanglyph::prelude::*;

use crate::cli::RenderArgs;

pub fn run(args: &RenderArgs) -> Result<()> {
    let font = load_font(&args.font)
        .with_context(|| format!("Failed to load font {}", args.font.display()))?;
    let canvas = render_text(&font, &args.text, args.size, args.padding)?;

    if let Some(path) = &args.output {
        let pgm = canvas.to_pgm().context("Failed to encode PGM")?;
        fs::write(path, pgm).with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Wrote {}x{} image to {}", canvas.width(), canvas.height(), path.display());
    }

    if args.ascii || args.output.is_none() {
        print!("{}", canvas.to_ascii());
    }
    Ok(())
}

/// Lay `text` out on a canvas just big enough to hold it
pub fn render_text(font: &FontProgram, text: &str, size: u32, padding: u32) -> Result<GrayCanvas> {
    if size == 0 {
        bail!("Size must be at least 1 pixel");
    }

    let advance = font.measure_text(text, size).max(1).unsigned_abs();
    let (Some(width), Some(height)) = (padded(advance, padding), padded(size, padding)) else {
        bail!("Text at {}px with {}px padding does not fit in a canvas", size, padding);
    };
    let mut canvas = GrayCanvas::new(width, height)
        .with_context(|| format!("Cannot allocate a {}x{} canvas", width, height))?;

    let origin = i32::try_from(padding)?;
    let summary = font.draw_text(&mut canvas, text, size, origin, origin);
    if summary.skipped > 0 {
        log::warn!("{} character(s) could not be drawn", summary.skipped);
    }
    Ok(canvas)
}

/// `extent` plus `padding` on both sides, if it fits
fn padded(extent: u32, padding: u32) -> Option<u32> {
    padding.checked_mul(2)?.checked_add(extent)
}
