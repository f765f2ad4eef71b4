//! `scanglyph info`

use anyhow::{Context, Result};
use scanglyph::{load_font, FontProgram, SUPPORTED_CHARS};

use crate::cli::InfoArgs;

pub fn run(args: &InfoArgs) -> Result<()> {
    let font = load_font(&args.font)
        .with_context(|| format!("Failed to load font {}", args.font.display()))?;
    print!("{}", describe(&args.font.display().to_string(), &font));
    Ok(())
}

fn describe(name: &str, font: &FontProgram) -> String {
    let tables = font.tables();
    let metrics = font.metrics();
    let mut out = String::new();

    out.push_str(&format!("Font: {}\n", name));
    out.push_str(&format!("Size: {} bytes\n", font.data().len()));
    out.push_str(&format!("Tables ({}):\n", tables.records.len()));
    for record in &tables.records {
        out.push_str(&format!(
            "  {}  offset {:>8}  length {:>8}\n",
            record.tag, record.offset, record.length
        ));
    }

    out.push_str(&format!("Units per em: {}\n", metrics.units_per_em));
    out.push_str(&format!(
        "Bounds: ({}, {}) .. ({}, {})\n",
        metrics.x_min, metrics.y_min, metrics.x_max, metrics.y_max
    ));
    out.push_str(&format!(
        "Typo ascender/descender/gap: {} / {} / {}\n",
        metrics.typo_ascender, metrics.typo_descender, metrics.typo_line_gap
    ));
    out.push_str(&format!("Loca format: {:?}\n", metrics.loca_format));

    match &tables.cmap {
        Some(cmap) => out.push_str(&format!("Cmap: format 4, {} segments\n", cmap.segments().len())),
        None => out.push_str("Cmap: none usable\n"),
    }

    let drawable: String = SUPPORTED_CHARS
        .chars()
        .filter(|&ch| font.outline(ch).is_some())
        .collect();
    out.push_str(&format!(
        "Drawable: {} of {}\n  {}\n",
        drawable.len(),
        SUPPORTED_CHARS.len(),
        drawable
    ));

    for ch in SUPPORTED_CHARS.chars() {
        if let Some(err) = font.geometry_error(ch) {
            out.push_str(&format!("  '{}' skipped: {}\n", ch, err));
        }
    }
    out
}
