//! Runs the built binary against a generated font

use std::path::PathBuf;
use std::process::Command;

use scanglyph_sfnt::FontBuilder;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_scanglyph"))
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("scanglyph-cli-{}-{}", std::process::id(), name))
}

fn write_font(name: &str) -> PathBuf {
    let mut builder = FontBuilder::new();
    builder.units_per_em(100).typo_ascender(100);
    let block = builder.rect(10, 0, 90, 100);
    builder.map('H', block).map('i', block);
    let path = temp_path(name);
    std::fs::write(&path, builder.build()).unwrap();
    path
}

#[test]
fn info_lists_drawable_chars() {
    let font = write_font("info.ttf");
    let output = bin().arg("info").arg(&font).output().unwrap();
    std::fs::remove_file(&font).unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Drawable: 2 of 62"));
    assert!(stdout.contains("Cmap: format 4"));
}

#[test]
fn render_writes_a_pgm() {
    let font = write_font("render.ttf");
    let pgm = temp_path("render.pgm");
    let output = bin()
        .args(["r", "-s", "20", "-p", "1", "-o"])
        .arg(&pgm)
        .arg(&font)
        .arg("Hi")
        .output()
        .unwrap();
    std::fs::remove_file(&font).unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let bytes = std::fs::read(&pgm).unwrap();
    std::fs::remove_file(&pgm).unwrap();

    // 20 + 16 wide plus padding, 20 tall plus padding
    assert!(bytes.starts_with(b"P5\n38 22\n255\n"));
    assert_eq!(bytes.len(), b"P5\n38 22\n255\n".len() + 38 * 22);
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_font_fails() {
    let output = bin()
        .args(["info", "/no/such/font.ttf"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load font"));
}
