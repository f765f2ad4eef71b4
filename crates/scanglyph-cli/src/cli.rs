//! Command-line arguments

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Scanglyph - TrueType glyphs, scanline rendered
#[derive(Parser, Debug)]
#[command(name = "scanglyph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show a font's tables, metrics and drawable characters
    #[command(alias = "i")]
    Info(InfoArgs),

    /// Render text to a PGM image or the terminal
    #[command(alias = "r")]
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Font file (.ttf)
    pub font: PathBuf,
}

#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Font file (.ttf)
    pub font: PathBuf,

    /// Text to render; only ASCII letters, digits and spaces are drawn
    pub text: String,

    /// Pixel size for capitals and digits
    #[arg(short = 's', long = "size", default_value_t = 32)]
    pub size: u32,

    /// Blank border around the text, in pixels
    #[arg(short = 'p', long = "padding", default_value_t = 4)]
    pub padding: u32,

    /// Write a binary PGM (P5) image here
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Print the result as ASCII art (the default without --output)
    #[arg(long)]
    pub ascii: bool,
}
