//! Scanglyph Core: the vocabulary every stage shares
//!
//! Fonts go in as bytes and come out as coverage. Between those two ends
//! sit four crates that all speak the types defined here:
//!
//! 1. **Parsing** (`scanglyph-sfnt`) - Tables, cmap lookup, outline decoding
//! 2. **Tessellation** (`scanglyph-render-scanline`) - Curves become polylines
//! 3. **Rasterization** (`scanglyph-render-scanline`) - Polylines become coverage
//! 4. **Drawing** (`scanglyph`) - Coverage lands on your [`PixelSurface`]
//!
//! ## What Lives Here
//!
//! - [`error`] - The error taxonomy, from unreadable files to broken contours
//! - [`types`] - [`Point2F`] and [`CoverageBitmap`]
//! - [`traits`] - The [`PixelSurface`] and [`ByteSource`] capabilities
//! - [`config`] - [`RenderConfig`] and its environment overrides
//! - [`cache`] - The single-writer LRU behind rendered-glyph reuse
//! - [`surface`] - [`GrayCanvas`], a grayscale surface for tools and tests

pub mod cache;
pub mod config;
pub mod error;
pub mod surface;
pub mod traits;
pub mod types;

pub use cache::{BitmapCache, BitmapKey, CacheMetrics, RenderCache};
pub use config::RenderConfig;
pub use error::{
    FontFormatError, GeometryError, RenderError, ResourceError, Result, ScanglyphError,
};
pub use surface::GrayCanvas;
pub use traits::{ByteSource, FsSource, PixelSurface};
pub use types::{CoverageBitmap, Point2F};
