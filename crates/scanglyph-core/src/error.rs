//! Error types for Scanglyph

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScanglyphError>;

/// Main error type for Scanglyph
#[derive(Debug, Error)]
pub enum ScanglyphError {
    #[error("Font resource unavailable: {0}")]
    ResourceUnavailable(#[from] ResourceError),

    #[error("Font format error: {0}")]
    FontFormat(#[from] FontFormatError),

    #[error("Degenerate glyph geometry: {0}")]
    DegenerateGeometry(#[from] GeometryError),

    #[error("Rendering failed: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// The font bytes could not be obtained
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("Font file not found: {0}")]
    NotFound(String),

    #[error("Font file is empty: {0}")]
    Empty(String),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// The sfnt container is missing data or lies about its own layout
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FontFormatError {
    #[error("missing required table: {0}")]
    MissingTable(&'static str),

    #[error("unexpected end of data reading {context} at offset {offset}")]
    UnexpectedEof { context: &'static str, offset: usize },

    #[error("table '{tag}' at offset {offset} with length {length} exceeds the font data")]
    TableOutOfBounds { tag: String, offset: u32, length: u32 },

    #[error("unsupported sfnt scaler type 0x{0:08X}")]
    UnsupportedScaler(u32),

    #[error("unsupported cmap subtable format {0}")]
    UnsupportedCmapFormat(u16),

    #[error("invalid value: {0}")]
    InvalidValue(&'static str),
}

/// One glyph's contour data cannot be turned into an outline
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    #[error("glyph {0} has no contours")]
    Empty(u16),

    #[error("glyph {0} is a composite glyph")]
    Composite(u16),

    #[error("glyph {glyph}: contour end points are not strictly increasing at contour {contour}")]
    NonIncreasingEndPoints { glyph: u16, contour: usize },

    #[error("glyph {glyph}: flag repeat runs past {points} points")]
    FlagOverflow { glyph: u16, points: usize },
}

/// Rendering errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_table_message_names_the_table() {
        let err: ScanglyphError = FontFormatError::MissingTable("loca").into();
        let msg = err.to_string();
        assert!(msg.contains("missing required table"));
        assert!(msg.contains("loca"));
    }
}
