//! The two capabilities the rasterizer borrows from its host
//!
//! Scanglyph never opens windows or owns framebuffers. It asks for bytes
//! through [`ByteSource`] and hands coverage back through [`PixelSurface`].
//!
//! - [`PixelSurface`] - Somewhere to put coverage values
//! - [`ByteSource`] - Somewhere to get font bytes from

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{ResourceError, Result};

/// A write-only pixel target
///
/// ```ignore
/// struct Framebuffer { /* ... */ }
///
/// impl PixelSurface for Framebuffer {
///     fn set_pixel(&mut self, x: i32, y: i32, coverage: u8) {
///         // Blend `coverage` into your own pixel format
///     }
/// }
/// ```
pub trait PixelSurface {
    /// Write one coverage value; coordinates may fall outside the surface
    fn set_pixel(&mut self, x: i32, y: i32, coverage: u8);
}

impl<S: PixelSurface + ?Sized> PixelSurface for &mut S {
    fn set_pixel(&mut self, x: i32, y: i32, coverage: u8) {
        (**self).set_pixel(x, y, coverage);
    }
}

/// Reads every byte of a named resource
pub trait ByteSource: Send + Sync {
    fn read_all(&self, name: &Path) -> Result<Vec<u8>>;
}

/// Reads font files straight from disk
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSource;

impl ByteSource for FsSource {
    fn read_all(&self, name: &Path) -> Result<Vec<u8>> {
        let display = name.display().to_string();
        let data = fs::read(name).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ResourceError::NotFound(display.clone()),
            _ => ResourceError::Read {
                path: display.clone(),
                source: e,
            },
        })?;

        if data.is_empty() {
            return Err(ResourceError::Empty(display).into());
        }

        log::debug!("Read {} bytes from {}", data.len(), display);
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScanglyphError;

    #[test]
    fn missing_file_is_not_found() {
        let err = FsSource
            .read_all(Path::new("/definitely/not/here.ttf"))
            .unwrap_err();
        assert!(matches!(
            err,
            ScanglyphError::ResourceUnavailable(ResourceError::NotFound(_))
        ));
    }

    #[test]
    fn empty_file_is_rejected() {
        let path = std::env::temp_dir().join(format!("scanglyph-empty-{}.ttf", std::process::id()));
        fs::write(&path, b"").unwrap();

        let err = FsSource.read_all(&path).unwrap_err();
        let _ = fs::remove_file(&path);

        assert!(matches!(
            err,
            ScanglyphError::ResourceUnavailable(ResourceError::Empty(_))
        ));
    }
}
