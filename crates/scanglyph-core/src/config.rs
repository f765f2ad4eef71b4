//! Render configuration
//!
//! Every tunable in the pipeline lives in [`RenderConfig`]. The defaults
//! reproduce the classic behavior: 5 line segments per quadratic curve,
//! 5 sub-scanlines per pixel row, lowercase letters at 80% size.
//!
//! # Environment Variables
//!
//! [`RenderConfig::from_env`] starts from the defaults and applies:
//!
//! ```bash
//! SCANGLYPH_CACHE=0            # disable the rendered-bitmap cache
//! SCANGLYPH_SUBDIVISIONS=8     # line segments per quadratic curve
//! SCANGLYPH_SUB_SCANLINES=4    # vertical samples per pixel row
//! ```

use std::env;

/// Line segments each implied quadratic curve is flattened into
pub const DEFAULT_CURVE_SUBDIVISIONS: u32 = 5;

/// Vertical samples taken per output pixel row
pub const DEFAULT_SUB_SCANLINES: u32 = 5;

/// Upper bound for both sampling counts
pub const MAX_SAMPLING_COUNT: u32 = 64;

/// Size of lowercase glyphs relative to capitals and digits
pub const DEFAULT_LOWERCASE_SCALE: f32 = 0.8;

/// Rendered bitmaps kept before the least recently used one is dropped
pub const DEFAULT_BITMAP_CACHE_CAPACITY: usize = 256;

/// Knobs for tessellation, rasterization and caching
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub curve_subdivisions: u32,
    pub sub_scanlines: u32,
    pub lowercase_scale: f32,
    pub bitmap_cache_capacity: usize,
    pub cache_enabled: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            curve_subdivisions: DEFAULT_CURVE_SUBDIVISIONS,
            sub_scanlines: DEFAULT_SUB_SCANLINES,
            lowercase_scale: DEFAULT_LOWERCASE_SCALE,
            bitmap_cache_capacity: DEFAULT_BITMAP_CACHE_CAPACITY,
            cache_enabled: true,
        }
    }
}

impl RenderConfig {
    /// Defaults overlaid with `SCANGLYPH_*` environment variables
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from any key/value lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(val) = lookup("SCANGLYPH_CACHE") {
            let disabled = matches!(val.to_lowercase().as_str(), "0" | "false" | "no" | "off");
            self.cache_enabled = !disabled;
            log::info!(
                "Scanglyph bitmap cache {} via SCANGLYPH_CACHE",
                if disabled { "disabled" } else { "enabled" }
            );
        }

        if let Some(n) = parse_count(&lookup, "SCANGLYPH_SUBDIVISIONS") {
            self.curve_subdivisions = n;
        }

        if let Some(n) = parse_count(&lookup, "SCANGLYPH_SUB_SCANLINES") {
            self.sub_scanlines = n;
        }

        self.normalized()
    }

    /// Clamp subdivision and sampling counts to `1..=MAX_SAMPLING_COUNT`
    pub fn normalized(mut self) -> Self {
        self.curve_subdivisions = clamp_count("curve subdivisions", self.curve_subdivisions);
        self.sub_scanlines = clamp_count("sub-scanlines", self.sub_scanlines);
        if !(self.lowercase_scale > 0.0 && self.lowercase_scale <= 1.0) {
            log::warn!(
                "Lowercase scale {} out of range, using {}",
                self.lowercase_scale,
                DEFAULT_LOWERCASE_SCALE
            );
            self.lowercase_scale = DEFAULT_LOWERCASE_SCALE;
        }
        self
    }
}

fn clamp_count(what: &str, n: u32) -> u32 {
    if n > MAX_SAMPLING_COUNT {
        log::warn!("{} {} is too many, using {}", n, what, MAX_SAMPLING_COUNT);
    }
    n.clamp(1, MAX_SAMPLING_COUNT)
}

fn parse_count(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<u32> {
    let raw = lookup(key)?;
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            log::warn!("Ignoring {}={:?}: expected a positive integer", key, raw);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_classic_pipeline() {
        let config = RenderConfig::default();
        assert_eq!(config.curve_subdivisions, 5);
        assert_eq!(config.sub_scanlines, 5);
        assert_eq!(config.lowercase_scale, 0.8);
        assert!(config.cache_enabled);
    }

    #[test]
    fn cache_can_be_disabled() {
        let config = RenderConfig::default().with_overrides(lookup(&[("SCANGLYPH_CACHE", "off")]));
        assert!(!config.cache_enabled);

        let config = RenderConfig::default().with_overrides(lookup(&[("SCANGLYPH_CACHE", "1")]));
        assert!(config.cache_enabled);
    }

    #[test]
    fn counts_are_parsed_and_bad_values_ignored() {
        let config = RenderConfig::default().with_overrides(lookup(&[
            ("SCANGLYPH_SUBDIVISIONS", "8"),
            ("SCANGLYPH_SUB_SCANLINES", "zero"),
        ]));
        assert_eq!(config.curve_subdivisions, 8);
        assert_eq!(config.sub_scanlines, 5);

        let config =
            RenderConfig::default().with_overrides(lookup(&[("SCANGLYPH_SUBDIVISIONS", "0")]));
        assert_eq!(config.curve_subdivisions, 5);
    }

    #[test]
    fn oversized_counts_are_capped() {
        let config = RenderConfig::default().with_overrides(lookup(&[
            ("SCANGLYPH_SUBDIVISIONS", "4000000000"),
            ("SCANGLYPH_SUB_SCANLINES", "65"),
        ]));
        assert_eq!(config.curve_subdivisions, MAX_SAMPLING_COUNT);
        assert_eq!(config.sub_scanlines, MAX_SAMPLING_COUNT);

        let config = RenderConfig {
            sub_scanlines: 64,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.sub_scanlines, 64);
    }

    #[test]
    fn normalized_clamps_zero_counts() {
        let config = RenderConfig {
            curve_subdivisions: 0,
            sub_scanlines: 0,
            lowercase_scale: 2.0,
            ..Default::default()
        }
        .normalized();
        assert_eq!(config.curve_subdivisions, 1);
        assert_eq!(config.sub_scanlines, 1);
        assert_eq!(config.lowercase_scale, DEFAULT_LOWERCASE_SCALE);
    }
}
