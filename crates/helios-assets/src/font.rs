//! Typeface metrics for extruded text.
//!
//! Reads the JSON typeface format produced by the facetype converter
//! (`glyphs`, `resolution`, `ascender`, `boundingBox`, ...). Only horizontal
//! metrics are kept: outlines are the rendering engine's business, the core
//! only needs bounding boxes to center labels.

use std::collections::HashMap;

use glam::Vec3;
use serde::Deserialize;

use crate::error::LoadError;

#[derive(Deserialize)]
struct TypefaceFile {
    glyphs: HashMap<String, GlyphFile>,
    #[serde(rename = "familyName", default)]
    family_name: String,
    #[serde(default = "default_resolution")]
    resolution: f32,
    #[serde(default)]
    ascender: f32,
    #[serde(default)]
    descender: f32,
}

#[derive(Deserialize)]
struct GlyphFile {
    ha: f32,
    #[serde(default)]
    x_min: f32,
    #[serde(default)]
    x_max: f32,
}

fn default_resolution() -> f32 {
    1000.0
}

/// Horizontal metrics of one glyph in font units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphMetrics {
    pub advance: f32,
    pub x_min: f32,
    pub x_max: f32,
}

/// Axis-aligned box around a laid-out string, in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl TextBounds {
    /// Offset that moves the text so its box is centered on the origin the
    /// way labels are anchored (half of the max corner on each axis).
    pub fn centering_offset(&self) -> Vec3 {
        -self.max * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Parsed typeface.
#[derive(Clone, Debug)]
pub struct FontFace {
    pub family: String,
    pub resolution: f32,
    pub ascender: f32,
    pub descender: f32,
    glyphs: HashMap<char, GlyphMetrics>,
    /// Used for characters the face does not define.
    missing: GlyphMetrics,
}

impl FontFace {
    /// Parse typeface JSON bytes.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LoadError> {
        let file: TypefaceFile = serde_json::from_slice(bytes)?;
        if !(file.resolution.is_finite() && file.resolution > 0.0) {
            return Err(LoadError::InvalidFont(format!(
                "resolution {} is not positive",
                file.resolution
            )));
        }

        let mut glyphs = HashMap::with_capacity(file.glyphs.len());
        for (key, glyph) in file.glyphs {
            let mut chars = key.chars();
            if let (Some(c), None) = (chars.next(), chars.next()) {
                glyphs.insert(
                    c,
                    GlyphMetrics {
                        advance: glyph.ha,
                        x_min: glyph.x_min,
                        x_max: glyph.x_max,
                    },
                );
            }
        }
        if glyphs.is_empty() {
            return Err(LoadError::InvalidFont("no glyphs".to_string()));
        }

        let missing = glyphs.get(&'?').copied().unwrap_or(GlyphMetrics {
            advance: file.resolution * 0.5,
            x_min: 0.0,
            x_max: file.resolution * 0.5,
        });

        Ok(Self {
            family: file.family_name,
            resolution: file.resolution,
            ascender: file.ascender,
            descender: file.descender,
            glyphs,
            missing,
        })
    }

    /// A fixed-pitch face used when no typeface file can be loaded.
    pub fn builtin() -> Self {
        let resolution = 1000.0;
        let cell = GlyphMetrics {
            advance: 600.0,
            x_min: 50.0,
            x_max: 550.0,
        };
        let glyphs = (' '..='~')
            .map(|c| {
                let metrics = if c == ' ' {
                    GlyphMetrics {
                        x_min: 0.0,
                        x_max: 0.0,
                        ..cell
                    }
                } else {
                    cell
                };
                (c, metrics)
            })
            .collect();
        Self {
            family: "builtin-mono".to_string(),
            resolution,
            ascender: 800.0,
            descender: -200.0,
            glyphs,
            missing: cell,
        }
    }

    pub fn glyph(&self, c: char) -> GlyphMetrics {
        self.glyphs.get(&c).copied().unwrap_or(self.missing)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    /// Bounding box of `text` set at `size` world units per em and extruded
    /// `depth` deep. Single line; newlines are treated like any other glyph.
    pub fn measure(&self, text: &str, size: f32, depth: f32) -> TextBounds {
        let scale = size / self.resolution;
        let mut pen = 0.0f32;
        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;

        for c in text.chars() {
            let glyph = self.glyph(c);
            if glyph.x_max > glyph.x_min {
                min_x = min_x.min(pen + glyph.x_min * scale);
                max_x = max_x.max(pen + glyph.x_max * scale);
            }
            pen += glyph.advance * scale;
        }

        if min_x > max_x {
            return TextBounds {
                min: Vec3::ZERO,
                max: Vec3::new(0.0, 0.0, depth),
            };
        }

        TextBounds {
            min: Vec3::new(min_x, self.descender.min(0.0) * scale, 0.0),
            max: Vec3::new(max_x, self.ascender.max(0.0) * scale, depth),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TYPEFACE: &str = r#"{
        "glyphs": {
            "S": { "ha": 700, "x_min": 40, "x_max": 660, "o": "m 0 0 l 1 1" },
            "u": { "ha": 600, "x_min": 60, "x_max": 540, "o": "" },
            "n": { "ha": 600, "x_min": 60, "x_max": 540 },
            " ": { "ha": 300 }
        },
        "familyName": "Test Sans",
        "ascender": 900,
        "descender": -250,
        "boundingBox": { "yMin": -250, "xMin": 0, "yMax": 900, "xMax": 1000 },
        "resolution": 1000
    }"#;

    #[test]
    fn test_parse_typeface() {
        let face = FontFace::from_json(TYPEFACE.as_bytes()).unwrap();
        assert_eq!(face.family, "Test Sans");
        assert_eq!(face.glyph_count(), 4);
        assert_eq!(face.glyph('S').advance, 700.0);
    }

    #[test]
    fn test_measure_sun() {
        let face = FontFace::from_json(TYPEFACE.as_bytes()).unwrap();
        let bounds = face.measure("Sun", 1.0, 0.2);
        // S: 0.04..0.66, u: 0.76..1.24, n: 1.36..1.84
        assert!((bounds.min.x - 0.04).abs() < 1e-5);
        assert!((bounds.max.x - 1.84).abs() < 1e-5);
        assert!((bounds.max.y - 0.9).abs() < 1e-5);
        assert!((bounds.min.y + 0.25).abs() < 1e-5);
        assert!((bounds.max.z - 0.2).abs() < 1e-6);

        let offset = bounds.centering_offset();
        assert!((offset.x + 0.92).abs() < 1e-5);
    }

    #[test]
    fn test_measure_scales_with_size() {
        let face = FontFace::from_json(TYPEFACE.as_bytes()).unwrap();
        let big = face.measure("Sun", 1.0, 0.0);
        let small = face.measure("Sun", 0.3, 0.0);
        assert!((small.max.x - big.max.x * 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_blank_text_has_empty_box() {
        let face = FontFace::builtin();
        let bounds = face.measure("   ", 1.0, 0.05);
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(0.0, 0.0, 0.05));
    }

    #[test]
    fn test_missing_glyph_uses_fallback_advance() {
        let face = FontFace::builtin();
        let bounds = face.measure("é", 1.0, 0.0);
        assert!(bounds.max.x > 0.0);
    }

    #[test]
    fn test_rejects_bad_resolution_and_empty_glyphs() {
        let zero_res = r#"{ "glyphs": { "a": { "ha": 1 } }, "resolution": 0 }"#;
        assert!(matches!(
            FontFace::from_json(zero_res.as_bytes()),
            Err(LoadError::InvalidFont(_))
        ));
        let empty = r#"{ "glyphs": {} }"#;
        assert!(matches!(
            FontFace::from_json(empty.as_bytes()),
            Err(LoadError::InvalidFont(_))
        ));
        assert!(matches!(
            FontFace::from_json(b"{"),
            Err(LoadError::FontParse(_))
        ));
    }
}
