//! Parameter values, kinds, and declarations.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// Linear-ish RGB color with components in `[0.0, 1.0]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` integer.
    pub const fn from_u32(packed: u32) -> Self {
        Self {
            r: ((packed >> 16) & 0xff) as f32 / 255.0,
            g: ((packed >> 8) & 0xff) as f32 / 255.0,
            b: (packed & 0xff) as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` (the leading `#` is optional).
    pub fn from_hex(text: &str) -> Option<Self> {
        let digits = text.trim().trim_start_matches('#');
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Self::from_u32)
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Quantize to 8-bit channels.
    pub fn to_rgb8(&self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Component-wise scale, clamped back into range.
    pub fn scaled(&self, factor: f32) -> Self {
        Self {
            r: (self.r * factor).clamp(0.0, 1.0),
            g: (self.g * factor).clamp(0.0, 1.0),
            b: (self.b * factor).clamp(0.0, 1.0),
        }
    }
}

// ---------------------------------------------------------------------------
// ParamKind / ParamValue
// ---------------------------------------------------------------------------

/// The declared type of a parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParamKind {
    Bool,
    Float,
    Color,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamKind::Bool => f.write_str("bool"),
            ParamKind::Float => f.write_str("float"),
            ParamKind::Color => f.write_str("color"),
        }
    }
}

/// A committed or proposed parameter value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Float(f32),
    Color(Color),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Float(_) => ParamKind::Float,
            ParamValue::Color(_) => ParamKind::Color,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParamValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match *self {
            ParamValue::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match *self {
            ParamValue::Color(c) => Some(c),
            _ => None,
        }
    }

    /// Parse panel/CLI text as a value of the given kind.
    pub fn parse(kind: ParamKind, text: &str) -> Option<Self> {
        let text = text.trim();
        match kind {
            ParamKind::Bool => match text.to_ascii_lowercase().as_str() {
                "true" | "on" | "1" => Some(ParamValue::Bool(true)),
                "false" | "off" | "0" => Some(ParamValue::Bool(false)),
                _ => None,
            },
            ParamKind::Float => text.parse::<f32>().ok().map(ParamValue::Float),
            ParamKind::Color => Color::from_hex(text).map(ParamValue::Color),
        }
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        ParamValue::Float(v)
    }
}

impl From<Color> for ParamValue {
    fn from(v: Color) -> Self {
        ParamValue::Color(v)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{b}"),
            ParamValue::Float(v) => write!(f, "{v}"),
            ParamValue::Color(c) => f.write_str(&c.to_hex()),
        }
    }
}

// ---------------------------------------------------------------------------
// ParamSpec
// ---------------------------------------------------------------------------

/// Declaration of one knob: its name, kind, inclusive range, and default.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    /// Inclusive `(min, max)` for float knobs.
    pub range: Option<(f32, f32)>,
    pub default: ParamValue,
}

impl ParamSpec {
    pub fn flag(name: &'static str, default: bool) -> Self {
        Self {
            name,
            kind: ParamKind::Bool,
            range: None,
            default: ParamValue::Bool(default),
        }
    }

    pub fn float(name: &'static str, min: f32, max: f32, default: f32) -> Self {
        Self {
            name,
            kind: ParamKind::Float,
            range: Some((min, max)),
            default: ParamValue::Float(default),
        }
    }

    pub fn color(name: &'static str, default: Color) -> Self {
        Self {
            name,
            kind: ParamKind::Color,
            range: None,
            default: ParamValue::Color(default),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let c = Color::from_hex("#000011").unwrap();
        assert_eq!(c.to_rgb8(), [0x00, 0x00, 0x11]);
        assert_eq!(c.to_hex(), "#000011");
        assert_eq!(Color::from_hex("ffaa00").unwrap().to_hex(), "#ffaa00");
    }

    #[test]
    fn test_bad_hex_rejected() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gg0000").is_none());
        assert!(Color::from_hex("").is_none());
    }

    #[test]
    fn test_parse_by_kind() {
        assert_eq!(
            ParamValue::parse(ParamKind::Bool, "off"),
            Some(ParamValue::Bool(false))
        );
        assert_eq!(
            ParamValue::parse(ParamKind::Float, " 2.5 "),
            Some(ParamValue::Float(2.5))
        );
        assert!(ParamValue::parse(ParamKind::Float, "fast").is_none());
        assert_eq!(
            ParamValue::parse(ParamKind::Color, "#ffffff"),
            Some(ParamValue::Color(Color::WHITE))
        );
    }
}
