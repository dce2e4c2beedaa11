//! Decoded RGBA textures.

use image::RgbaImage;

use crate::error::LoadError;

/// A CPU-side texture ready to hand to the rendering engine.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Path or generator name the pixels came from.
    pub label: String,
    pub image: RgbaImage,
}

impl Texture {
    pub fn from_image(label: impl Into<String>, image: RgbaImage) -> Self {
        Self {
            label: label.into(),
            image,
        }
    }

    /// Decode PNG or JPEG bytes (format sniffed from the header).
    pub fn decode(label: impl Into<String>, bytes: &[u8]) -> Result<Self, LoadError> {
        let image = image::load_from_memory(bytes)?.to_rgba8();
        Ok(Self::from_image(label, image))
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}
