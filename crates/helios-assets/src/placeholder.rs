//! Deterministic stand-ins for assets that could not be loaded.

use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::font::FontFace;
use crate::handle::Resource;
use crate::texture::Texture;

const EARTH_SIZE: u32 = 512;
const OCEAN: [u8; 3] = [0x4a, 0x90, 0xe2];
const COAST: [u8; 3] = [0x2e, 0x7d, 0x32];
const INLAND: [u8; 3] = [0x1b, 0x5e, 0x20];
const CONTINENT: [u8; 3] = [0x8b, 0xc3, 0x4a];
/// `(x, y, w, h)` blocks painted over the gradient.
const CONTINENTS: [(u32, u32, u32, u32); 3] = [(100, 150, 80, 60), (300, 200, 100, 80), (200, 300, 60, 40)];

const BANDED_WIDTH: u32 = 256;
const BANDED_HEIGHT: u32 = 128;
const BAND_COUNT: f32 = 9.0;

/// Generator run when both paths of a request fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fallback {
    /// Radial ocean-to-land gradient with three continent blocks.
    EarthLike,
    /// Horizontal light/dark bands around a base color.
    Banded([u8; 3]),
    /// Fixed-pitch built-in typeface.
    BuiltinFont,
}

impl Fallback {
    pub fn name(&self) -> &'static str {
        match self {
            Fallback::EarthLike => "placeholder:earth",
            Fallback::Banded(_) => "placeholder:banded",
            Fallback::BuiltinFont => "placeholder:font",
        }
    }

    /// Synthesize the placeholder resource.
    pub fn generate(&self) -> Resource {
        match *self {
            Fallback::EarthLike => Resource::Texture(Arc::new(earth_like())),
            Fallback::Banded(color) => Resource::Texture(Arc::new(banded(color))),
            Fallback::BuiltinFont => Resource::Font(Arc::new(FontFace::builtin())),
        }
    }
}

fn lerp_rgb(a: [u8; 3], b: [u8; 3], t: f32) -> [u8; 3] {
    let mut out = [0u8; 3];
    for i in 0..3 {
        let v = f32::from(a[i]) + (f32::from(b[i]) - f32::from(a[i])) * t;
        out[i] = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

fn opaque([r, g, b]: [u8; 3]) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

/// Ocean at the center fading to green at 70% of the radius and dark green
/// at the rim, with lighter continent blocks on top.
pub fn earth_like() -> Texture {
    let center = EARTH_SIZE as f32 / 2.0;
    let radius = EARTH_SIZE as f32 / 2.0;
    let mut image = RgbaImage::from_fn(EARTH_SIZE, EARTH_SIZE, |x, y| {
        let dx = x as f32 + 0.5 - center;
        let dy = y as f32 + 0.5 - center;
        let t = ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
        let rgb = if t <= 0.7 {
            lerp_rgb(OCEAN, COAST, t / 0.7)
        } else {
            lerp_rgb(COAST, INLAND, (t - 0.7) / 0.3)
        };
        opaque(rgb)
    });

    for (x0, y0, w, h) in CONTINENTS {
        for y in y0..(y0 + h).min(EARTH_SIZE) {
            for x in x0..(x0 + w).min(EARTH_SIZE) {
                image.put_pixel(x, y, opaque(CONTINENT));
            }
        }
    }
    Texture::from_image(Fallback::EarthLike.name(), image)
}

/// Gas-giant style bands: brightness swings ±25% around `base` down the image.
pub fn banded(base: [u8; 3]) -> Texture {
    let image = RgbaImage::from_fn(BANDED_WIDTH, BANDED_HEIGHT, |_, y| {
        let v = y as f32 / BANDED_HEIGHT as f32;
        let factor = 1.0 + 0.25 * (v * BAND_COUNT * std::f32::consts::PI).sin();
        let rgb = base.map(|c| (f32::from(c) * factor).round().clamp(0.0, 255.0) as u8);
        opaque(rgb)
    });
    Texture::from_image(Fallback::Banded(base).name(), image)
}
