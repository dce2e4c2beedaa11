//! Surface descriptions handed to the rendering engine.

use std::sync::Arc;

use helios_assets::{HandleId, ResourceOrigin, Texture};
use helios_params::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shading {
    /// Unlit.
    Basic,
    Lambert,
    Phong {
        shininess: f32,
    },
    Standard {
        roughness: f32,
        metalness: f32,
    },
}

/// Which faces are drawn. Glow shells render their inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Front,
    Back,
    Double,
}

/// Texture binding of a material. `revision` increases every time a new
/// texture is bound so the engine knows to re-upload.
#[derive(Clone, Debug, Default)]
pub struct TextureSlot {
    pub handle: Option<HandleId>,
    pub texture: Option<Arc<Texture>>,
    pub origin: Option<ResourceOrigin>,
    pub revision: u32,
}

#[derive(Clone, Debug)]
pub struct Material {
    pub shading: Shading,
    pub color: Color,
    /// Emissive color and intensity.
    pub emissive: Option<(Color, f32)>,
    pub opacity: f32,
    pub transparent: bool,
    pub side: Side,
    pub texture: TextureSlot,
}

impl Material {
    pub fn basic(color: Color) -> Self {
        Self {
            shading: Shading::Basic,
            color,
            emissive: None,
            opacity: 1.0,
            transparent: false,
            side: Side::Front,
            texture: TextureSlot::default(),
        }
    }

    pub fn phong(color: Color, shininess: f32) -> Self {
        Self {
            shading: Shading::Phong { shininess },
            ..Self::basic(color)
        }
    }

    pub fn standard(color: Color, roughness: f32) -> Self {
        Self {
            shading: Shading::Standard {
                roughness,
                metalness: 0.0,
            },
            ..Self::basic(color)
        }
    }

    pub fn lambert(color: Color) -> Self {
        Self {
            shading: Shading::Lambert,
            ..Self::basic(color)
        }
    }

    /// Mark as alpha-blended at `opacity`.
    pub fn translucent(mut self, opacity: f32, side: Side) -> Self {
        self.transparent = true;
        self.opacity = opacity;
        self.side = side;
        self
    }

    pub fn with_emissive(mut self, color: Color, intensity: f32) -> Self {
        self.emissive = Some((color, intensity));
        self
    }

    /// Bind a resolved texture in place.
    pub fn bind_texture(&mut self, texture: Arc<Texture>, origin: ResourceOrigin) {
        self.texture.texture = Some(texture);
        self.texture.origin = Some(origin);
        self.texture.revision += 1;
    }

    pub fn has_texture(&self) -> bool {
        self.texture.texture.is_some()
    }
}
