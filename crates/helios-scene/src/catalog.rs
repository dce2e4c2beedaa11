//! Static table of the bodies in the system and their appearance.

use helios_assets::Fallback;
use helios_params::Color;

/// How a body's surface is shaded and whether it has a texture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceSpec {
    /// Plain shiny palette color, no texture.
    Palette,
    /// Palette color under a `/name.jpg` texture.
    Textured { fallback: Fallback },
    /// Physically based material with its own base color under a texture.
    Standard {
        color: Color,
        roughness: f32,
        fallback: Fallback,
    },
}

impl SurfaceSpec {
    pub fn fallback(&self) -> Option<Fallback> {
        match *self {
            SurfaceSpec::Palette => None,
            SurfaceSpec::Textured { fallback } | SurfaceSpec::Standard { fallback, .. } => {
                Some(fallback)
            }
        }
    }
}

/// One catalog entry.
#[derive(Clone, Debug, PartialEq)]
pub struct BodySpec {
    pub name: &'static str,
    /// Orbit radius around the origin.
    pub distance: f64,
    /// Radius at planet scale 1.
    pub size: f32,
    /// Orbital angle advanced per tick at animation speed 1.
    pub speed: f64,
    /// Palette color.
    pub color: Color,
    pub surface: SurfaceSpec,
    pub has_rings: bool,
}

impl BodySpec {
    /// Texture key, which is also the file stem (`earth` → `/earth.jpg`).
    pub fn texture_key(&self) -> Option<String> {
        self.surface
            .fallback()
            .map(|_| self.name.to_ascii_lowercase())
    }
}

// --- Fixed content ---

pub const SUN_RADIUS: f32 = 3.0;
pub const SUN_COLOR: Color = Color::from_u32(0xffaa00);
pub const SUN_EMISSIVE_INTENSITY: f32 = 1.2;

/// `(radius, scale multiplier, opacity, spin per tick)` for the glow layers.
pub const SUN_SHELLS: [(f32, f32, f32, f32); 3] = [
    (4.0, 1.2, 0.3, 0.002),
    (5.0, 1.5, 0.1, 0.001),
    (6.0, 2.0, 0.05, 0.0005),
];

pub const MOON_PARENT: &str = "Earth";
pub const MOON_RADIUS: f32 = 0.27;
pub const MOON_DISTANCE: f64 = 3.5;
pub const MOON_COLOR: Color = Color::from_u32(0xcccccc);
pub const MOON_EMISSIVE: Color = Color::from_u32(0x222222);

pub const ATMOSPHERE_PARENT: &str = "Earth";
/// Atmosphere radius relative to its parent's rendered radius.
pub const ATMOSPHERE_SCALE: f32 = 1.05;
pub const ATMOSPHERE_COLOR: Color = Color::from_u32(0x4da6ff);

/// `(inner, outer, opacity)` of each ring as multiples of the parent radius.
pub const RING_BANDS: [(f32, f32, f32); 3] = [(1.2, 1.8, 0.6), (1.8, 2.2, 0.4), (2.2, 2.6, 0.3)];
pub const RING_COLOR: Color = Color::from_u32(0xf4e4bc);
/// Ring tilt offsets are drawn from `[0, RING_MAX_TILT)`.
pub const RING_MAX_TILT: f32 = 0.1;

pub const ORBIT_GUIDE_HALF_WIDTH: f32 = 0.1;
pub const ORBIT_GUIDE_COLOR: Color = Color::from_u32(0x444444);
pub const ORBIT_GUIDE_OPACITY: f32 = 0.3;

pub const AXES_SIZE: f32 = 10.0;

pub const TITLE_TEXT: &str = "Sun";
pub const TITLE_POSITION: [f32; 3] = [0.0, 8.0, 0.0];
pub const TITLE_SIZE: f32 = 1.0;
pub const TITLE_DEPTH: f32 = 0.2;
pub const TITLE_COLOR: Color = Color::from_u32(0x4caf50);

pub const LABEL_SIZE: f32 = 0.3;
pub const LABEL_DEPTH: f32 = 0.05;
pub const LABEL_OPACITY: f32 = 0.9;
/// Gap between a body's surface and its label.
pub const LABEL_CLEARANCE: f32 = 1.0;

/// The ordered body table.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalog {
    bodies: Vec<BodySpec>,
}

impl Catalog {
    pub fn new(bodies: Vec<BodySpec>) -> Self {
        Self { bodies }
    }

    /// The eight planets.
    pub fn solar_system() -> Self {
        fn textured(hex: u32) -> SurfaceSpec {
            let color = Color::from_u32(hex);
            SurfaceSpec::Textured {
                fallback: Fallback::Banded(color.to_rgb8()),
            }
        }
        fn planet(
            name: &'static str,
            distance: f64,
            size: f32,
            speed: f64,
            hex: u32,
        ) -> BodySpec {
            BodySpec {
                name,
                distance,
                size,
                speed,
                color: Color::from_u32(hex),
                surface: textured(hex),
                has_rings: false,
            }
        }

        Self::new(vec![
            planet("Mercury", 15.0, 0.38, 0.02, 0x8c7853),
            planet("Venus", 25.0, 0.95, 0.015, 0xffc649),
            BodySpec {
                surface: SurfaceSpec::Standard {
                    color: Color::from_u32(0x4a90e2),
                    roughness: 0.7,
                    fallback: Fallback::EarthLike,
                },
                ..planet("Earth", 35.0, 1.0, 0.01, 0x6b93d6)
            },
            BodySpec {
                surface: SurfaceSpec::Palette,
                ..planet("Mars", 50.0, 0.53, 0.008, 0xc1440e)
            },
            planet("Jupiter", 80.0, 11.2, 0.005, 0xd8ca9d),
            BodySpec {
                has_rings: true,
                ..planet("Saturn", 120.0, 9.4, 0.003, 0xfad5a5)
            },
            planet("Uranus", 160.0, 4.0, 0.002, 0x4fd0e7),
            planet("Neptune", 200.0, 3.9, 0.001, 0x4b70dd),
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = &BodySpec> {
        self.bodies.iter()
    }

    pub fn find(&self, name: &str) -> Option<&BodySpec> {
        self.bodies.iter().find(|b| b.name == name)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::solar_system()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solar_system_order_and_values() {
        let catalog = Catalog::solar_system();
        let names: Vec<_> = catalog.iter().map(|b| b.name).collect();
        assert_eq!(
            names,
            ["Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
        let earth = catalog.find("Earth").unwrap();
        assert_eq!((earth.distance, earth.size, earth.speed), (35.0, 1.0, 0.01));
        assert!(catalog.iter().all(|b| b.distance > 0.0 && b.size > 0.0));
    }

    #[test]
    fn test_only_saturn_has_rings() {
        let catalog = Catalog::solar_system();
        let ringed: Vec<_> = catalog.iter().filter(|b| b.has_rings).map(|b| b.name).collect();
        assert_eq!(ringed, ["Saturn"]);
    }

    #[test]
    fn test_texture_keys() {
        let catalog = Catalog::solar_system();
        assert_eq!(catalog.find("Earth").unwrap().texture_key().as_deref(), Some("earth"));
        assert_eq!(catalog.find("Mars").unwrap().texture_key(), None);
        assert_eq!(
            catalog.find("Earth").unwrap().surface.fallback(),
            Some(Fallback::EarthLike)
        );
    }
}
