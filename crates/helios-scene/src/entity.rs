//! Live scene entities.
//!
//! Dependent entities (rings, labels, the satellite, the atmosphere) refer to
//! their parent through a [`BodyId`] resolved once at build time. A reference
//! that does not resolve is skipped by the frame update, never an error.

use std::fmt;

use glam::{DVec3, Vec3};
use helios_assets::TextBounds;

use crate::catalog::{LABEL_CLEARANCE, RING_BANDS};
use crate::material::Material;

/// Index of a body in [`Scene::bodies`](crate::Scene::bodies).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "body#{}", self.0)
    }
}

/// Index of a ring set in [`Scene::ring_sets`](crate::Scene::ring_sets).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RingSetId(pub u32);

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub name: String,
    pub orbital_distance: f64,
    /// Radius at planet scale 1.
    pub base_radius: f32,
    /// Rendered radius: `base_radius × planetScale`.
    pub radius: f32,
    /// Orbital angle advanced per tick at animation speed 1.
    pub angular_speed: f64,
    /// Radians, accumulated in double precision. Only consumed through
    /// trigonometry, so never wrapped.
    pub current_angle: f64,
    /// Spin about +Y in radians, derived from the shared clock.
    pub self_rotation: f32,
    pub position: DVec3,
    pub material: Material,
    pub ring_system: Option<RingSetId>,
}

impl CelestialBody {
    /// Point on the orbit circle (plane y = 0) for the current angle.
    pub fn orbit_position(&self) -> DVec3 {
        polar(self.current_angle, self.orbital_distance)
    }

    /// Position narrowed for the entities that follow this body.
    pub fn render_position(&self) -> Vec3 {
        self.position.as_vec3()
    }

    pub fn apply_scale(&mut self, planet_scale: f32) {
        self.radius = self.base_radius * planet_scale;
    }

    /// Where a label for this body sits.
    pub fn label_anchor(&self) -> Vec3 {
        let position = self.render_position();
        Vec3::new(
            position.x,
            position.y + self.radius + LABEL_CLEARANCE,
            position.z,
        )
    }
}

/// Offset of `distance` along `angle` in the orbital plane.
pub fn polar(angle: f64, distance: f64) -> DVec3 {
    DVec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
}

/// A moon: orbits its parent's current position rather than the origin.
#[derive(Clone, Debug)]
pub struct Satellite {
    pub name: String,
    pub parent: BodyId,
    pub orbital_distance: f64,
    pub radius: f32,
    pub angular_speed: f64,
    pub angle: f64,
    pub position: DVec3,
    pub material: Material,
}

impl Satellite {
    pub fn position_around(&self, parent_position: DVec3) -> DVec3 {
        parent_position + polar(self.angle, self.orbital_distance)
    }
}

// ---------------------------------------------------------------------------
// Rings
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub opacity: f32,
    /// Extra rotation about the ring's local z.
    pub tilt_offset: f32,
}

/// Concentric rings bound to a parent body.
#[derive(Clone, Debug)]
pub struct RingSet {
    pub parent: BodyId,
    pub rings: Vec<Ring>,
    pub position: Vec3,
    /// Euler XYZ. `x` lays the rings flat; `y` follows the parent's spin.
    pub rotation: Vec3,
    pub material: Material,
}

impl RingSet {
    /// Rings sized from the parent's rendered radius. `tilts` supplies one
    /// offset per band; missing entries are zero.
    pub fn new(parent: BodyId, parent_radius: f32, tilts: &[f32], material: Material) -> Self {
        let rings = RING_BANDS
            .iter()
            .enumerate()
            .map(|(i, &(inner, outer, opacity))| Ring {
                inner_radius: inner * parent_radius,
                outer_radius: outer * parent_radius,
                opacity,
                tilt_offset: tilts.get(i).copied().unwrap_or(0.0),
            })
            .collect();
        Self {
            parent,
            rings,
            position: Vec3::ZERO,
            rotation: Vec3::new(-std::f32::consts::FRAC_PI_2, 0.0, 0.0),
            material,
        }
    }

    /// Resize every band for a new parent radius. Tilts are kept.
    pub fn regenerate(&mut self, parent_radius: f32) {
        for (ring, &(inner, outer, _)) in self.rings.iter_mut().zip(RING_BANDS.iter()) {
            ring.inner_radius = inner * parent_radius;
            ring.outer_radius = outer * parent_radius;
        }
    }
}

// ---------------------------------------------------------------------------
// Shells and the sun
// ---------------------------------------------------------------------------

/// A translucent sphere around the sun or a body: glow, corona, atmosphere.
#[derive(Clone, Debug)]
pub struct Shell {
    pub name: &'static str,
    /// Body the shell is centered on; `None` means the origin.
    pub anchor: Option<BodyId>,
    pub base_radius: f32,
    /// Multiplier applied on top of the owning scale knob.
    pub scale_factor: f32,
    /// Current uniform scale.
    pub scale: f32,
    /// Opacity at glow intensity 1.
    pub base_opacity: f32,
    /// Spin per tick at animation speed 1.
    pub spin_rate: f32,
    pub rotation_y: f32,
    pub position: Vec3,
    pub material: Material,
}

impl Shell {
    pub fn radius(&self) -> f32 {
        self.base_radius * self.scale
    }
}

#[derive(Clone, Debug)]
pub struct Sun {
    pub radius: f32,
    pub scale: f32,
    pub rotation_y: f32,
    pub material: Material,
    /// Glow and corona layers, innermost first.
    pub shells: Vec<Shell>,
}

impl Sun {
    pub fn rendered_radius(&self) -> f32 {
        self.radius * self.scale
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Extruded text geometry as far as the core cares: the string, its size,
/// and the box the engine reported for it.
#[derive(Clone, Debug)]
pub struct TextMesh {
    pub text: String,
    pub size: f32,
    pub depth: f32,
    pub bounds: TextBounds,
    /// Translation baked into the geometry to center it on its anchor.
    pub offset: Vec3,
}

impl TextMesh {
    pub fn new(text: impl Into<String>, size: f32, depth: f32, bounds: TextBounds) -> Self {
        Self {
            text: text.into(),
            size,
            depth,
            offset: bounds.centering_offset(),
            bounds,
        }
    }
}

/// A floating name tag. Its position is recomputed from the parent every tick.
#[derive(Clone, Debug)]
pub struct Label {
    pub parent: BodyId,
    pub mesh: TextMesh,
    pub position: Vec3,
    pub material: Material,
}

/// The wobbling title above the sun.
#[derive(Clone, Debug)]
pub struct TitleText {
    pub mesh: TextMesh,
    pub position: Vec3,
    pub rotation_y: f32,
    pub material: Material,
}

// ---------------------------------------------------------------------------
// Guides
// ---------------------------------------------------------------------------

/// Flat annulus tracing one orbit.
#[derive(Clone, Debug)]
pub struct OrbitGuide {
    pub radius: f32,
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub material: Material,
}

/// XYZ axis helper.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Axes {
    pub size: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use helios_params::Color;

    #[test]
    fn test_ring_set_regenerate_keeps_tilt() {
        let material = Material::basic(Color::WHITE);
        let mut set = RingSet::new(BodyId(5), 9.4, &[0.01, 0.02, 0.03], material);
        assert_eq!(set.rings.len(), 3);
        assert!((set.rings[0].inner_radius - 1.2 * 9.4).abs() < 1e-5);
        assert!((set.rings[2].outer_radius - 2.6 * 9.4).abs() < 1e-5);

        set.regenerate(18.8);
        assert!((set.rings[1].inner_radius - 1.8 * 18.8).abs() < 1e-4);
        assert_eq!(set.rings[1].tilt_offset, 0.02);
        assert_eq!(set.rings[2].opacity, 0.3);
    }

    #[test]
    fn test_satellite_position_around_parent() {
        let sat = Satellite {
            name: "Moon".into(),
            parent: BodyId(2),
            orbital_distance: 3.5,
            radius: 0.27,
            angular_speed: 0.05,
            angle: 0.0,
            position: DVec3::ZERO,
            material: Material::basic(Color::WHITE),
        };
        let p = sat.position_around(DVec3::new(35.0, 0.0, 0.0));
        assert!((p - DVec3::new(38.5, 0.0, 0.0)).length() < 1e-12);
    }

    #[test]
    fn test_polar_lies_on_circle() {
        for i in 0..16 {
            let p = polar(f64::from(i) * 0.4, 80.0);
            assert!((p.length() - 80.0).abs() < 1e-9);
            assert_eq!(p.y, 0.0);
        }
    }
}
