//! The live scene: every entity plus group visibility.

use std::sync::Arc;

use helios_assets::FontFace;
use helios_params::{Color, names};
use tracing::debug;

use crate::catalog::AXES_SIZE;
use crate::entity::{
    Axes, BodyId, CelestialBody, Label, OrbitGuide, RingSet, RingSetId, Satellite, Shell, Sun,
    TitleText,
};
use crate::lighting::LightRig;
use crate::material::Material;
use crate::starfield::Starfield;

// ---------------------------------------------------------------------------
// Visibility groups
// ---------------------------------------------------------------------------

/// Entity groups that can be shown or hidden as a whole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    Orbits,
    Stars,
    Axes,
    SaturnRings,
    PlanetLabels,
    Atmosphere,
    Moon,
    SunEffects,
}

impl Group {
    pub const ALL: [Group; 8] = [
        Group::Orbits,
        Group::Stars,
        Group::Axes,
        Group::SaturnRings,
        Group::PlanetLabels,
        Group::Atmosphere,
        Group::Moon,
        Group::SunEffects,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// The parameter knob that toggles this group.
    pub fn param_name(self) -> &'static str {
        match self {
            Group::Orbits => names::SHOW_ORBITS,
            Group::Stars => names::SHOW_STARS,
            Group::Axes => names::SHOW_AXES,
            Group::SaturnRings => names::SHOW_SATURN_RINGS,
            Group::PlanetLabels => names::SHOW_PLANET_LABELS,
            Group::Atmosphere => names::SHOW_ATMOSPHERE,
            Group::Moon => names::SHOW_MOON,
            Group::SunEffects => names::SHOW_SUN_EFFECTS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Visibility {
    shown: [bool; Group::ALL.len()],
}

impl Default for Visibility {
    /// Everything visible except the axes helper.
    fn default() -> Self {
        let mut v = Self {
            shown: [true; Group::ALL.len()],
        };
        v.set(Group::Axes, false);
        v
    }
}

impl Visibility {
    pub fn get(&self, group: Group) -> bool {
        self.shown[group.index()]
    }

    pub fn set(&mut self, group: Group, shown: bool) {
        self.shown[group.index()] = shown;
    }
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// All live entities. Bodies are stored in catalog order and never removed
/// while the scene lives, so a [`BodyId`] stays valid until [`Scene::clear`].
#[derive(Clone, Debug)]
pub struct Scene {
    pub background: Color,
    pub sun: Sun,
    pub bodies: Vec<CelestialBody>,
    pub ring_sets: Vec<RingSet>,
    pub satellite: Option<Satellite>,
    pub atmosphere: Option<Shell>,
    pub labels: Vec<Label>,
    pub title: Option<TitleText>,
    pub starfield: Option<Starfield>,
    pub orbit_guides: Vec<OrbitGuide>,
    pub axes: Axes,
    pub lights: LightRig,
    pub visibility: Visibility,
    pub planet_scale: f32,
    /// Typeface used for labels, once resolved.
    pub font: Option<Arc<FontFace>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::empty(Color::BLACK)
    }
}

impl Scene {
    /// A scene with only a bare sun and the lighting rig.
    pub fn empty(background: Color) -> Self {
        Self {
            background,
            sun: Sun {
                radius: crate::catalog::SUN_RADIUS,
                scale: 1.0,
                rotation_y: 0.0,
                material: Material::basic(crate::catalog::SUN_COLOR),
                shells: Vec::new(),
            },
            bodies: Vec::new(),
            ring_sets: Vec::new(),
            satellite: None,
            atmosphere: None,
            labels: Vec::new(),
            title: None,
            starfield: None,
            orbit_guides: Vec::new(),
            axes: Axes { size: AXES_SIZE },
            lights: LightRig::default(),
            visibility: Visibility::default(),
            planet_scale: 1.0,
            font: None,
        }
    }

    // --- Lookup ---

    pub fn body(&self, id: BodyId) -> Option<&CelestialBody> {
        self.bodies.get(id.0 as usize)
    }

    pub fn body_mut(&mut self, id: BodyId) -> Option<&mut CelestialBody> {
        self.bodies.get_mut(id.0 as usize)
    }

    /// Find a body by name. Linear; meant for build-time wiring only.
    pub fn body_id(&self, name: &str) -> Option<BodyId> {
        self.bodies
            .iter()
            .position(|b| b.name == name)
            .map(|i| BodyId(i as u32))
    }

    pub fn ring_set(&self, id: RingSetId) -> Option<&RingSet> {
        self.ring_sets.get(id.0 as usize)
    }

    pub fn label_for(&self, id: BodyId) -> Option<&Label> {
        self.labels.iter().find(|l| l.parent == id)
    }

    // --- Visibility ---

    pub fn is_visible(&self, group: Group) -> bool {
        self.visibility.get(group)
    }

    pub fn set_visible(&mut self, group: Group, shown: bool) {
        debug!(?group, shown, "group visibility changed");
        self.visibility.set(group, shown);
    }

    // --- Parameter effects ---

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Resize every body to `base × scale`, then the rings and atmosphere
    /// that depend on body radii.
    pub fn apply_planet_scale(&mut self, scale: f32) {
        self.planet_scale = scale;
        for body in &mut self.bodies {
            body.apply_scale(scale);
        }
        for set in &mut self.ring_sets {
            if let Some(parent) = self.bodies.get(set.parent.0 as usize) {
                set.regenerate(parent.radius);
            }
        }
        if let Some(shell) = &mut self.atmosphere {
            shell.scale = scale;
        }
    }

    /// Rescale the sun and its glow layers together.
    pub fn apply_sun_scale(&mut self, scale: f32) {
        self.sun.scale = scale;
        for shell in &mut self.sun.shells {
            shell.scale = scale * shell.scale_factor;
        }
    }

    pub fn apply_glow_intensity(&mut self, intensity: f32) {
        for shell in &mut self.sun.shells {
            shell.material.opacity = shell.base_opacity * intensity;
        }
    }

    pub fn set_atmosphere_opacity(&mut self, opacity: f32) {
        if let Some(shell) = &mut self.atmosphere {
            shell.base_opacity = opacity;
            shell.material.opacity = opacity;
        }
    }

    pub fn set_satellite_speed(&mut self, speed: f32) {
        if let Some(satellite) = &mut self.satellite {
            satellite.angular_speed = f64::from(speed);
        }
    }

    // --- Lifetime ---

    /// Drop every entity. Ids handed out before are invalid afterwards.
    pub fn clear(&mut self) {
        *self = Self::empty(self.background);
    }

    /// Entities the renderer would draw this frame.
    pub fn visible_entity_count(&self) -> usize {
        let shown = |group: Group, n: usize| if self.is_visible(group) { n } else { 0 };
        let rings: usize = self.ring_sets.iter().map(|s| s.rings.len()).sum();
        1 + self.bodies.len()
            + self.title.is_some() as usize
            + shown(Group::SunEffects, self.sun.shells.len())
            + shown(Group::SaturnRings, rings)
            + shown(Group::Moon, self.satellite.is_some() as usize)
            + shown(Group::Atmosphere, self.atmosphere.is_some() as usize)
            + shown(Group::PlanetLabels, self.labels.len())
            + shown(Group::Stars, self.starfield.is_some() as usize)
            + shown(Group::Orbits, self.orbit_guides.len())
            + shown(Group::Axes, 1)
    }
}
