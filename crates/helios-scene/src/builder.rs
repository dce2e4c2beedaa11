//! Scene construction and late attachment of asynchronously loaded content.
//!
//! The builder is the only place that adds entities to a [`Scene`]. Bodies,
//! rings, guides and the starfield are created up front; textures are bound
//! and text entities created later, as the asset resolver delivers them.

use std::f64::consts::TAU;
use std::sync::Arc;

use glam::{DVec3, Vec3};
use helios_assets::{
    AssetRequest, AssetResolver, AssetState, FontFace, HandleId, Resolved, Resource, ResourceOrigin,
};
use helios_params::{Color, ParameterStore, names};
use rand::Rng;
use tracing::{debug, info};

use crate::catalog::*;
use crate::entity::{
    BodyId, CelestialBody, Label, OrbitGuide, RingSet, RingSetId, Satellite, Shell, Sun, TextMesh,
    TitleText,
};
use crate::material::{Material, Side};
use crate::render::RenderBackend;
use crate::scene::{Group, Scene, Visibility};
use crate::starfield::Starfield;

/// Consumer tokens the scene registers with the asset resolver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetTarget {
    /// The surface material of a body.
    Body(BodyId),
    /// Labels and the title text.
    Font,
}

/// Parameter values and build-only settings the builder reads once.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildSettings {
    pub planet_scale: f32,
    pub sun_scale: f32,
    pub sun_glow_intensity: f32,
    pub atmosphere_opacity: f32,
    pub moon_orbit_speed: f32,
    pub background: Color,
    pub visibility: Visibility,
    pub star_count: u32,
    pub star_spread: f32,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            planet_scale: 1.0,
            sun_scale: 1.0,
            sun_glow_intensity: 1.0,
            atmosphere_opacity: 0.3,
            moon_orbit_speed: 0.05,
            background: Color::from_u32(0x000011),
            visibility: Visibility::default(),
            star_count: 1000,
            star_spread: 200.0,
        }
    }
}

impl BuildSettings {
    /// Snapshot the committed knob values. Star settings keep their defaults.
    pub fn from_params<C>(params: &ParameterStore<C>) -> Self {
        let mut visibility = Visibility::default();
        for group in Group::ALL {
            visibility.set(group, params.flag(group.param_name()));
        }
        Self {
            planet_scale: params.float(names::PLANET_SCALE),
            sun_scale: params.float(names::SUN_SCALE),
            sun_glow_intensity: params.float(names::SUN_GLOW_INTENSITY),
            atmosphere_opacity: params.float(names::ATMOSPHERE_OPACITY),
            moon_orbit_speed: params.float(names::MOON_ORBIT_SPEED),
            background: params
                .color(names::BACKGROUND_COLOR)
                .unwrap_or(Color::BLACK),
            visibility,
            ..Self::default()
        }
    }

    pub fn with_starfield(mut self, count: u32, spread: f32) -> Self {
        self.star_count = count;
        self.star_spread = spread;
        self
    }
}

/// Turns a [`Catalog`] into a live [`Scene`].
#[derive(Clone, Debug, Default)]
pub struct SceneBuilder {
    catalog: Catalog,
}

impl SceneBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Build every entity. The only randomness is one initial orbital angle
    /// per body, the ring tilts, and the star positions, all drawn from `rng`.
    ///
    /// `showMoon` is read here and only here: with it off, no satellite is
    /// ever allocated for this scene.
    pub fn build<R: Rng>(&self, settings: &BuildSettings, rng: &mut R) -> Scene {
        let mut scene = Scene::empty(settings.background);
        scene.visibility = settings.visibility;
        scene.planet_scale = settings.planet_scale;
        scene.sun = build_sun(settings);

        for (index, spec) in self.catalog.iter().enumerate() {
            let id = BodyId(index as u32);
            let current_angle = rng.random_range(0.0..TAU);
            let radius = spec.size * settings.planet_scale;
            let mut body = CelestialBody {
                name: spec.name.to_string(),
                orbital_distance: spec.distance,
                base_radius: spec.size,
                radius,
                angular_speed: spec.speed,
                current_angle,
                self_rotation: 0.0,
                position: DVec3::ZERO,
                material: surface_material(spec),
                ring_system: None,
            };
            body.position = body.orbit_position();

            if spec.has_rings {
                let tilts: Vec<f32> = RING_BANDS
                    .iter()
                    .map(|_| rng.random_range(0.0..RING_MAX_TILT))
                    .collect();
                let material = Material::basic(RING_COLOR).translucent(1.0, Side::Double);
                let mut set = RingSet::new(id, radius, &tilts, material);
                set.position = body.render_position();
                body.ring_system = Some(RingSetId(scene.ring_sets.len() as u32));
                scene.ring_sets.push(set);
            }

            scene.orbit_guides.push(OrbitGuide {
                radius: spec.distance as f32,
                inner_radius: spec.distance as f32 - ORBIT_GUIDE_HALF_WIDTH,
                outer_radius: spec.distance as f32 + ORBIT_GUIDE_HALF_WIDTH,
                material: Material::basic(ORBIT_GUIDE_COLOR)
                    .translucent(ORBIT_GUIDE_OPACITY, Side::Double),
            });
            scene.bodies.push(body);
        }

        if settings.visibility.get(Group::Moon) {
            scene.satellite = build_moon(&scene, settings);
        }
        scene.atmosphere = build_atmosphere(&scene, settings);
        scene.starfield = Some(Starfield::generate(
            rng,
            settings.star_count,
            settings.star_spread,
        ));

        info!(
            bodies = scene.bodies.len(),
            ring_sets = scene.ring_sets.len(),
            satellite = scene.satellite.is_some(),
            stars = settings.star_count,
            "scene built"
        );
        scene
    }

    /// Request every texture and the label font, registering the scene's
    /// entities as consumers. Anything already loaded is applied at once.
    pub fn request_assets(
        &self,
        scene: &mut Scene,
        resolver: &mut AssetResolver<AssetTarget>,
        font_path: &str,
        backend: &dyn RenderBackend,
    ) {
        for (index, spec) in self.catalog.iter().enumerate() {
            let (Some(key), Some(fallback)) = (spec.texture_key(), spec.surface.fallback()) else {
                continue;
            };
            let id = BodyId(index as u32);
            let handle = resolver.request(AssetRequest::texture(&key, fallback));
            if let Some(body) = scene.body_mut(id) {
                body.material.texture.handle = Some(handle);
            }
            if let Some(resource) = resolver.subscribe(handle, AssetTarget::Body(id)) {
                let origin = loaded_origin(resolver, handle);
                self.apply(scene, AssetTarget::Body(id), &resource, origin, backend);
            }
        }

        let font = resolver.request(AssetRequest::font(font_path));
        if let Some(resource) = resolver.subscribe(font, AssetTarget::Font) {
            let origin = loaded_origin(resolver, font);
            self.apply(scene, AssetTarget::Font, &resource, origin, backend);
        }
    }

    /// Deliver a resolved asset to each consumer that was waiting for it.
    pub fn apply_resolved(
        &self,
        scene: &mut Scene,
        resolved: &Resolved<AssetTarget>,
        backend: &dyn RenderBackend,
    ) {
        for &target in &resolved.consumers {
            self.apply(scene, target, &resolved.resource, resolved.origin, backend);
        }
    }

    fn apply(
        &self,
        scene: &mut Scene,
        target: AssetTarget,
        resource: &Resource,
        origin: ResourceOrigin,
        backend: &dyn RenderBackend,
    ) {
        match (target, resource) {
            (AssetTarget::Body(id), Resource::Texture(texture)) => {
                if let Some(body) = scene.body_mut(id) {
                    body.material.bind_texture(Arc::clone(texture), origin);
                    debug!(body = %body.name, ?origin, "texture bound");
                }
            }
            (AssetTarget::Font, Resource::Font(font)) => {
                self.attach_text(scene, Arc::clone(font), backend);
            }
            (target, resource) => {
                debug!(?target, kind = ?resource.kind(), "resource kind does not fit consumer");
            }
        }
    }

    /// Create the title and one label per catalog body that exists in the
    /// scene and has none yet. Bodies are found by name.
    pub fn attach_text(&self, scene: &mut Scene, font: Arc<FontFace>, backend: &dyn RenderBackend) {
        let mut created = 0usize;
        for spec in self.catalog.iter() {
            let Some(id) = scene.body_id(spec.name) else {
                continue;
            };
            if scene.label_for(id).is_some() {
                continue;
            }
            let Some(body) = scene.body(id) else {
                continue;
            };
            let bounds = backend.measure_text(&font, spec.name, LABEL_SIZE, LABEL_DEPTH);
            let label = Label {
                parent: id,
                mesh: TextMesh::new(spec.name, LABEL_SIZE, LABEL_DEPTH, bounds),
                position: body.label_anchor(),
                material: Material::basic(Color::WHITE).translucent(LABEL_OPACITY, Side::Front),
            };
            scene.labels.push(label);
            created += 1;
        }

        if scene.title.is_none() {
            let bounds = backend.measure_text(&font, TITLE_TEXT, TITLE_SIZE, TITLE_DEPTH);
            scene.title = Some(TitleText {
                mesh: TextMesh::new(TITLE_TEXT, TITLE_SIZE, TITLE_DEPTH, bounds),
                position: Vec3::from_array(TITLE_POSITION),
                rotation_y: 0.0,
                material: Material::lambert(TITLE_COLOR),
            });
        }

        debug!(labels = created, family = %font.family, "text attached");
        scene.font = Some(font);
    }
}

fn loaded_origin(resolver: &AssetResolver<AssetTarget>, handle: HandleId) -> ResourceOrigin {
    match resolver.state(handle) {
        Some(AssetState::Loaded(origin)) => origin,
        _ => ResourceOrigin::Primary,
    }
}

fn surface_material(spec: &BodySpec) -> Material {
    match spec.surface {
        SurfaceSpec::Palette | SurfaceSpec::Textured { .. } => Material::phong(spec.color, 30.0),
        SurfaceSpec::Standard {
            color, roughness, ..
        } => Material::standard(color, roughness),
    }
}

fn build_sun(settings: &BuildSettings) -> Sun {
    const SHELL_NAMES: [&str; 3] = ["glow", "corona", "outer-corona"];
    let shells = SUN_SHELLS
        .iter()
        .zip(SHELL_NAMES)
        .map(|(&(base_radius, scale_factor, base_opacity, spin_rate), name)| Shell {
            name,
            anchor: None,
            base_radius,
            scale_factor,
            scale: settings.sun_scale * scale_factor,
            base_opacity,
            spin_rate,
            rotation_y: 0.0,
            position: Vec3::ZERO,
            material: Material::basic(SUN_COLOR)
                .translucent(base_opacity * settings.sun_glow_intensity, Side::Back),
        })
        .collect();

    Sun {
        radius: SUN_RADIUS,
        scale: settings.sun_scale,
        rotation_y: 0.0,
        material: Material::basic(SUN_COLOR).with_emissive(SUN_COLOR, SUN_EMISSIVE_INTENSITY),
        shells,
    }
}

fn build_moon(scene: &Scene, settings: &BuildSettings) -> Option<Satellite> {
    let parent = scene.body_id(MOON_PARENT)?;
    let parent_position = scene.body(parent)?.position;
    let mut moon = Satellite {
        name: "Moon".to_string(),
        parent,
        orbital_distance: MOON_DISTANCE,
        radius: MOON_RADIUS,
        angular_speed: f64::from(settings.moon_orbit_speed),
        angle: 0.0,
        position: DVec3::ZERO,
        material: Material::phong(MOON_COLOR, 10.0).with_emissive(MOON_EMISSIVE, 1.0),
    };
    moon.position = moon.position_around(parent_position);
    Some(moon)
}

fn build_atmosphere(scene: &Scene, settings: &BuildSettings) -> Option<Shell> {
    let anchor = scene.body_id(ATMOSPHERE_PARENT)?;
    let parent = scene.body(anchor)?;
    Some(Shell {
        name: "atmosphere",
        anchor: Some(anchor),
        base_radius: parent.base_radius * ATMOSPHERE_SCALE,
        scale_factor: 1.0,
        scale: settings.planet_scale,
        base_opacity: settings.atmosphere_opacity,
        spin_rate: 0.0,
        rotation_y: 0.0,
        position: parent.render_position(),
        material: Material::phong(ATMOSPHERE_COLOR, 30.0)
            .translucent(settings.atmosphere_opacity, Side::Back),
    })
}
