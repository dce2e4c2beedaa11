//! Application assembly: the live scene, the parameter store, the asset
//! resolver and the animation driver, advanced one frame at a time.

use std::sync::Arc;

use helios_animation::{AnimationDriver, Clock, FrameParams, SystemClock};
use helios_assets::{AssetResolver, AssetSource, default_worker_count};
use helios_camera::CameraRig;
use helios_config::{Config, SceneConfig};
use helios_params::{
    Color, InvalidParameter, InvalidReason, ParamValue, ParameterStore, names, standard_specs,
};
use helios_scene::{AssetTarget, BuildSettings, Catalog, RenderBackend, Scene, SceneBuilder};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::input::{Action, InputMap, Key, Pointer};
use crate::reactions::{SceneState, register_reactions};

/// The running visualization.
pub struct Orrery<B: RenderBackend, K: Clock = SystemClock> {
    params: ParameterStore<SceneState>,
    state: SceneState,
    resolver: AssetResolver<AssetTarget>,
    builder: SceneBuilder,
    driver: AnimationDriver<K>,
    backend: B,
    input: InputMap,
    rng: ChaCha8Rng,
    seed: u64,
    font_path: String,
    star_count: u32,
    star_spread: f32,
    viewport_height: f32,
    live: bool,
}

impl<B: RenderBackend, K: Clock> Orrery<B, K> {
    /// Seed the parameter store from `config`, build the scene, and start
    /// loading its assets.
    pub fn new(config: &Config, source: Arc<dyn AssetSource>, backend: B, clock: K) -> Self {
        let mut params = ParameterStore::with_specs(standard_specs());
        preset_from_config(&mut params, &config.scene);
        if let Err(err) = register_reactions(&mut params) {
            warn!(%err, "parameter reaction not registered");
        }

        let workers = config
            .assets
            .worker_count
            .unwrap_or_else(default_worker_count);
        let seed = config.scene.seed.unwrap_or_else(|| rand::rng().random());
        info!(seed, workers, "starting orrery");

        let mut orrery = Self {
            params,
            state: SceneState::default(),
            resolver: AssetResolver::new(source, workers),
            builder: SceneBuilder::new(Catalog::solar_system()),
            driver: AnimationDriver::new(clock),
            backend,
            input: InputMap::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
            font_path: config.assets.font_path.clone(),
            star_count: config.scene.star_count,
            star_spread: config.scene.star_spread,
            viewport_height: config.window.height as f32,
            live: false,
        };
        orrery.set_viewport(config.window.width, config.window.height);
        orrery.build_scene();
        orrery
    }

    /// Build a fresh scene from the committed knob values.
    pub fn build_scene(&mut self) {
        let settings = BuildSettings::from_params(&self.params)
            .with_starfield(self.star_count, self.star_spread);
        self.state.scene = self.builder.build(&settings, &mut self.rng);
        self.builder.request_assets(
            &mut self.state.scene,
            &mut self.resolver,
            &self.font_path,
            &self.backend,
        );

        let rig = &mut self.state.rig;
        rig.set_auto_rotate(self.params.flag(names::CAMERA_AUTO_ROTATE));
        rig.set_auto_rotate_speed(self.params.float(names::CAMERA_AUTO_ROTATE_SPEED));
        rig.set_cinematic(self.params.flag(names::CINEMATIC_MODE));
        self.live = true;
    }

    /// One display refresh: apply finished loads, tick, render. Nothing
    /// happens after [`teardown`](Self::teardown).
    pub fn frame(&mut self, dt: f32) {
        if !self.live {
            return;
        }
        for resolved in self.resolver.poll() {
            debug!(key = %resolved.key, consumers = resolved.consumers.len(), "applying asset");
            self.builder
                .apply_resolved(&mut self.state.scene, &resolved, &self.backend);
        }

        let frame_params = FrameParams::from_store(&self.params);
        self.driver.tick(
            dt,
            &mut self.state.scene,
            &mut self.state.rig,
            &frame_params,
        );
        self.backend.render(&self.state.scene, &self.state.rig.camera);
    }

    /// Drop the scene and invalidate every in-flight load.
    pub fn teardown(&mut self) {
        self.resolver.reset();
        self.state.scene.clear();
        self.live = false;
        info!("orrery torn down");
    }

    // --- Parameters ---

    /// Write a knob. Rejected writes are logged and leave the old value.
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) -> Result<(), InvalidParameter> {
        self.params
            .set(name, value, &mut self.state)
            .inspect_err(|err| warn!(%err, "parameter edit rejected"))
    }

    /// Write a knob from text, parsed according to its kind.
    pub fn set_from_str(&mut self, name: &str, text: &str) -> Result<(), InvalidParameter> {
        self.params
            .set_from_str(name, text, &mut self.state)
            .inspect_err(|err| warn!(%err, "parameter edit rejected"))
    }

    /// Apply a `name=value` edit.
    pub fn apply_edit(&mut self, edit: &str) -> Result<(), InvalidParameter> {
        match edit.split_once('=') {
            Some((name, text)) => self.set_from_str(name.trim(), text.trim()),
            None => {
                let err = InvalidParameter::new(edit, InvalidReason::Unparseable(edit.to_string()));
                warn!(%err, "parameter edit rejected");
                Err(err)
            }
        }
    }

    /// Apply edits in order, continuing past rejected ones. Returns how many
    /// were committed.
    pub fn apply_edits<S: AsRef<str>>(&mut self, edits: &[S]) -> usize {
        edits
            .iter()
            .filter(|edit| self.apply_edit(edit.as_ref()).is_ok())
            .count()
    }

    // --- Actions ---

    /// Flip Play/Pause through the store so its reaction runs.
    pub fn toggle_animation(&mut self) -> Result<(), InvalidParameter> {
        let playing = self.params.flag(names::IS_ANIMATING);
        self.set(names::IS_ANIMATING, !playing)
    }

    pub fn reset_camera(&mut self) {
        self.state.rig.reset();
        info!("camera reset");
    }

    /// Resize the drawable area. Pointer gestures are scaled by its height.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.viewport_height = height as f32;
        self.state.rig.camera.set_aspect_ratio(width as f32, height as f32);
    }

    /// Feed a pointer gesture to the orbit controls. It takes effect over the
    /// following frames as the damping releases it.
    pub fn handle_pointer(&mut self, pointer: Pointer) {
        let rig = &mut self.state.rig;
        match pointer {
            Pointer::Rotate { dx, dy } => {
                rig.controls.rotate_by_pixels(dx, dy, self.viewport_height);
            }
            Pointer::Pan { dx, dy } => {
                rig.controls
                    .pan_by_pixels(dx, dy, &rig.camera, self.viewport_height);
            }
            Pointer::Wheel(delta) => rig.controls.zoom_by_wheel(delta),
        }
    }

    /// Run the action bound to `key`, if any, and report which one ran.
    pub fn handle_key(&mut self, key: Key) -> Result<Option<Action>, InvalidParameter> {
        let Some(action) = self.input.action(key) else {
            return Ok(None);
        };
        match action {
            Action::ToggleAnimation => self.toggle_animation()?,
            Action::ResetCamera => self.reset_camera(),
        }
        Ok(Some(action))
    }

    // --- Accessors ---

    pub fn scene(&self) -> &Scene {
        &self.state.scene
    }

    pub fn rig(&self) -> &CameraRig {
        &self.state.rig
    }

    pub fn rig_mut(&mut self) -> &mut CameraRig {
        &mut self.state.rig
    }

    pub fn params(&self) -> &ParameterStore<SceneState> {
        &self.params
    }

    pub fn resolver(&self) -> &AssetResolver<AssetTarget> {
        &self.resolver
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn clock_mut(&mut self) -> &mut K {
        self.driver.clock_mut()
    }

    pub fn input_mut(&mut self) -> &mut InputMap {
        &mut self.input
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_live(&self) -> bool {
        self.live
    }
}

/// Commit configured initial values without running reactions; nothing
/// observes the store yet. Invalid entries keep their defaults.
fn preset_from_config(params: &mut ParameterStore<SceneState>, scene: &SceneConfig) {
    match Color::from_hex(&scene.background) {
        Some(color) => preset(params, names::BACKGROUND_COLOR, color.into()),
        None => warn!(background = %scene.background, "invalid background color in config"),
    }

    let flags = [
        (names::SHOW_ORBITS, scene.show_orbits),
        (names::SHOW_STARS, scene.show_stars),
        (names::SHOW_AXES, scene.show_axes),
        (names::SHOW_SATURN_RINGS, scene.show_saturn_rings),
        (names::SHOW_PLANET_LABELS, scene.show_planet_labels),
        (names::SHOW_ATMOSPHERE, scene.show_atmosphere),
        (names::SHOW_MOON, scene.show_moon),
        (names::SHOW_SUN_EFFECTS, scene.show_sun_effects),
        (names::CAMERA_AUTO_ROTATE, scene.camera_auto_rotate),
        (names::CINEMATIC_MODE, scene.cinematic_mode),
        (names::IS_ANIMATING, !scene.paused),
    ];
    for (name, value) in flags {
        preset(params, name, value.into());
    }

    let floats = [
        (names::PLANET_SCALE, scene.planet_scale),
        (names::SUN_SCALE, scene.sun_scale),
        (names::SUN_GLOW_INTENSITY, scene.sun_glow_intensity),
        (names::ANIMATION_SPEED, scene.animation_speed),
        (names::CAMERA_AUTO_ROTATE_SPEED, scene.camera_auto_rotate_speed),
    ];
    for (name, value) in floats {
        preset(params, name, value.into());
    }
}

fn preset(params: &mut ParameterStore<SceneState>, name: &str, value: ParamValue) {
    if let Err(err) = params.preset(name, value) {
        warn!(%err, "ignoring configured value");
    }
}
