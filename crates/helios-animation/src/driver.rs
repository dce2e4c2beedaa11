//! The animation driver.
//!
//! One [`AnimationDriver::tick`] per display refresh. The steps run in a
//! fixed order because later steps read positions written by earlier ones:
//!
//! 1. pause check (camera work below still runs while paused)
//! 2. sun, shell and atmosphere spin
//! 3. orbital angles, positions and clock-driven self-rotation
//! 4. the satellite, around its parent's updated position
//! 5. rings, labels and the atmosphere copy their parent's transform
//! 6. starfield and title, from the shared clock
//! 7. the cinematic sweep
//! 8. damped camera controls
//!
//! The driver has exclusive write access to entity transforms for the
//! duration of a tick.

use std::f32::consts::FRAC_PI_2;

use helios_camera::CameraRig;
use helios_params::{ParameterStore, names};
use helios_scene::{Scene, Starfield};
use tracing::trace;

use crate::clock::{Clock, SystemClock};

/// Self-rotation in radians per second of scaled elapsed time.
pub const SELF_ROTATION_RATE: f32 = 0.5;
/// Title wobble frequency and amplitude.
pub const TITLE_WOBBLE_RATE: f32 = 0.5;
pub const TITLE_WOBBLE_AMPLITUDE: f32 = 0.1;

/// The knob values a tick reads, snapshotted from the store once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameParams {
    pub is_animating: bool,
    pub animation_speed: f32,
    pub sun_rotation_speed: f32,
    pub earth_rotation_speed: f32,
}

impl Default for FrameParams {
    fn default() -> Self {
        Self {
            is_animating: true,
            animation_speed: 0.3,
            sun_rotation_speed: 0.01,
            earth_rotation_speed: 0.01,
        }
    }
}

impl FrameParams {
    pub fn from_store<C>(params: &ParameterStore<C>) -> Self {
        Self {
            is_animating: params.flag(names::IS_ANIMATING),
            animation_speed: params.float(names::ANIMATION_SPEED),
            sun_rotation_speed: params.float(names::SUN_ROTATION_SPEED),
            earth_rotation_speed: params.float(names::EARTH_ROTATION_SPEED),
        }
    }
}

/// Advances a [`Scene`] and a [`CameraRig`] once per frame.
pub struct AnimationDriver<K: Clock = SystemClock> {
    clock: K,
    ticks: u64,
}

impl Default for AnimationDriver<SystemClock> {
    fn default() -> Self {
        Self::new(SystemClock::new())
    }
}

impl<K: Clock> AnimationDriver<K> {
    pub fn new(clock: K) -> Self {
        Self { clock, ticks: 0 }
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut K {
        &mut self.clock
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one frame update.
    ///
    /// Per-tick increments (orbits, shell spin, the satellite) are applied
    /// only when `dt > 0`, and their size does not depend on `dt`. Self
    /// rotation, the starfield and the title follow the clock instead.
    /// A dependent entity whose parent is missing is left untouched.
    pub fn tick(&mut self, dt: f32, scene: &mut Scene, rig: &mut CameraRig, params: &FrameParams) {
        self.ticks += 1;
        let speed = params.animation_speed;
        let elapsed = self.clock.elapsed();
        let step = params.is_animating && dt > 0.0;

        if params.is_animating {
            if step {
                spin_shells(scene, params);
                advance_orbits(scene, speed);
                advance_satellite(scene, speed);
            }
            let self_rotation = elapsed * speed * SELF_ROTATION_RATE;
            for body in &mut scene.bodies {
                body.self_rotation = self_rotation;
            }
        }

        track_dependents(scene);

        if params.is_animating {
            animate_decor(scene, elapsed, speed);
        }

        rig.advance_cinematic(speed);
        let moved = rig.update_controls();
        trace!(tick = self.ticks, dt, elapsed, step, moved, "tick");
    }
}

fn spin_shells(scene: &mut Scene, params: &FrameParams) {
    let speed = params.animation_speed;
    scene.sun.rotation_y += params.sun_rotation_speed * speed;
    for shell in &mut scene.sun.shells {
        shell.rotation_y += shell.spin_rate * speed;
    }
    if let Some(atmosphere) = &mut scene.atmosphere {
        atmosphere.rotation_y += params.earth_rotation_speed * speed;
    }
}

fn advance_orbits(scene: &mut Scene, speed: f32) {
    let speed = f64::from(speed);
    for body in &mut scene.bodies {
        body.current_angle += body.angular_speed * speed;
        body.position = body.orbit_position();
    }
}

fn advance_satellite(scene: &mut Scene, speed: f32) {
    let Some(satellite) = &mut scene.satellite else {
        return;
    };
    let Some(parent) = scene.bodies.get(satellite.parent.0 as usize) else {
        return;
    };
    satellite.angle += satellite.angular_speed * f64::from(speed);
    satellite.position = satellite.position_around(parent.position);
}

/// Copy parent transforms into rings, labels and the atmosphere. Derived
/// state only, so it runs while paused too.
fn track_dependents(scene: &mut Scene) {
    let bodies = &scene.bodies;
    for set in &mut scene.ring_sets {
        if let Some(parent) = bodies.get(set.parent.0 as usize) {
            set.position = parent.render_position();
            set.rotation.y = parent.self_rotation;
            set.rotation.x = -FRAC_PI_2;
        }
    }
    for label in &mut scene.labels {
        if let Some(parent) = bodies.get(label.parent.0 as usize) {
            label.position = parent.label_anchor();
        }
    }
    if let Some(atmosphere) = &mut scene.atmosphere
        && let Some(parent) = atmosphere.anchor.and_then(|id| bodies.get(id.0 as usize))
    {
        atmosphere.position = parent.render_position();
    }
}

fn animate_decor(scene: &mut Scene, elapsed: f32, speed: f32) {
    if let Some(stars) = &mut scene.starfield {
        stars.rotation_y = elapsed * speed * Starfield::SPIN_RATE;
    }
    if let Some(title) = &mut scene.title {
        title.rotation_y = (elapsed * speed * TITLE_WOBBLE_RATE).sin() * TITLE_WOBBLE_AMPLITUDE;
    }
}
