//! Damped orbit controls: rotate around a target, pan the target, dolly in
//! and out, with optional auto-spin.
//!
//! Input methods only accumulate motion. [`OrbitControls::update`] applies a
//! `damping_factor` share of the accumulated motion to the camera once per
//! frame and decays the rest, which gives the gliding inertia.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::camera::Camera;

/// Fraction of pending motion applied per update.
pub const DEFAULT_DAMPING: f32 = 0.05;

const EPS: f32 = 1e-6;

/// Spherical coordinates around +Y: `theta` is the azimuth measured from +Z
/// toward +X, `phi` the polar angle from +Y.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Spherical {
    radius: f32,
    phi: f32,
    theta: f32,
}

impl Spherical {
    fn from_offset(v: Vec3) -> Self {
        let radius = v.length();
        if radius == 0.0 {
            return Self::default();
        }
        Self {
            radius,
            theta: v.x.atan2(v.z),
            phi: (v.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let ring = self.phi.sin() * self.radius;
        Vec3::new(
            ring * self.theta.sin(),
            self.phi.cos() * self.radius,
            ring * self.theta.cos(),
        )
    }
}

#[derive(Clone, Debug)]
pub struct OrbitControls {
    /// Point the camera orbits around and looks at.
    pub target: Vec3,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    /// 1.0 is one revolution per minute at 60 updates per second.
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,

    spherical_delta: Spherical,
    scale: f32,
    pan_offset: Vec3,

    saved_target: Vec3,
    saved_position: Vec3,
}

impl OrbitControls {
    /// Controls orbiting the origin, remembering the camera's current
    /// position as the reset pose.
    pub fn new(camera: &Camera) -> Self {
        Self {
            target: Vec3::ZERO,
            enable_damping: true,
            damping_factor: DEFAULT_DAMPING,
            auto_rotate: false,
            auto_rotate_speed: 2.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            min_polar_angle: 0.0,
            max_polar_angle: PI,
            spherical_delta: Spherical::default(),
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            saved_target: Vec3::ZERO,
            saved_position: camera.position,
        }
    }

    // --- Input accumulation ---

    /// Queue an azimuth change. Positive turns the camera to its left.
    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    /// Queue a polar change. Positive tilts the camera up over the target.
    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Rotate from a pointer drag of `(dx, dy)` pixels. A drag across the
    /// full viewport height is one full turn.
    pub fn rotate_by_pixels(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.rotate_left(TAU * dx / viewport_height * self.rotate_speed);
        self.rotate_up(TAU * dy / viewport_height * self.rotate_speed);
    }

    /// Scale the orbit radius by `factor` on the next update.
    pub fn dolly(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.scale *= factor;
        }
    }

    /// Scroll-wheel zoom: negative `delta` moves closer.
    pub fn zoom_by_wheel(&mut self, delta: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if delta < 0.0 {
            self.dolly(step);
        } else if delta > 0.0 {
            self.dolly(1.0 / step);
        }
    }

    /// Queue a world-space translation of the target (and camera).
    pub fn pan(&mut self, offset: Vec3) {
        self.pan_offset += offset;
    }

    /// Pan from a pointer drag so that the point under the cursor follows it
    /// at the target's depth.
    pub fn pan_by_pixels(&mut self, dx: f32, dy: f32, camera: &Camera, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let distance = (camera.position - self.target).length();
        let half_fov = camera.fov_y().unwrap_or(PI / 4.0) * 0.5;
        let world_per_pixel = 2.0 * distance * half_fov.tan() / viewport_height;
        self.pan(-camera.right() * dx * world_per_pixel + camera.up() * dy * world_per_pixel);
    }

    // --- Per-frame ---

    fn auto_rotation_angle(&self) -> f32 {
        TAU / 60.0 / 60.0 * self.auto_rotate_speed
    }

    /// Apply pending motion to `camera` and point it at the target. Returns
    /// whether the camera moved noticeably.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        if self.auto_rotate {
            self.rotate_left(self.auto_rotation_angle());
        }

        let share = if self.enable_damping {
            self.damping_factor
        } else {
            1.0
        };
        spherical.theta += self.spherical_delta.theta * share;
        spherical.phi += self.spherical_delta.phi * share;
        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        self.target += self.pan_offset * share;

        let position = self.target + spherical.to_offset();
        let moved = (position - camera.position).length_squared() > EPS;
        camera.position = position;
        camera.look_at(self.target);

        self.settle();
        moved
    }

    /// Decay pending motion without touching a camera, as if an update had
    /// consumed its share.
    pub fn settle(&mut self) {
        if self.enable_damping {
            let keep = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= keep;
            self.spherical_delta.phi *= keep;
            self.pan_offset *= keep;
        } else {
            self.spherical_delta = Spherical::default();
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }

    /// Drop all pending motion immediately.
    pub fn halt(&mut self) {
        self.spherical_delta = Spherical::default();
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
    }

    /// Restore the saved target and camera position.
    pub fn reset(&mut self, camera: &mut Camera) {
        self.halt();
        self.target = self.saved_target;
        camera.position = self.saved_position;
        camera.look_at(self.target);
    }

    /// Whether any queued rotation or pan is still above the noise floor.
    pub fn is_moving(&self) -> bool {
        self.spherical_delta.theta.abs() > EPS
            || self.spherical_delta.phi.abs() > EPS
            || self.pan_offset.length_squared() > EPS
            || (self.scale - 1.0).abs() > EPS
    }
}
