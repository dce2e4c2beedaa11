//! Camera ownership and the user/cinematic mode switch.

use glam::Vec3;
use tracing::info;

use crate::camera::Camera;
use crate::controls::OrbitControls;

/// Who drives the camera position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CameraMode {
    UserControlled,
    Cinematic,
}

/// The autonomous sweep: a horizontal circle around the origin.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CinematicPath {
    pub radius: f32,
    pub height: f32,
    /// Point the camera keeps looking at while sweeping.
    pub target: Vec3,
    /// Angle advanced per tick at animation speed 1.
    pub step: f32,
}

impl Default for CinematicPath {
    fn default() -> Self {
        Self {
            radius: 20.0,
            height: 10.0,
            target: Vec3::new(0.0, 5.0, 0.0),
            step: 0.005,
        }
    }
}

impl CinematicPath {
    pub fn position_at(&self, angle: f32) -> Vec3 {
        Vec3::new(
            angle.cos() * self.radius,
            self.height,
            angle.sin() * self.radius,
        )
    }
}

/// The camera together with the controls and sweep state that write it.
#[derive(Clone, Debug)]
pub struct CameraRig {
    pub camera: Camera,
    pub controls: OrbitControls,
    pub path: CinematicPath,
    mode: CameraMode,
    cinematic_angle: f32,
}

impl Default for CameraRig {
    fn default() -> Self {
        Self::new(Camera::default())
    }
}

impl CameraRig {
    pub fn new(camera: Camera) -> Self {
        let controls = OrbitControls::new(&camera);
        Self {
            camera,
            controls,
            path: CinematicPath::default(),
            mode: CameraMode::UserControlled,
            cinematic_angle: 0.0,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    pub fn is_cinematic(&self) -> bool {
        self.mode == CameraMode::Cinematic
    }

    pub fn cinematic_angle(&self) -> f32 {
        self.cinematic_angle
    }

    /// Switch modes. Leaving the cinematic sweep drops any motion the
    /// controls queued meanwhile, so user input takes effect immediately.
    pub fn set_mode(&mut self, mode: CameraMode) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;
        match mode {
            CameraMode::Cinematic => info!("Cinematic mode started"),
            CameraMode::UserControlled => {
                self.controls.halt();
                info!("Cinematic mode stopped");
            }
        }
    }

    pub fn set_cinematic(&mut self, enabled: bool) {
        self.set_mode(if enabled {
            CameraMode::Cinematic
        } else {
            CameraMode::UserControlled
        });
    }

    /// Advance the sweep by one step and place the camera on it. A no-op
    /// outside cinematic mode. The step does not depend on frame time.
    pub fn advance_cinematic(&mut self, animation_speed: f32) {
        if self.mode != CameraMode::Cinematic {
            return;
        }
        self.cinematic_angle += self.path.step * animation_speed;
        self.camera.position = self.path.position_at(self.cinematic_angle);
        self.camera.look_at(self.path.target);
    }

    /// Run the damped controls. In cinematic mode the controls only decay
    /// their pending motion; the sweep owns the camera.
    pub fn update_controls(&mut self) -> bool {
        match self.mode {
            CameraMode::UserControlled => self.controls.update(&mut self.camera),
            CameraMode::Cinematic => {
                self.controls.settle();
                false
            }
        }
    }

    /// Return to the home pose.
    pub fn reset(&mut self) {
        self.controls.reset(&mut self.camera);
    }

    pub fn set_auto_rotate(&mut self, enabled: bool) {
        self.controls.auto_rotate = enabled;
    }

    pub fn set_auto_rotate_speed(&mut self, speed: f32) {
        self.controls.auto_rotate_speed = speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cinematic_places_camera_on_circle() {
        let mut rig = CameraRig::default();
        rig.set_cinematic(true);
        for _ in 0..200 {
            rig.advance_cinematic(1.0);
        }
        assert!((rig.cinematic_angle() - 1.0).abs() < 1e-4);
        let p = rig.camera.position;
        assert!((p - Vec3::new(20.0 * 1.0_f32.cos(), 10.0, 20.0 * 1.0_f32.sin())).length() < 1e-3);
        let expected = (Vec3::new(0.0, 5.0, 0.0) - p).normalize();
        assert!((rig.camera.forward() - expected).length() < 1e-4);
    }

    #[test]
    fn test_cinematic_ignored_when_user_controlled() {
        let mut rig = CameraRig::default();
        let before = rig.camera.clone();
        rig.advance_cinematic(1.0);
        assert_eq!(rig.camera, before);
        assert_eq!(rig.cinematic_angle(), 0.0);
    }

    #[test]
    fn test_controls_do_not_move_camera_in_cinematic_mode() {
        let mut rig = CameraRig::default();
        rig.set_cinematic(true);
        rig.advance_cinematic(1.0);
        let placed = rig.camera.position;
        rig.controls.rotate_left(1.0);
        assert!(!rig.update_controls());
        assert_eq!(rig.camera.position, placed);
    }

    #[test]
    fn test_leaving_cinematic_clears_residual_motion() {
        let mut rig = CameraRig::default();
        rig.set_cinematic(true);
        rig.controls.rotate_left(3.0);
        rig.controls.pan(Vec3::X);
        rig.set_cinematic(false);
        assert_eq!(rig.mode(), CameraMode::UserControlled);
        assert!(!rig.controls.is_moving());

        // User input responds on the very next update.
        rig.controls.rotate_left(0.5);
        assert!(rig.update_controls());
    }

    #[test]
    fn test_reset_returns_home() {
        let mut rig = CameraRig::default();
        rig.set_cinematic(true);
        rig.advance_cinematic(3.0);
        rig.set_cinematic(false);
        rig.reset();
        assert_eq!(rig.camera.position, Vec3::new(0.0, 10.0, 30.0));
    }
}
