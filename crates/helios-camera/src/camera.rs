//! Camera pose and projection.

use glam::{Mat3, Mat4, Quat, Vec3};

/// Where the camera starts and where "reset camera" puts it back.
pub const HOME_POSITION: Vec3 = Vec3::new(0.0, 10.0, 30.0);

/// A camera producing view and projection matrices for the rendering engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation as a unit quaternion. The camera looks down its local -Z.
    pub rotation: Quat,
    pub projection: Projection,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width / height.
        aspect_ratio: f32,
    },
    Orthographic {
        half_width: f32,
        half_height: f32,
    },
}

impl Camera {
    /// Inverse of the camera's world transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match &self.projection {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
            } => Mat4::perspective_rh(*fov_y, *aspect_ratio, self.near, self.far),
            Projection::Orthographic {
                half_width,
                half_height,
            } => Mat4::orthographic_rh(
                -*half_width,
                *half_width,
                -*half_height,
                *half_height,
                self.near,
                self.far,
            ),
        }
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Vertical field of view, if perspective.
    pub fn fov_y(&self) -> Option<f32> {
        match self.projection {
            Projection::Perspective { fov_y, .. } => Some(fov_y),
            Projection::Orthographic { .. } => None,
        }
    }

    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if height <= 0.0 {
            return;
        }
        if let Projection::Perspective { aspect_ratio, .. } = &mut self.projection {
            *aspect_ratio = width / height;
        }
    }

    /// Turn the camera to face `target`, keeping world +Y as up. Does nothing
    /// when the target coincides with the camera or lies straight above or
    /// below it.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.length_squared() < 1e-12 {
            return;
        }
        let forward = to_target.normalize();
        let right = forward.cross(Vec3::Y);
        if right.length_squared() < 1e-12 {
            return;
        }
        let right = right.normalize();
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
    }
}

impl Default for Camera {
    /// 75° perspective at the home position, looking at the origin.
    fn default() -> Self {
        let mut camera = Self {
            position: HOME_POSITION,
            rotation: Quat::IDENTITY,
            projection: Projection::Perspective {
                fov_y: 75.0_f32.to_radians(),
                aspect_ratio: 16.0 / 9.0,
            },
            near: 0.1,
            far: 5000.0,
        };
        camera.look_at(Vec3::ZERO);
        camera
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-5
    }

    #[test]
    fn test_default_looks_at_origin() {
        let camera = Camera::default();
        assert_eq!(camera.position, Vec3::new(0.0, 10.0, 30.0));
        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!(approx(camera.forward(), expected));
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 5000.0);
        assert!((camera.fov_y().unwrap() - 75.0_f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn test_look_at_keeps_basis_orthonormal() {
        let mut camera = Camera {
            position: Vec3::new(20.0, 10.0, 0.0),
            ..Camera::default()
        };
        camera.look_at(Vec3::new(0.0, 5.0, 0.0));
        let (f, u, r) = (camera.forward(), camera.up(), camera.right());
        assert!((f.length() - 1.0).abs() < 1e-5);
        assert!(f.dot(u).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
        assert!(u.y > 0.0);
        assert!(approx(f, (Vec3::new(0.0, 5.0, 0.0) - camera.position).normalize()));
    }

    #[test]
    fn test_look_at_degenerate_target_is_ignored() {
        let mut camera = Camera::default();
        let before = camera.rotation;
        camera.look_at(camera.position);
        camera.look_at(camera.position + Vec3::Y * 5.0);
        assert_eq!(camera.rotation, before);
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = Camera::default();
        let p = camera.view_matrix().transform_point3(camera.position);
        assert!(p.length() < 1e-4);
        // The look target sits straight ahead on -Z.
        let t = camera.view_matrix().transform_point3(Vec3::ZERO);
        assert!(t.x.abs() < 1e-4 && t.y.abs() < 1e-4 && t.z < 0.0);
    }

    #[test]
    fn test_aspect_ratio_update() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1280.0, 720.0);
        camera.set_aspect_ratio(100.0, 0.0);
        match camera.projection {
            Projection::Perspective { aspect_ratio, .. } => {
                assert!((aspect_ratio - 16.0 / 9.0).abs() < 1e-6)
            }
            Projection::Orthographic { .. } => panic!("expected perspective projection"),
        }
    }
}
