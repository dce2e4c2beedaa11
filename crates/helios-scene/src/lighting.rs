//! The fixed lighting rig: ambient fill, a shadow-casting key light, a warm
//! point light, and a weak fill light from the opposite side.

use glam::Vec3;
use helios_params::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

/// Orthographic shadow camera of a directional light.
#[derive(Clone, Debug, PartialEq)]
pub struct ShadowSettings {
    /// Shadow map width and height in texels.
    pub map_size: u32,
    /// Half extent of the square shadow frustum.
    pub half_extent: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            map_size: 2048,
            half_extent: 50.0,
            near: 0.5,
            far: 100.0,
        }
    }
}

/// Infinitely distant light shining from `position` toward the origin.
#[derive(Clone, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    pub shadow: Option<ShadowSettings>,
}

impl DirectionalLight {
    /// Normalized direction the light travels in.
    pub fn direction(&self) -> Vec3 {
        (-self.position).normalize_or_zero()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Vec3,
    /// Distance at which the contribution reaches zero.
    pub range: f32,
}

impl PointLight {
    /// Smoothly windowed inverse-square falloff, zero at `range`.
    pub fn attenuation(&self, distance: f32) -> f32 {
        if distance >= self.range {
            return 0.0;
        }
        let inv_sq = 1.0 / (distance * distance + 1.0);
        let ratio = distance / self.range;
        let t = (1.0 - ratio * ratio).max(0.0);
        inv_sq * t * t
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub key: DirectionalLight,
    pub point: PointLight,
    pub fill: DirectionalLight,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight {
                color: Color::from_u32(0x404040),
                intensity: 0.4,
            },
            key: DirectionalLight {
                color: Color::WHITE,
                intensity: 2.0,
                position: Vec3::new(10.0, 5.0, 5.0),
                shadow: Some(ShadowSettings::default()),
            },
            point: PointLight {
                color: Color::WHITE,
                intensity: 1.0,
                position: Vec3::new(-5.0, 3.0, 5.0),
                range: 200.0,
            },
            fill: DirectionalLight {
                color: Color::WHITE,
                intensity: 0.5,
                position: Vec3::new(-10.0, 0.0, 0.0),
                shadow: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_key_light_casts_shadows() {
        let rig = LightRig::default();
        assert_eq!(rig.key.shadow.as_ref().map(|s| s.map_size), Some(2048));
        assert!(rig.fill.shadow.is_none());
    }

    #[test]
    fn test_directions_point_at_origin() {
        let rig = LightRig::default();
        assert!((rig.fill.direction() - Vec3::X).length() < 1e-6);
        assert!(rig.key.direction().dot(rig.key.position) < 0.0);
    }

    #[test]
    fn test_point_attenuation_window() {
        let rig = LightRig::default();
        assert_eq!(rig.point.attenuation(200.0), 0.0);
        assert!((rig.point.attenuation(0.0) - 1.0).abs() < 1e-6);
        assert!(rig.point.attenuation(10.0) > rig.point.attenuation(50.0));
    }
}
