//! The recognized configuration surface exposed to the parameter panel.

use crate::value::{Color, ParamSpec};

/// Parameter names as the panel addresses them.
pub mod names {
    pub const BACKGROUND_COLOR: &str = "backgroundColor";
    pub const SHOW_ORBITS: &str = "showOrbits";
    pub const SHOW_STARS: &str = "showStars";
    pub const SHOW_AXES: &str = "showAxes";
    pub const SHOW_SATURN_RINGS: &str = "showSaturnRings";
    pub const SHOW_PLANET_LABELS: &str = "showPlanetLabels";
    pub const SHOW_ATMOSPHERE: &str = "showAtmosphere";
    pub const SHOW_MOON: &str = "showMoon";
    pub const SHOW_SUN_EFFECTS: &str = "showSunEffects";
    pub const PLANET_SCALE: &str = "planetScale";
    pub const SUN_SCALE: &str = "sunScale";
    pub const SUN_GLOW_INTENSITY: &str = "sunGlowIntensity";
    pub const ANIMATION_SPEED: &str = "animationSpeed";
    pub const IS_ANIMATING: &str = "isAnimating";
    pub const CAMERA_AUTO_ROTATE: &str = "cameraAutoRotate";
    pub const CAMERA_AUTO_ROTATE_SPEED: &str = "cameraAutoRotateSpeed";
    pub const CINEMATIC_MODE: &str = "cinematicMode";
    pub const SUN_ROTATION_SPEED: &str = "sunRotationSpeed";
    pub const EARTH_ROTATION_SPEED: &str = "earthRotationSpeed";
    pub const MOON_ORBIT_SPEED: &str = "moonOrbitSpeed";
    pub const ATMOSPHERE_OPACITY: &str = "atmosphereOpacity";
}

/// Every knob with its kind, inclusive range, and default value.
pub fn standard_specs() -> Vec<ParamSpec> {
    use names::*;
    vec![
        ParamSpec::color(BACKGROUND_COLOR, Color::from_u32(0x000011)),
        ParamSpec::flag(SHOW_ORBITS, true),
        ParamSpec::flag(SHOW_STARS, true),
        ParamSpec::flag(SHOW_AXES, false),
        ParamSpec::flag(SHOW_SATURN_RINGS, true),
        ParamSpec::flag(SHOW_PLANET_LABELS, true),
        ParamSpec::flag(SHOW_ATMOSPHERE, true),
        ParamSpec::flag(SHOW_MOON, true),
        ParamSpec::flag(SHOW_SUN_EFFECTS, true),
        ParamSpec::float(PLANET_SCALE, 0.1, 3.0, 1.0),
        ParamSpec::float(SUN_SCALE, 0.5, 3.0, 1.0),
        ParamSpec::float(SUN_GLOW_INTENSITY, 0.0, 1.0, 1.0),
        ParamSpec::float(ANIMATION_SPEED, 0.0, 3.0, 0.3),
        ParamSpec::flag(IS_ANIMATING, true),
        ParamSpec::flag(CAMERA_AUTO_ROTATE, false),
        ParamSpec::float(CAMERA_AUTO_ROTATE_SPEED, 0.0, 5.0, 2.0),
        ParamSpec::flag(CINEMATIC_MODE, false),
        ParamSpec::float(SUN_ROTATION_SPEED, 0.0, 0.1, 0.01),
        ParamSpec::float(EARTH_ROTATION_SPEED, 0.0, 0.1, 0.01),
        ParamSpec::float(MOON_ORBIT_SPEED, 0.0, 0.5, 0.05),
        ParamSpec::float(ATMOSPHERE_OPACITY, 0.0, 1.0, 0.3),
    ]
}
