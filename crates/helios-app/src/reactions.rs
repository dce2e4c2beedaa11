//! Parameter reactions: how each knob write reaches the live scene and camera.

use helios_camera::CameraRig;
use helios_params::{InvalidParameter, ParameterStore, names};
use helios_scene::{Group, Scene};
use tracing::info;

/// Everything a reaction may touch.
#[derive(Clone, Debug, Default)]
pub struct SceneState {
    pub scene: Scene,
    pub rig: CameraRig,
}

/// Register one reaction per knob with an immediate effect. Knobs read once
/// per frame (`animationSpeed`, rotation speeds) need none.
pub fn register_reactions(params: &mut ParameterStore<SceneState>) -> Result<(), InvalidParameter> {
    params.observe(names::BACKGROUND_COLOR, |state, value| {
        if let Some(color) = value.as_color() {
            state.scene.set_background(color);
        }
    })?;

    for group in Group::ALL {
        params.observe(group.param_name(), move |state, value| {
            if let Some(shown) = value.as_bool() {
                state.scene.set_visible(group, shown);
            }
        })?;
    }

    observe_float(params, names::PLANET_SCALE, |state, v| {
        state.scene.apply_planet_scale(v)
    })?;
    observe_float(params, names::SUN_SCALE, |state, v| state.scene.apply_sun_scale(v))?;
    observe_float(params, names::SUN_GLOW_INTENSITY, |state, v| {
        state.scene.apply_glow_intensity(v)
    })?;
    observe_float(params, names::ATMOSPHERE_OPACITY, |state, v| {
        state.scene.set_atmosphere_opacity(v)
    })?;
    observe_float(params, names::MOON_ORBIT_SPEED, |state, v| {
        state.scene.set_satellite_speed(v)
    })?;
    observe_float(params, names::CAMERA_AUTO_ROTATE_SPEED, |state, v| {
        state.rig.set_auto_rotate_speed(v)
    })?;

    params.observe(names::CAMERA_AUTO_ROTATE, |state, value| {
        if let Some(enabled) = value.as_bool() {
            state.rig.set_auto_rotate(enabled);
        }
    })?;
    params.observe(names::CINEMATIC_MODE, |state, value| {
        if let Some(enabled) = value.as_bool() {
            state.rig.set_cinematic(enabled);
        }
    })?;
    params.observe(names::IS_ANIMATING, |_, value| {
        if let Some(playing) = value.as_bool() {
            info!(playing, "animation toggled");
        }
    })?;
    Ok(())
}

fn observe_float(
    params: &mut ParameterStore<SceneState>,
    name: &str,
    mut apply: impl FnMut(&mut SceneState, f32) + 'static,
) -> Result<(), InvalidParameter> {
    params.observe(name, move |state, value| {
        if let Some(v) = value.as_float() {
            apply(state, v);
        }
    })
}
