//! Scenarios spanning the parameter store, the scene, the asset pipeline and
//! the animation driver.

use std::sync::Arc;
use std::time::{Duration, Instant};

use helios_animation::ManualClock;
use helios_assets::{FsAssetSource, MemoryAssetSource, ResourceOrigin};
use helios_config::Config;
use helios_params::{Color, InvalidReason, names};
use helios_scene::Group;

use crate::headless::HeadlessRenderer;
use crate::host::FrameHost;
use crate::input::{Action, Key, Pointer};
use crate::orrery::Orrery;

const DT: f32 = 1.0 / 60.0;

fn config() -> Config {
    let mut config = Config::default();
    config.scene.seed = Some(7);
    config.scene.star_count = 32;
    config.assets.worker_count = Some(0);
    config
}

fn orrery_with(config: &Config) -> Orrery<HeadlessRenderer, ManualClock> {
    Orrery::new(
        config,
        Arc::new(MemoryAssetSource::new()),
        HeadlessRenderer::new(0),
        ManualClock::new(0.0),
    )
}

fn orrery() -> Orrery<HeadlessRenderer, ManualClock> {
    orrery_with(&config())
}

#[test]
fn test_planet_scale_round_trip() {
    let mut orrery = orrery();
    for v in [0.1_f32, 0.5, 1.0, 1.7, 3.0] {
        orrery.set(names::PLANET_SCALE, v).unwrap();
        for body in &orrery.scene().bodies {
            assert!((body.radius - body.base_radius * v).abs() < 1e-5, "{} at {v}", body.name);
        }
        let saturn = orrery.scene().body_id("Saturn").unwrap();
        let radius = orrery.scene().body(saturn).unwrap().radius;
        let rings = &orrery.scene().ring_sets[0];
        assert!((rings.rings[0].inner_radius - 1.2 * radius).abs() < 1e-4);
        assert!((rings.rings[2].outer_radius - 2.6 * radius).abs() < 1e-4);
        let atmosphere = orrery.scene().atmosphere.as_ref().unwrap();
        assert!((atmosphere.radius() - 1.05 * v).abs() < 1e-5);
    }
}

#[test]
fn test_planet_scale_bounds_are_inclusive() {
    let mut orrery = orrery();
    let err = orrery.set(names::PLANET_SCALE, 5.0_f32).unwrap_err();
    assert!(matches!(err.reason, InvalidReason::OutOfRange { .. }));
    assert_eq!(orrery.params().float(names::PLANET_SCALE), 1.0);

    orrery.set(names::PLANET_SCALE, 3.0_f32).unwrap();
    assert_eq!(orrery.params().float(names::PLANET_SCALE), 3.0);
    orrery.set(names::PLANET_SCALE, 0.1_f32).unwrap();
}

#[test]
fn test_background_edit_from_text() {
    let mut orrery = orrery();
    assert_eq!(orrery.scene().background, Color::from_u32(0x000011));
    orrery.apply_edit("backgroundColor=#ff8800").unwrap();
    assert_eq!(orrery.scene().background, Color::from_u32(0xff8800));
    assert!(orrery.apply_edit("backgroundColor=orange").is_err());
    assert_eq!(orrery.scene().background, Color::from_u32(0xff8800));
}

#[test]
fn test_malformed_and_unknown_edits() {
    let mut orrery = orrery();
    let err = orrery.apply_edit("planetScale").unwrap_err();
    assert!(matches!(err.reason, InvalidReason::Unparseable(_)));
    let err = orrery.apply_edit("warpDrive=1").unwrap_err();
    assert_eq!(err.reason, InvalidReason::UnknownName);

    let applied = orrery.apply_edits(&["showOrbits=false", "nope", "sunScale = 2"]);
    assert_eq!(applied, 2);
    assert!(!orrery.scene().is_visible(Group::Orbits));
    assert_eq!(orrery.scene().sun.scale, 2.0);
}

#[test]
fn test_first_frame_applies_placeholders_and_labels() {
    let mut orrery = orrery();
    assert!(orrery.scene().labels.is_empty());
    orrery.frame(DT);

    let scene = orrery.scene();
    assert_eq!(scene.labels.len(), 8);
    assert!(scene.title.is_some());
    let earth = scene.body(scene.body_id("Earth").unwrap()).unwrap();
    assert_eq!(earth.material.texture.origin, Some(ResourceOrigin::Placeholder));
    assert_eq!(orrery.backend().frames(), 1);
    assert_eq!(orrery.backend().textured_bodies(), 7);
    assert_eq!(orrery.resolver().pending_count(), 0);
}

#[test]
fn test_teardown_discards_stale_loads() {
    let mut orrery = orrery();
    // Loads were issued during construction; none has been applied yet.
    orrery.teardown();
    orrery.frame(DT);

    assert!(!orrery.is_live());
    assert!(orrery.scene().bodies.is_empty());
    assert!(orrery.scene().labels.is_empty());
    assert!(orrery.resolver().is_empty());
    assert_eq!(orrery.backend().frames(), 0);

    // A rebuilt scene resolves its own generation normally.
    orrery.build_scene();
    orrery.frame(DT);
    assert_eq!(orrery.scene().labels.len(), 8);
    assert_eq!(orrery.resolver().generation(), 1);
}

#[test]
fn test_moon_disabled_at_build_is_never_created() {
    let mut config = config();
    config.scene.show_moon = false;
    let mut orrery = orrery_with(&config);
    assert!(orrery.scene().satellite.is_none());

    orrery.set(names::SHOW_MOON, true).unwrap();
    orrery.frame(DT);
    assert!(orrery.scene().satellite.is_none());
    assert!(orrery.scene().is_visible(Group::Moon));
}

#[test]
fn test_moon_orbit_speed_reaches_satellite() {
    let mut orrery = orrery();
    orrery.set(names::MOON_ORBIT_SPEED, 0.2_f32).unwrap();
    let speed = orrery.scene().satellite.as_ref().unwrap().angular_speed;
    assert!((speed - 0.2).abs() < 1e-6);
}

#[test]
fn test_space_toggles_animation_through_store() {
    let mut orrery = orrery();
    orrery.frame(DT);
    let angles: Vec<f64> = orrery.scene().bodies.iter().map(|b| b.current_angle).collect();

    assert_eq!(orrery.handle_key(Key::Space).unwrap(), Some(Action::ToggleAnimation));
    assert!(!orrery.params().flag(names::IS_ANIMATING));
    for _ in 0..5 {
        orrery.frame(DT);
    }
    let paused: Vec<f64> = orrery.scene().bodies.iter().map(|b| b.current_angle).collect();
    assert_eq!(angles, paused);

    orrery.handle_key(Key::Space).unwrap();
    assert!(orrery.params().flag(names::IS_ANIMATING));
    orrery.frame(DT);
    assert_ne!(orrery.scene().bodies[0].current_angle, angles[0]);
}

#[test]
fn test_reset_key_returns_camera_home() {
    let mut orrery = orrery();
    orrery.rig_mut().controls.rotate_left(1.0);
    for _ in 0..30 {
        orrery.frame(DT);
    }
    assert!((orrery.rig().camera.position - helios_camera::camera::HOME_POSITION).length() > 0.1);

    assert_eq!(orrery.handle_key(Key::KeyR).unwrap(), Some(Action::ResetCamera));
    let position = orrery.rig().camera.position;
    assert!((position - helios_camera::camera::HOME_POSITION).length() < 1e-4);
}

#[test]
fn test_unbound_key_does_nothing() {
    let mut orrery = orrery();
    orrery.input_mut().unbind(Key::Space);
    assert_eq!(orrery.handle_key(Key::Space).unwrap(), None);
    assert!(orrery.params().flag(names::IS_ANIMATING));
}

#[test]
fn test_pointer_gestures_drive_orbit_controls() {
    let mut orrery = orrery();
    let home = helios_camera::camera::HOME_POSITION;

    // Default viewport is 720 pixels tall; a 180 pixel drag is a quarter turn.
    orrery.handle_pointer(Pointer::Rotate { dx: 180.0, dy: 0.0 });
    for _ in 0..400 {
        orrery.frame(DT);
    }
    let position = orrery.rig().camera.position;
    assert!((position.length() - home.length()).abs() < 1e-2);
    assert!(position.z.abs() < 1e-2, "z {}", position.z);
    assert!(position.x < -29.0);

    orrery.handle_pointer(Pointer::Wheel(-1.0));
    for _ in 0..400 {
        orrery.frame(DT);
    }
    assert!(orrery.rig().camera.position.length() < home.length() * 0.96);

    let target_before = orrery.rig().controls.target;
    orrery.handle_pointer(Pointer::Pan { dx: 0.0, dy: 72.0 });
    for _ in 0..400 {
        orrery.frame(DT);
    }
    assert!(orrery.rig().controls.target.y > target_before.y);
}

#[test]
fn test_cinematic_toggle_and_exit() {
    let mut orrery = orrery();
    orrery.set(names::CINEMATIC_MODE, true).unwrap();
    orrery.set(names::ANIMATION_SPEED, 1.0_f32).unwrap();
    for _ in 0..10 {
        orrery.frame(DT);
    }
    assert!((orrery.rig().cinematic_angle() - 0.05).abs() < 1e-5);
    assert!((orrery.rig().camera.position.y - 10.0).abs() < 1e-4);

    orrery.set(names::CINEMATIC_MODE, false).unwrap();
    assert!(!orrery.rig().is_cinematic());
    assert!(!orrery.rig().controls.is_moving());
}

#[test]
fn test_config_seeds_knobs() {
    let mut config = config();
    config.scene.paused = true;
    config.scene.planet_scale = 2.0;
    config.scene.cinematic_mode = true;
    config.scene.background = "not a color".to_string();
    let orrery = orrery_with(&config);

    assert!(!orrery.params().flag(names::IS_ANIMATING));
    assert!(orrery.rig().is_cinematic());
    assert_eq!(orrery.params().color(names::BACKGROUND_COLOR), Some(Color::from_u32(0x000011)));
    let jupiter = orrery.scene().body(orrery.scene().body_id("Jupiter").unwrap()).unwrap();
    assert!((jupiter.radius - 22.4).abs() < 1e-4);
}

#[test]
fn test_same_seed_same_sky() {
    let a = orrery();
    let b = orrery();
    assert_eq!(a.seed(), 7);
    let angles = |o: &Orrery<HeadlessRenderer, ManualClock>| {
        o.scene().bodies.iter().map(|b| b.current_angle).collect::<Vec<_>>()
    };
    assert_eq!(angles(&a), angles(&b));
}

#[test]
fn test_host_drives_registered_orrery() {
    let mut orrery = orrery();
    let mut host = FrameHost::new();
    let id = host.register(|o: &mut Orrery<HeadlessRenderer, ManualClock>, dt| o.frame(dt));
    for _ in 0..3 {
        host.run_frame_with(f64::from(DT), &mut orrery);
    }
    assert_eq!(orrery.backend().frames(), 3);

    host.deregister(id);
    host.run_frame_with(f64::from(DT), &mut orrery);
    assert_eq!(orrery.backend().frames(), 3);
}

#[test]
fn test_threaded_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    // Bare-name fallback path; the primary `/earth.jpg` is absent.
    let earth = dir.path().join("relative");
    std::fs::create_dir_all(&earth).unwrap();
    image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 200, 255]))
        .save_with_format(earth.join("earth.jpg"), image::ImageFormat::Png)
        .unwrap();

    let mut config = config();
    config.assets.worker_count = Some(2);
    let source = FsAssetSource::new(dir.path()).with_relative_base(&earth);
    let mut orrery = Orrery::new(
        &config,
        Arc::new(source),
        HeadlessRenderer::new(0),
        ManualClock::new(0.0),
    );

    let start = Instant::now();
    while orrery.resolver().pending_count() > 0 && start.elapsed() < Duration::from_secs(5) {
        orrery.frame(DT);
        std::thread::sleep(Duration::from_millis(5));
    }
    orrery.frame(DT);

    let scene = orrery.scene();
    let earth = scene.body(scene.body_id("Earth").unwrap()).unwrap();
    assert_eq!(earth.material.texture.origin, Some(ResourceOrigin::Secondary));
    assert_eq!(earth.material.texture.texture.as_ref().unwrap().width(), 4);
    let venus = scene.body(scene.body_id("Venus").unwrap()).unwrap();
    assert_eq!(venus.material.texture.origin, Some(ResourceOrigin::Placeholder));
    assert_eq!(scene.labels.len(), 8);
}
