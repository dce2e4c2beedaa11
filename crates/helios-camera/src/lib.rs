//! Perspective camera, damped orbit controls, and the cinematic sweep.

pub mod camera;
pub mod controls;
pub mod rig;

pub use camera::{Camera, Projection};
pub use controls::OrbitControls;
pub use rig::{CameraMode, CameraRig, CinematicPath};
