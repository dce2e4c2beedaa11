//! The Helios orrery application: host loop, assembly of the scene, the
//! parameter store and the asset pipeline, and a headless renderer.

pub mod headless;
pub mod host;
pub mod input;
pub mod orrery;
pub mod platform;
pub mod reactions;

#[cfg(test)]
mod orrery_tests;

pub use headless::HeadlessRenderer;
pub use host::{CallbackId, FrameHost};
pub use input::{Action, InputMap, Key, Pointer};
pub use orrery::Orrery;
pub use platform::{PlatformDirs, PlatformError};
pub use reactions::SceneState;
