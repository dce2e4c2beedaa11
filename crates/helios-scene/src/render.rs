//! The rendering engine as seen from the core.

use helios_assets::{FontFace, TextBounds};
use helios_camera::Camera;

use crate::scene::Scene;

/// Capability surface of the rendering engine. The core describes the scene
/// declaratively and reads nothing back except text bounding boxes.
pub trait RenderBackend {
    /// Draw one frame of `scene` from `camera`.
    fn render(&mut self, scene: &Scene, camera: &Camera);

    /// Bounding box of `text` extruded with the given font, size and depth.
    fn measure_text(&self, font: &FontFace, text: &str, size: f32, depth: f32) -> TextBounds {
        font.measure(text, size, depth)
    }
}
