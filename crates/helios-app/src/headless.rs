//! A renderer that draws nothing. Stands in for the GPU engine in the binary
//! and in tests, and reports what it would have drawn.

use helios_camera::Camera;
use helios_scene::{RenderBackend, Scene};
use tracing::info;

#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    frames: u64,
    last_visible: usize,
    textured_bodies: usize,
    /// Log a stats line every this many frames; 0 disables it.
    stats_interval: u32,
}

impl HeadlessRenderer {
    pub fn new(stats_interval: u32) -> Self {
        Self {
            stats_interval,
            ..Self::default()
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Entities visible in the most recent frame.
    pub fn last_visible(&self) -> usize {
        self.last_visible
    }

    pub fn textured_bodies(&self) -> usize {
        self.textured_bodies
    }

    pub fn log_summary(&self) {
        info!(
            frames = self.frames,
            visible = self.last_visible,
            textured = self.textured_bodies,
            "headless renderer finished"
        );
    }
}

impl RenderBackend for HeadlessRenderer {
    fn render(&mut self, scene: &Scene, camera: &Camera) {
        self.frames += 1;
        self.last_visible = scene.visible_entity_count();
        self.textured_bodies = scene
            .bodies
            .iter()
            .filter(|b| b.material.has_texture())
            .count();

        if self.stats_interval > 0 && self.frames % u64::from(self.stats_interval) == 0 {
            info!(
                frames = self.frames,
                visible = self.last_visible,
                textured = self.textured_bodies,
                camera = ?camera.position,
                "render stats"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_frames_and_entities() {
        let mut renderer = HeadlessRenderer::new(0);
        let scene = Scene::default();
        renderer.render(&scene, &Camera::default());
        renderer.render(&scene, &Camera::default());
        assert_eq!(renderer.frames(), 2);
        assert_eq!(renderer.last_visible(), 1);
        assert_eq!(renderer.textured_bodies(), 0);
    }
}
