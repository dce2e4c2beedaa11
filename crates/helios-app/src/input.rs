//! Keyboard shortcuts and pointer gestures.

use std::collections::HashMap;

/// What a shortcut does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Flip `isAnimating` through the parameter store.
    ToggleAnimation,
    /// Return the camera to its home pose.
    ResetCamera,
}

/// Physical keys the orrery reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Space,
    KeyR,
}

/// A pointer gesture over the viewport, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pointer {
    /// Primary-button drag: orbit around the target.
    Rotate { dx: f32, dy: f32 },
    /// Secondary-button drag: slide the target in the view plane.
    Pan { dx: f32, dy: f32 },
    /// Wheel movement; negative zooms in.
    Wheel(f32),
}

/// Key to action bindings.
#[derive(Clone, Debug, PartialEq)]
pub struct InputMap {
    bindings: HashMap<Key, Action>,
}

impl Default for InputMap {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        bindings.insert(Key::Space, Action::ToggleAnimation);
        bindings.insert(Key::KeyR, Action::ResetCamera);
        Self { bindings }
    }
}

impl InputMap {
    pub fn action(&self, key: Key) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    pub fn bind(&mut self, key: Key, action: Action) {
        self.bindings.insert(key, action);
    }

    pub fn unbind(&mut self, key: Key) {
        self.bindings.remove(&key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let map = InputMap::default();
        assert_eq!(map.action(Key::Space), Some(Action::ToggleAnimation));
        assert_eq!(map.action(Key::KeyR), Some(Action::ResetCamera));
    }

    #[test]
    fn test_rebind() {
        let mut map = InputMap::default();
        map.unbind(Key::Space);
        map.bind(Key::KeyR, Action::ToggleAnimation);
        assert_eq!(map.action(Key::Space), None);
        assert_eq!(map.action(Key::KeyR), Some(Action::ToggleAnimation));
    }
}
