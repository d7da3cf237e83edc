//! Frame-coherent key state keyed by physical key codes.
//!
//! Physical codes keep the bindings layout-independent; repeat events are
//! discarded so edge queries fire once per physical press.

use std::collections::HashSet;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal key transition for processing and tests.
#[derive(Debug, Clone, Copy)]
pub struct KeyPress {
    /// The physical key code.
    pub code: KeyCode,
    /// `true` for press, `false` for release.
    pub down: bool,
    /// OS auto-repeat event.
    pub repeat: bool,
}

/// Held / just-pressed / just-released key sets for the current frame.
#[derive(Debug, Clone, Default)]
pub struct KeyState {
    held: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
    just_released: HashSet<KeyCode>,
}

impl KeyState {
    /// New state with no keys down.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a winit [`KeyEvent`]. Keys without a physical code are dropped.
    pub fn on_key_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(code) = event.physical_key else {
            return;
        };
        self.apply(KeyPress {
            code,
            down: event.state == ElementState::Pressed,
            repeat: event.repeat,
        });
    }

    /// Apply a [`KeyPress`] transition.
    pub fn apply(&mut self, press: KeyPress) {
        if press.repeat {
            return;
        }
        if press.down {
            self.held.insert(press.code);
            self.just_pressed.insert(press.code);
        } else {
            self.held.remove(&press.code);
            self.just_released.insert(press.code);
        }
    }

    /// `true` while the key is held down.
    #[must_use]
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains(&code)
    }

    /// `true` only during the frame the key went down.
    #[must_use]
    pub fn just_pressed(&self, code: KeyCode) -> bool {
        self.just_pressed.contains(&code)
    }

    /// `true` only during the frame the key came up.
    #[must_use]
    pub fn just_released(&self, code: KeyCode) -> bool {
        self.just_released.contains(&code)
    }

    /// Clear edge sets. Call once at end of frame.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyPress {
        KeyPress {
            code,
            down: true,
            repeat: false,
        }
    }

    fn release(code: KeyCode) -> KeyPress {
        KeyPress {
            code,
            down: false,
            repeat: false,
        }
    }

    #[test]
    fn test_press_sets_held_and_edge() {
        let mut keys = KeyState::new();
        keys.apply(press(KeyCode::Escape));
        assert!(keys.is_held(KeyCode::Escape));
        assert!(keys.just_pressed(KeyCode::Escape));
    }

    #[test]
    fn test_edge_lasts_one_frame() {
        let mut keys = KeyState::new();
        keys.apply(press(KeyCode::KeyW));
        keys.clear_transients();
        assert!(keys.is_held(KeyCode::KeyW));
        assert!(!keys.just_pressed(KeyCode::KeyW));
    }

    #[test]
    fn test_release_clears_held() {
        let mut keys = KeyState::new();
        keys.apply(press(KeyCode::KeyW));
        keys.clear_transients();
        keys.apply(release(KeyCode::KeyW));
        assert!(!keys.is_held(KeyCode::KeyW));
        assert!(keys.just_released(KeyCode::KeyW));
    }

    #[test]
    fn test_repeat_events_ignored() {
        let mut keys = KeyState::new();
        keys.apply(press(KeyCode::Escape));
        keys.clear_transients();
        keys.apply(KeyPress {
            code: KeyCode::Escape,
            down: true,
            repeat: true,
        });
        // Held, but no fresh edge from the repeat.
        assert!(keys.is_held(KeyCode::Escape));
        assert!(!keys.just_pressed(KeyCode::Escape));
    }

    #[test]
    fn test_keys_tracked_independently() {
        let mut keys = KeyState::new();
        keys.apply(press(KeyCode::KeyW));
        keys.apply(press(KeyCode::Escape));
        keys.apply(release(KeyCode::KeyW));
        assert!(!keys.is_held(KeyCode::KeyW));
        assert!(keys.is_held(KeyCode::Escape));
    }
}
