//! Frame-coherent pointer state with capture-aware delta accumulation.
//!
//! [`PointerState`] collects winit pointer events during a frame. While the
//! pointer is captured (hidden, grabbed), look deltas come from raw
//! `DeviceEvent::MouseMotion`; while free, they come from `CursorMoved`
//! position differences. Button edges are cleared once per frame; the look
//! delta accumulates until [`take_delta`](PointerState::take_delta) hands it
//! to exactly one consumer.

use glam::Vec2;
use tracing::warn;
use winit::event::{ElementState, MouseButton};

/// Whether the pointer is captured (hidden, relative deltas) or free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Hidden and grabbed; motion arrives as relative deltas.
    Captured,
    /// Visible OS cursor with absolute position.
    Free,
}

/// Per-button state for a single frame.
#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    just_pressed: bool,
    just_released: bool,
}

/// Left, right, middle. Side buttons are not bindable here.
const BUTTON_SLOTS: usize = 3;

fn button_slot(button: MouseButton) -> Option<usize> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        _ => None,
    }
}

/// Accumulated pointer state for the current frame.
///
/// Forward winit events via the `on_*` methods, query with the accessors,
/// then call [`clear_transients`](Self::clear_transients) at end of frame.
#[derive(Debug, Clone)]
pub struct PointerState {
    position: Vec2,
    delta: Vec2,
    buttons: [ButtonFrame; BUTTON_SLOTS],
    mode: CursorMode,
}

impl Default for PointerState {
    fn default() -> Self {
        Self::new()
    }
}

impl PointerState {
    /// New state: free cursor at the origin, nothing pressed.
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec2::ZERO,
            delta: Vec2::ZERO,
            buttons: [ButtonFrame::default(); BUTTON_SLOTS],
            mode: CursorMode::Free,
        }
    }

    /// Handle `WindowEvent::CursorMoved`. Feeds the delta only while free;
    /// captured mode ignores absolute positions (the OS may warp them).
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let next = Vec2::new(x as f32, y as f32);
        if self.mode == CursorMode::Free {
            self.delta += next - self.position;
        }
        self.position = next;
    }

    /// Handle `DeviceEvent::MouseMotion`. Only meaningful while captured.
    pub fn on_raw_motion(&mut self, dx: f64, dy: f64) {
        if self.mode == CursorMode::Captured {
            self.delta += Vec2::new(dx as f32, dy as f32);
        }
    }

    /// Handle `WindowEvent::MouseInput`.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let Some(slot) = button_slot(button) else {
            return;
        };
        let frame = &mut self.buttons[slot];
        match state {
            ElementState::Pressed => {
                frame.held = true;
                frame.just_pressed = true;
            }
            ElementState::Released => {
                frame.held = false;
                frame.just_released = true;
            }
        }
    }

    /// Switch capture mode, applying grab and visibility to the window.
    ///
    /// Capturing tries `Locked` first and falls back to `Confined` on
    /// platforms without pointer locking.
    pub fn set_mode(&mut self, window: &winit::window::Window, mode: CursorMode) {
        use winit::window::CursorGrabMode;
        self.mode = mode;
        match mode {
            CursorMode::Captured => {
                if window.set_cursor_grab(CursorGrabMode::Locked).is_err()
                    && window.set_cursor_grab(CursorGrabMode::Confined).is_err()
                {
                    warn!("pointer grab unavailable; look input may drift");
                }
                window.set_cursor_visible(false);
            }
            CursorMode::Free => {
                let _ = window.set_cursor_grab(CursorGrabMode::None);
                window.set_cursor_visible(true);
            }
        }
    }

    /// Set the mode flag without a window. Test-only.
    pub fn set_mode_flag(&mut self, mode: CursorMode) {
        self.mode = mode;
    }

    /// Drop per-frame button edges. Call once per frame. The look delta is
    /// left alone so motion arriving on a frame without a simulation step
    /// is not lost; it drains through [`take_delta`](Self::take_delta).
    pub fn clear_transients(&mut self) {
        for frame in &mut self.buttons {
            frame.just_pressed = false;
            frame.just_released = false;
        }
    }

    /// Hand the accumulated look delta to its consumer and reset it.
    ///
    /// Each unit of motion is returned exactly once, no matter how frames
    /// and simulation steps interleave.
    #[must_use]
    pub fn take_delta(&mut self) -> Vec2 {
        std::mem::take(&mut self.delta)
    }

    /// Cursor position in window-logical coordinates (stale while captured).
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Look delta accumulated since the last clear.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Whether a button is currently held.
    #[must_use]
    pub fn is_held(&self, button: MouseButton) -> bool {
        button_slot(button).is_some_and(|s| self.buttons[s].held)
    }

    /// Whether a button went down this frame.
    #[must_use]
    pub fn just_pressed(&self, button: MouseButton) -> bool {
        button_slot(button).is_some_and(|s| self.buttons[s].just_pressed)
    }

    /// Whether a button came up this frame.
    #[must_use]
    pub fn just_released(&self, button: MouseButton) -> bool {
        button_slot(button).is_some_and(|s| self.buttons[s].just_released)
    }

    /// Current capture mode.
    #[must_use]
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// Convenience: whether the pointer is currently captured.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.mode == CursorMode::Captured
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_mode_delta_from_position_difference() {
        let mut ptr = PointerState::new();
        ptr.on_cursor_moved(100.0, 200.0);
        let _ = ptr.take_delta();
        ptr.on_cursor_moved(110.0, 195.0);
        let d = ptr.delta();
        assert!((d.x - 10.0).abs() < f32::EPSILON);
        assert!((d.y + 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_captured_mode_uses_raw_motion_only() {
        let mut ptr = PointerState::new();
        ptr.set_mode_flag(CursorMode::Captured);
        ptr.on_cursor_moved(500.0, 500.0); // OS warp, must not contribute
        ptr.on_raw_motion(3.0, -2.0);
        ptr.on_raw_motion(1.0, 1.0);
        let d = ptr.delta();
        assert!((d.x - 4.0).abs() < f32::EPSILON);
        assert!((d.y + 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_raw_motion_ignored_while_free() {
        let mut ptr = PointerState::new();
        ptr.on_raw_motion(50.0, 50.0);
        assert_eq!(ptr.delta(), Vec2::ZERO);
    }

    #[test]
    fn test_button_edges_tracked() {
        let mut ptr = PointerState::new();
        ptr.on_button(MouseButton::Left, ElementState::Pressed);
        assert!(ptr.is_held(MouseButton::Left));
        assert!(ptr.just_pressed(MouseButton::Left));

        ptr.clear_transients();
        assert!(ptr.is_held(MouseButton::Left));
        assert!(!ptr.just_pressed(MouseButton::Left));

        ptr.on_button(MouseButton::Left, ElementState::Released);
        assert!(!ptr.is_held(MouseButton::Left));
        assert!(ptr.just_released(MouseButton::Left));
    }

    #[test]
    fn test_side_buttons_ignored() {
        let mut ptr = PointerState::new();
        ptr.on_button(MouseButton::Back, ElementState::Pressed);
        assert!(!ptr.is_held(MouseButton::Back));
    }

    #[test]
    fn test_take_delta_drains_once() {
        let mut ptr = PointerState::new();
        ptr.set_mode_flag(CursorMode::Captured);
        ptr.on_raw_motion(50.0, 20.0);
        let first = ptr.take_delta();
        assert!((first - Vec2::new(50.0, 20.0)).length() < f32::EPSILON);
        assert_eq!(ptr.take_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_delta_survives_end_of_frame_until_taken() {
        // Motion on a frame without a simulation step must not be lost.
        let mut ptr = PointerState::new();
        ptr.set_mode_flag(CursorMode::Captured);
        ptr.on_raw_motion(5.0, 0.0);
        ptr.clear_transients();
        ptr.on_raw_motion(7.0, 0.0);
        let d = ptr.take_delta();
        assert!((d.x - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_starts_free() {
        let ptr = PointerState::new();
        assert_eq!(ptr.mode(), CursorMode::Free);
        assert!(!ptr.is_captured());
    }
}
