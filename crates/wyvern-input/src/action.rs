//! Semantic action mapping: physical inputs resolved to controller actions.
//!
//! [`InputMap`] binds each [`Action`] to one or more physical inputs (OR
//! logic). [`resolve_actions`] recomputes [`ActionState`] each frame from the
//! current key and pointer state, keeping the previous frame's values for
//! edge detection.

use crate::keys::KeyState;
use crate::pointer::PointerState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

/// Serde helper for [`KeyCode`], which has no native serde support.
/// Keys serialize as their debug names (e.g. `"KeyW"`, `"Escape"`).
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        name_to_keycode(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }

    fn name_to_keycode(s: &str) -> Option<KeyCode> {
        Some(match s {
            "KeyA" => KeyCode::KeyA,
            "KeyD" => KeyCode::KeyD,
            "KeyE" => KeyCode::KeyE,
            "KeyQ" => KeyCode::KeyQ,
            "KeyS" => KeyCode::KeyS,
            "KeyW" => KeyCode::KeyW,
            "Space" => KeyCode::Space,
            "Enter" => KeyCode::Enter,
            "Escape" => KeyCode::Escape,
            "Tab" => KeyCode::Tab,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ControlLeft" => KeyCode::ControlLeft,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            _ => return None,
        })
    }
}

/// The controller's semantic actions.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Fly forward while held.
    Move,
    /// Release the pointer, or quit if already released.
    Close,
}

/// Pointer buttons that can be bound, with serde support.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum PointerButton {
    /// Left pointer button.
    Left,
    /// Right pointer button.
    Right,
    /// Middle pointer button.
    Middle,
}

impl PointerButton {
    /// The corresponding winit [`MouseButton`].
    #[must_use]
    pub fn to_winit(self) -> MouseButton {
        match self {
            Self::Left => MouseButton::Left,
            Self::Right => MouseButton::Right,
            Self::Middle => MouseButton::Middle,
        }
    }
}

/// A physical input that can trigger an action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Binding {
    /// A keyboard key (physical code).
    Key(#[serde(with = "keycode_serde")] KeyCode),
    /// A pointer button.
    Pointer(PointerButton),
}

/// Maps actions to lists of bindings. Any active binding activates the
/// action. Serializable to RON for user-editable keybinding files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMap {
    /// The binding table.
    pub bindings: HashMap<Action, Vec<Binding>>,
}

impl Default for InputMap {
    fn default() -> Self {
        let mut bindings: HashMap<Action, Vec<Binding>> = HashMap::new();
        bindings.insert(
            Action::Move,
            vec![
                Binding::Pointer(PointerButton::Left),
                Binding::Key(KeyCode::KeyW),
            ],
        );
        bindings.insert(Action::Close, vec![Binding::Key(KeyCode::Escape)]);
        Self { bindings }
    }
}

impl InputMap {
    /// Empty map with no bindings.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Replace the bindings for an action.
    pub fn set_bindings(&mut self, action: Action, bindings: Vec<Binding>) {
        self.bindings.insert(action, bindings);
    }

    /// The bindings for an action, empty if unbound.
    #[must_use]
    pub fn bindings_for(&self, action: Action) -> &[Binding] {
        self.bindings.get(&action).map_or(&[], |v| v.as_slice())
    }

    /// Serialize to a RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from a RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

/// Per-frame action activation, with the previous frame kept for edges.
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    active: HashMap<Action, bool>,
    prev: HashMap<Action, bool>,
}

impl ActionState {
    /// New state with nothing active.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the action is active this frame.
    #[must_use]
    pub fn is_active(&self, action: Action) -> bool {
        self.active.get(&action).copied().unwrap_or(false)
    }

    /// True only on the frame the action went from inactive to active.
    #[must_use]
    pub fn just_activated(&self, action: Action) -> bool {
        self.is_active(action) && !self.prev.get(&action).copied().unwrap_or(false)
    }
}

/// Resolve all actions from the current input state. Call once per frame
/// after events have been collected.
pub fn resolve_actions(
    map: &InputMap,
    keys: &KeyState,
    pointer: &PointerState,
    state: &mut ActionState,
) {
    state.prev.clone_from(&state.active);
    state.active.clear();

    for (action, bindings) in &map.bindings {
        let active = bindings.iter().any(|binding| match binding {
            Binding::Key(code) => keys.is_held(*code),
            Binding::Pointer(button) => pointer.is_held(button.to_winit()),
        });
        state.active.insert(*action, active);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::KeyPress;
    use winit::event::ElementState;

    fn press_key(keys: &mut KeyState, code: KeyCode) {
        keys.apply(KeyPress {
            code,
            down: true,
            repeat: false,
        });
    }

    fn release_key(keys: &mut KeyState, code: KeyCode) {
        keys.apply(KeyPress {
            code,
            down: false,
            repeat: false,
        });
    }

    #[test]
    fn test_default_map_binds_move_and_close() {
        let map = InputMap::default();
        assert!(!map.bindings_for(Action::Move).is_empty());
        assert_eq!(
            map.bindings_for(Action::Close),
            &[Binding::Key(KeyCode::Escape)]
        );
    }

    #[test]
    fn test_key_binding_activates_on_hold() {
        let map = InputMap::default();
        let mut keys = KeyState::new();
        press_key(&mut keys, KeyCode::KeyW);
        let pointer = PointerState::new();

        let mut state = ActionState::new();
        resolve_actions(&map, &keys, &pointer, &mut state);
        assert!(state.is_active(Action::Move));
        assert!(!state.is_active(Action::Close));
    }

    #[test]
    fn test_pointer_binding_activates_on_hold() {
        let map = InputMap::default();
        let keys = KeyState::new();
        let mut pointer = PointerState::new();
        pointer.on_button(MouseButton::Left, ElementState::Pressed);

        let mut state = ActionState::new();
        resolve_actions(&map, &keys, &pointer, &mut state);
        assert!(state.is_active(Action::Move));
    }

    #[test]
    fn test_unbound_action_inactive() {
        let map = InputMap::empty();
        let keys = KeyState::new();
        let pointer = PointerState::new();
        let mut state = ActionState::new();
        resolve_actions(&map, &keys, &pointer, &mut state);
        assert!(!state.is_active(Action::Move));
        assert!(!state.just_activated(Action::Close));
    }

    #[test]
    fn test_just_activated_fires_once() {
        let map = InputMap::default();
        let mut keys = KeyState::new();
        let pointer = PointerState::new();
        let mut state = ActionState::new();

        press_key(&mut keys, KeyCode::Escape);
        resolve_actions(&map, &keys, &pointer, &mut state);
        assert!(state.just_activated(Action::Close));

        // Still held on the next frame: active but no fresh edge.
        resolve_actions(&map, &keys, &pointer, &mut state);
        assert!(state.is_active(Action::Close));
        assert!(!state.just_activated(Action::Close));
    }

    #[test]
    fn test_rebinding_takes_effect() {
        let mut map = InputMap::default();
        map.set_bindings(Action::Close, vec![Binding::Key(KeyCode::KeyQ)]);

        let mut keys = KeyState::new();
        let pointer = PointerState::new();
        let mut state = ActionState::new();

        press_key(&mut keys, KeyCode::Escape);
        resolve_actions(&map, &keys, &pointer, &mut state);
        assert!(!state.is_active(Action::Close));

        release_key(&mut keys, KeyCode::Escape);
        press_key(&mut keys, KeyCode::KeyQ);
        resolve_actions(&map, &keys, &pointer, &mut state);
        assert!(state.is_active(Action::Close));
    }

    #[test]
    fn test_ron_round_trip() {
        let map = InputMap::default();
        let text = map.to_ron().unwrap();
        let parsed = InputMap::from_ron(&text).unwrap();
        assert_eq!(
            parsed.bindings_for(Action::Close),
            map.bindings_for(Action::Close)
        );
        assert_eq!(
            parsed.bindings_for(Action::Move).len(),
            map.bindings_for(Action::Move).len()
        );
    }

    #[test]
    fn test_unknown_key_name_rejected() {
        let text = r#"(bindings: {Close: [Key("NotAKey")]})"#;
        assert!(InputMap::from_ron(text).is_err());
    }
}
