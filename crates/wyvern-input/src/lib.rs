//! Input layer: frame-coherent pointer and key state mapped through
//! RON-persistable action bindings.

pub mod action;
pub mod keys;
pub mod pointer;

pub use action::{Action, ActionState, Binding, InputMap, PointerButton, resolve_actions};
pub use keys::{KeyPress, KeyState};
pub use pointer::{CursorMode, PointerState};
