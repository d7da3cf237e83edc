//! Application shell: window, event handling, and the fixed-rate loop.

pub mod game_loop;
pub mod platform;
pub mod sim;
pub mod window;
