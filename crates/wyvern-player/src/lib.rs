//! Rider controller core: orbit camera, flight control, and session toggle.
//!
//! Everything here is pure state plus free-function systems; windowing and
//! collision resolution live in the adapter crates.

pub mod flight;
pub mod orbit_camera;
pub mod pose;
pub mod session;

pub use flight::{FlightCommand, FlightController, flight_control_system};
pub use orbit_camera::{OrbitCamera, orbit_follow_system, orbit_look_system};
pub use pose::{Pose, look_rotation};
pub use session::{CloseResponse, close_response};
