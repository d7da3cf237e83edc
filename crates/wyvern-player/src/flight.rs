//! Hold-to-fly locomotion: forward thrust plus camera-away reorientation.

use crate::pose::{Pose, look_rotation};
use glam::{Quat, Vec3};
use wyvern_input::{Action, ActionState};

/// Flight tuning for the rider.
#[derive(Debug, Clone)]
pub struct FlightController {
    /// Forward speed in world units per second while the move action is held.
    pub fly_speed: f32,
}

impl Default for FlightController {
    fn default() -> Self {
        Self { fly_speed: 20.0 }
    }
}

/// One tick's worth of movement intent, applied by the physics bridge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightCommand {
    /// Desired velocity in world units per second.
    pub velocity: Vec3,
    /// New rider orientation, if the rider should turn this tick.
    pub rotation: Option<Quat>,
}

impl FlightCommand {
    /// The coasting command: no velocity, no turn.
    pub const IDLE: Self = Self {
        velocity: Vec3::ZERO,
        rotation: None,
    };
}

/// Compute the rider's movement for this tick.
///
/// While the move action is held the rider thrusts along its current
/// forward direction and turns to face directly away from the camera, so
/// sustained flight always carries the rider deeper into the view.
/// Velocity uses the pre-turn heading; the turn takes effect next tick.
#[must_use]
pub fn flight_control_system(
    actions: &ActionState,
    ctl: &FlightController,
    rider: &Pose,
    camera_pos: Vec3,
) -> FlightCommand {
    if !actions.is_active(Action::Move) {
        return FlightCommand::IDLE;
    }

    let forward = rider.forward().normalize_or_zero();
    let velocity = forward * ctl.fly_speed;

    let away = (rider.position - camera_pos).normalize_or_zero();
    let rotation = if away == Vec3::ZERO {
        // Camera sits exactly on the rider; keep the current heading.
        None
    } else {
        Some(look_rotation(away, Vec3::Y))
    };

    FlightCommand { velocity, rotation }
}
