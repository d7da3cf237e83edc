//! Orbit camera: yaw/pitch orbit of a fixed offset around the rider.

use crate::pose::{Pose, look_rotation};
use glam::{Quat, Vec2, Vec3};
use wyvern_input::PointerState;

/// Lowest allowed pitch in degrees (camera below the horizon).
pub const PITCH_MIN_DEG: f32 = -30.0;
/// Highest allowed pitch in degrees (camera above the rider).
pub const PITCH_MAX_DEG: f32 = 60.0;

/// Orbit camera state: two angles and a fixed base offset.
///
/// Yaw is unbounded and wraps through trigonometric periodicity; pitch is
/// clamped to `[pitch_min_deg, pitch_max_deg]` after every pointer event.
/// Camera placement is a pure function of the angles and the rider position,
/// so the camera can be tested without a window or scene.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Horizontal orbit angle in degrees. 0 = camera behind the rider.
    pub yaw_deg: f32,
    /// Vertical orbit angle in degrees.
    pub pitch_deg: f32,
    /// Degrees of rotation per pixel of pointer delta.
    pub sensitivity: f32,
    /// Flip the vertical pointer axis.
    pub invert_y: bool,
    /// Unrotated camera position relative to the rider: up 5, behind 10.
    pub base_offset: Vec3,
    /// The aim point sits this far above the rider origin.
    pub aim_height: f32,
    /// Lower pitch clamp in degrees.
    pub pitch_min_deg: f32,
    /// Upper pitch clamp in degrees.
    pub pitch_max_deg: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            yaw_deg: 0.0,
            pitch_deg: 0.0,
            sensitivity: 0.1,
            invert_y: false,
            base_offset: Vec3::new(0.0, 5.0, -10.0),
            aim_height: 0.5,
            pitch_min_deg: PITCH_MIN_DEG,
            pitch_max_deg: PITCH_MAX_DEG,
        }
    }
}

impl OrbitCamera {
    /// Apply a pointer delta: yaw and pitch move against the drag direction,
    /// then pitch is clamped.
    pub fn apply_pointer_delta(&mut self, delta: Vec2) {
        let dy = if self.invert_y { -delta.y } else { delta.y };
        self.yaw_deg -= delta.x * self.sensitivity;
        self.pitch_deg -= dy * self.sensitivity;
        self.pitch_deg = self.pitch_deg.clamp(self.pitch_min_deg, self.pitch_max_deg);
    }

    /// The base offset rotated by the current yaw and pitch.
    ///
    /// Yaw rotates about world-up; pitch rotates about the right axis
    /// derived from the yawed offset. If that axis degenerates (offset
    /// parallel to world-up), the pitch rotation is skipped and the
    /// yaw-only offset is returned.
    #[must_use]
    pub fn orbit_offset(&self) -> Vec3 {
        let yawed = Quat::from_axis_angle(Vec3::Y, self.yaw_deg.to_radians()) * self.base_offset;
        let right = Vec3::Y.cross(yawed).normalize_or_zero();
        if right == Vec3::ZERO {
            return yawed;
        }
        Quat::from_axis_angle(right, self.pitch_deg.to_radians()) * yawed
    }

    /// Compute the camera pose for a rider at `rider_pos`: orbit offset for
    /// position, aimed at a point `aim_height` above the rider.
    #[must_use]
    pub fn pose(&self, rider_pos: Vec3) -> Pose {
        let position = rider_pos + self.orbit_offset();
        let aim = rider_pos + Vec3::Y * self.aim_height;
        Pose {
            position,
            rotation: look_rotation(aim - position, Vec3::Y),
        }
    }
}

/// Drain the accumulated pointer delta into the orbit angles.
///
/// Takes the delta rather than reading it, so each unit of motion turns the
/// camera exactly once even when several fixed steps run in one frame.
pub fn orbit_look_system(pointer: &mut PointerState, cam: &mut OrbitCamera) {
    cam.apply_pointer_delta(pointer.take_delta());
}

/// Place the camera for the current tick. Writes the computed pose through.
pub fn orbit_follow_system(cam: &OrbitCamera, rider_pos: Vec3, camera_pose: &mut Pose) {
    *camera_pose = cam.pose(rider_pos);
}
