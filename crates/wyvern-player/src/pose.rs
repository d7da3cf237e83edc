//! Position/orientation pair shared by the rider and the camera.

use glam::{Mat3, Quat, Vec3};

/// A world-space pose. Forward is local `-Z`, matching glam's right-handed
/// convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position.
    pub position: Vec3,
    /// World orientation.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    /// Pose at a position with identity orientation.
    #[must_use]
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
        }
    }

    /// The world-space forward direction (`rotation * -Z`).
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

/// Rotation that points local `-Z` along `dir` with `up` as the reference
/// up vector.
///
/// Degenerate inputs fall back rather than producing NaN: a zero direction
/// yields identity, and a direction parallel to `up` uses the shortest-arc
/// rotation from `-Z`.
#[must_use]
pub fn look_rotation(dir: Vec3, up: Vec3) -> Quat {
    let forward = dir.normalize_or_zero();
    if forward == Vec3::ZERO {
        return Quat::IDENTITY;
    }
    let back = -forward;
    let right = up.cross(back).normalize_or_zero();
    if right == Vec3::ZERO {
        return Quat::from_rotation_arc(Vec3::NEG_Z, forward);
    }
    let up = back.cross(right);
    Quat::from_mat3(&Mat3::from_cols(right, up, back))
}
