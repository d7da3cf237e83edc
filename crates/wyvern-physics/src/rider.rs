//! Kinematic rider capsule driven by move-and-slide.
//!
//! The rider is a position-based kinematic body. Each tick the desired
//! translation (`velocity * dt`) goes through Rapier's
//! [`KinematicCharacterController::move_shape`], which slides the capsule
//! along obstacles instead of penetrating them. Flight means no gravity and
//! no grounding logic here.

use rapier3d::control::{CharacterLength, KinematicCharacterController};
use rapier3d::prelude::*;

use crate::PhysicsWorld;

/// Capsule half-height of the cylindrical segment (meters).
const CAPSULE_HALF_HEIGHT: f32 = 0.9;
/// Capsule radius (meters).
const CAPSULE_RADIUS: f32 = 0.5;

/// The rider's physics state: kinematic body, capsule collider, controller.
pub struct RiderPhysics {
    /// Handle to the kinematic rigid body.
    pub body_handle: RigidBodyHandle,
    /// Handle to the capsule collider attached to the body.
    pub collider_handle: ColliderHandle,
    /// Rapier's character controller resolving the slide.
    pub controller: KinematicCharacterController,
}

/// Spawn the rider at `position`: kinematic body plus capsule collider.
///
/// The capsule stays upright regardless of heading; it is rotationally
/// symmetric about Y, so the rider's facing never changes its silhouette.
pub fn spawn_rider(physics: &mut PhysicsWorld, position: glam::Vec3) -> RiderPhysics {
    let body = RigidBodyBuilder::kinematic_position_based()
        .translation(Vector::new(position.x, position.y, position.z))
        .build();
    let body_handle = physics.rigid_body_set.insert(body);

    let collider = ColliderBuilder::capsule_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS)
        .friction(0.0)
        .build();
    let collider_handle =
        physics
            .collider_set
            .insert_with_parent(collider, body_handle, &mut physics.rigid_body_set);

    let controller = KinematicCharacterController {
        offset: CharacterLength::Absolute(0.01),
        ..Default::default()
    };

    tracing::debug!("Rider capsule spawned at {position:?}");

    RiderPhysics {
        body_handle,
        collider_handle,
        controller,
    }
}

/// Apply one tick of flight: slide `velocity * dt` against the scenery and
/// queue the corrected translation on the kinematic body.
///
/// The body moves when the world next steps, matching kinematic
/// position-based semantics.
pub fn move_and_slide(
    rider: &RiderPhysics,
    physics: &mut PhysicsWorld,
    velocity: glam::Vec3,
    dt: f32,
) {
    let desired = Vector::new(velocity.x * dt, velocity.y * dt, velocity.z * dt);

    let filter = QueryFilter::new().exclude_rigid_body(rider.body_handle);
    let query_pipeline = physics.broad_phase.as_query_pipeline(
        physics.narrow_phase.query_dispatcher(),
        &physics.rigid_body_set,
        &physics.collider_set,
        filter,
    );

    let shape = Capsule::new_y(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS);
    let body_pos = physics.rigid_body_set[rider.body_handle].position();

    let corrected =
        rider
            .controller
            .move_shape(dt, &query_pipeline, &shape, body_pos, desired, |_| {});

    let blocked = (desired - corrected.translation).length();
    if blocked > 1e-4 {
        tracing::trace!("Rider slide blocked {blocked:.3}m of desired motion");
    }

    let body = &mut physics.rigid_body_set[rider.body_handle];
    let next = body.translation() + corrected.translation;
    body.set_next_kinematic_translation(next);
}

/// The rider's current world position.
#[must_use]
pub fn rider_position(physics: &PhysicsWorld, rider: &RiderPhysics) -> glam::Vec3 {
    let t = physics.rigid_body_set[rider.body_handle].translation();
    glam::Vec3::new(t.x, t.y, t.z)
}
