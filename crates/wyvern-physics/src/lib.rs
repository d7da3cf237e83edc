//! Collision world and the rider's move-and-slide bridge.
//!
//! Wraps Rapier 3D behind a single [`PhysicsWorld`] owning all simulation
//! state. The rider itself is kinematic; see [`rider`] for the capsule and
//! the per-tick move-and-slide step.

use rapier3d::prelude::*;

pub mod rider;

pub use rider::{RiderPhysics, move_and_slide, rider_position, spawn_rider};

/// Owns all Rapier simulation state.
///
/// Scenery is added as fixed bodies with colliders; the rider moves through
/// it kinematically via [`move_and_slide`].
pub struct PhysicsWorld {
    /// World gravity. Affects dynamic bodies only; the kinematic rider
    /// flies and ignores it.
    pub gravity: Vector,
    /// Timestep and solver configuration.
    pub integration_parameters: IntegrationParameters,
    /// The main simulation pipeline.
    pub physics_pipeline: PhysicsPipeline,
    /// Sleeping/awake body islands.
    pub island_manager: IslandManager,
    /// Broad-phase collision detection; also provides the query pipeline
    /// used by the character controller.
    pub broad_phase: BroadPhaseBvh,
    /// Narrow-phase contact manifolds.
    pub narrow_phase: NarrowPhase,
    /// All rigid bodies.
    pub rigid_body_set: RigidBodySet,
    /// All colliders.
    pub collider_set: ColliderSet,
    /// Impulse-based joints.
    pub impulse_joint_set: ImpulseJointSet,
    /// Multibody joints.
    pub multibody_joint_set: MultibodyJointSet,
    /// Continuous collision detection solver.
    pub ccd_solver: CCDSolver,
}

impl PhysicsWorld {
    /// New world with earth gravity and a 60 Hz timestep matching the
    /// fixed simulation rate.
    pub fn new() -> Self {
        let integration_parameters = IntegrationParameters {
            dt: 1.0 / 60.0,
            ..Default::default()
        };

        Self {
            gravity: Vector::new(0.0, -9.81, 0.0),
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
        }
    }

    /// Advance the simulation by one fixed timestep.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Add a fixed cuboid obstacle centered at `center` with the given
    /// half-extents. Returns the collider handle.
    pub fn add_fixed_cuboid(
        &mut self,
        center: glam::Vec3,
        half_extents: glam::Vec3,
    ) -> ColliderHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(Vector::new(center.x, center.y, center.z))
            .build();
        let handle = self.rigid_body_set.insert(body);
        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
