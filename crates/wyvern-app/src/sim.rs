//! Per-tick simulation: input resolution, flight, physics, camera follow.
//!
//! [`SimState`] owns everything the fixed-rate update touches, so a full
//! tick can run in tests with synthetic input and no window.

use glam::Vec3;
use tracing::info;
use wyvern_config::Config;
use wyvern_input::{Action, ActionState, InputMap, KeyState, PointerState, resolve_actions};
use wyvern_physics::{PhysicsWorld, RiderPhysics, move_and_slide, rider_position, spawn_rider};
use wyvern_player::{
    CloseResponse, FlightController, OrbitCamera, Pose, close_response, flight_control_system,
    orbit_follow_system, orbit_look_system,
};

/// Rider spawn point: hovering above the ground slab.
const SPAWN: Vec3 = Vec3::new(0.0, 3.0, 0.0);

/// What the adapter must do after a tick, beyond rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// Free the pointer (close pressed while captured).
    pub release_pointer: bool,
    /// Exit the event loop (close pressed while free).
    pub quit: bool,
}

/// All simulation state advanced by the fixed-rate update.
pub struct SimState {
    /// Orbit camera angles and tuning.
    pub camera: OrbitCamera,
    /// Camera placement computed each tick.
    pub camera_pose: Pose,
    /// The rider's position and heading.
    pub rider_pose: Pose,
    /// Flight tuning.
    pub flight: FlightController,
    /// Action bindings.
    pub input_map: InputMap,
    /// Resolved action state, carried across ticks for edge detection.
    pub actions: ActionState,
    /// Collision world.
    pub physics: PhysicsWorld,
    /// The rider's kinematic body.
    pub rider: RiderPhysics,
    /// Fixed steps executed.
    pub tick_count: u64,
    log_pose: bool,
}

impl SimState {
    /// Build the simulation from config: camera and flight tuning, a flat
    /// ground slab, and the rider spawned above it.
    pub fn from_config(config: &Config) -> Self {
        let camera = OrbitCamera {
            sensitivity: config.input.sensitivity,
            invert_y: config.input.invert_y,
            base_offset: Vec3::new(0.0, config.camera.offset_up, -config.camera.offset_back),
            aim_height: config.camera.aim_height,
            pitch_min_deg: config.camera.pitch_min_deg,
            pitch_max_deg: config.camera.pitch_max_deg,
            ..Default::default()
        };

        let mut physics = PhysicsWorld::new();
        physics.add_fixed_cuboid(Vec3::new(0.0, -0.5, 0.0), Vec3::new(500.0, 0.5, 500.0));
        let rider = spawn_rider(&mut physics, SPAWN);

        let rider_pose = Pose::at(SPAWN);
        let camera_pose = camera.pose(rider_pose.position);

        Self {
            camera,
            camera_pose,
            rider_pose,
            flight: FlightController {
                fly_speed: config.flight.fly_speed,
            },
            input_map: InputMap::default(),
            actions: ActionState::new(),
            physics,
            rider,
            tick_count: 0,
            log_pose: config.debug.log_pose,
        }
    }

    /// Run one fixed step against this frame's input state.
    ///
    /// The pending look delta is drained here, so each unit of pointer
    /// motion turns the camera exactly once regardless of how many steps
    /// a frame runs.
    pub fn tick(&mut self, keys: &KeyState, pointer: &mut PointerState, dt: f32) -> TickOutcome {
        resolve_actions(&self.input_map, keys, pointer, &mut self.actions);

        let mut outcome = TickOutcome::default();
        if self.actions.just_activated(Action::Close) {
            match close_response(pointer.is_captured()) {
                CloseResponse::ReleasePointer => outcome.release_pointer = true,
                CloseResponse::Quit => outcome.quit = true,
            }
        }

        orbit_look_system(pointer, &mut self.camera);

        let cmd = flight_control_system(
            &self.actions,
            &self.flight,
            &self.rider_pose,
            self.camera_pose.position,
        );

        move_and_slide(&self.rider, &mut self.physics, cmd.velocity, dt);
        self.physics.step();
        self.rider_pose.position = rider_position(&self.physics, &self.rider);
        if let Some(rotation) = cmd.rotation {
            self.rider_pose.rotation = rotation;
        }

        orbit_follow_system(&self.camera, self.rider_pose.position, &mut self.camera_pose);

        self.tick_count += 1;
        if self.log_pose && self.tick_count.is_multiple_of(60) {
            info!(
                "rider at {:?}, yaw {:.1}, pitch {:.1}",
                self.rider_pose.position, self.camera.yaw_deg, self.camera.pitch_deg
            );
        }

        outcome
    }
}
