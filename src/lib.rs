//! Ledgewalk - a 2D kinematic platformer character controller
//!
//! Core modules:
//! - `sim`: Per-tick integration, ground probing, actor state, movement intents
//! - `settings`: Data-driven controller tuning
//! - `world`: Reference collaborators (static level geometry, box actor, scripted input)
//! - `error`: Configuration and precondition failures

pub mod error;
pub mod settings;
pub mod sim;
pub mod world;

pub use error::{ConfigError, ControllerError};
pub use settings::Settings;

use glam::Vec2;

/// Controller configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the demo driver (120 Hz)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the driver will feed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Default gravity (units/s², negative is down)
    pub const DEFAULT_GRAVITY: f32 = -20.0;
    /// Default number of ground probes
    pub const DEFAULT_PROBE_COUNT: usize = 4;
    /// Default resting gap between actor and ground
    pub const DEFAULT_CLEARANCE_BUFFER: f32 = 0.05;
    /// Default horizontal speed at full input
    pub const DEFAULT_MOVE_SPEED: f32 = 10.0;
    /// Default input dead zone
    pub const DEFAULT_INPUT_DEAD_ZONE: f32 = 0.1;

    /// Vertical displacements smaller than this after a ground clamp snap to zero
    pub const GROUND_SNAP_EPSILON: f32 = 1e-4;
}

/// Right-hand axis for a given up axis (up rotated 90° clockwise)
#[inline]
pub fn right_of(up: Vec2) -> Vec2 {
    Vec2::new(up.y, -up.x)
}

/// Unit up axis of a body rotated by `rotation` radians counter-clockwise
#[inline]
pub fn up_from_rotation(rotation: f32) -> Vec2 {
    Vec2::new(-rotation.sin(), rotation.cos())
}
