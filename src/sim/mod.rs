//! Kinematic character simulation
//!
//! Everything that runs inside a tick lives here. Like the rest of the crate
//! it is single-threaded and frame-stepped:
//! - The caller supplies delta time; nothing here paces frames
//! - Level geometry and the actor's transform are injected capabilities
//! - One controller per actor, no state shared between actors

pub mod bounds;
pub mod character;
pub mod ground;
pub mod intent;
pub mod probe;
pub mod state;
pub mod tick;

pub use bounds::{Aabb, Bounds, compute_bounds};
pub use character::Character;
pub use ground::{GroundResolution, ProbeCast, ProbeFan, resolve_vertical_collision};
pub use intent::{AxisSample, ForceControl, HorizontalMovement, InputAxes, MovementState};
pub use probe::{ActorBody, CollisionMask, ProbeHit, ProbeService};
pub use state::{ActorState, TickReport};
pub use tick::{KinematicController, check_delta_time};
