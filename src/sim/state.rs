//! Actor state exposed to sibling systems

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Ground contact flags for the current tick.
///
/// Reset at the start of every tick, then written by ground detection.
/// Nothing carries over between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActorState {
    /// Bottom edge is in contact with a surface this tick
    pub is_grounded: bool,
    /// Actor was moving down this tick
    pub is_falling: bool,
}

impl ActorState {
    pub fn reset(&mut self) {
        self.is_grounded = false;
        self.is_falling = false;
    }
}

/// Outcome of one completed tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Displacement committed to the body (local frame)
    pub displacement: Vec2,
    /// Force carried into the next tick
    pub force: Vec2,
    pub state: ActorState,
}
