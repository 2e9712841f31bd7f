//! Capabilities the controller consumes
//!
//! The controller never owns level geometry or a transform of its own. It is
//! handed a probe service to query the level and a body to read bounds from
//! and move.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use crate::right_of;

/// Bitmask of collision layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionMask(u32);

impl CollisionMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(u32::MAX);

    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Mask containing only the given layer index. Indices past 31 name no
    /// layer and give an empty mask.
    pub const fn layer(index: u32) -> Self {
        match 1u32.checked_shl(index) {
            Some(bits) => Self(bits),
            None => Self::NONE,
        }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if the two masks share at least one layer
    #[inline]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl std::ops::BitOr for CollisionMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Nearest hit reported by a probe
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Distance from the probe origin along its direction
    pub distance: f32,
}

/// Ray query against static level geometry.
///
/// Implementations must return the nearest hit within `max_distance`, or
/// `None`. A miss is a normal outcome. Calls are synchronous and must not
/// block.
pub trait ProbeService {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionMask,
    ) -> Option<ProbeHit>;
}

impl<T: ProbeService + ?Sized> ProbeService for &T {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionMask,
    ) -> Option<ProbeHit> {
        (**self).cast(origin, direction, max_distance, mask)
    }
}

/// The controlled actor as seen by the controller: collider extent, local
/// frame and a way to move it.
pub trait ActorBody {
    /// World-space bounds of the collider, `None` if no collider is attached
    fn world_bounds(&self) -> Option<Aabb>;

    /// Move the actor by a displacement expressed in its local (rotated) frame
    fn translate_local(&mut self, displacement: Vec2);

    /// Unit vector of the actor's local up axis in world space
    fn up(&self) -> Vec2 {
        Vec2::Y
    }

    /// Unit vector of the actor's local right axis in world space
    fn right(&self) -> Vec2 {
        right_of(self.up())
    }
}
