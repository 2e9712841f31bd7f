//! Actor bounds
//!
//! Corner points and size of the actor's collider, recomputed from the body
//! whenever the controller needs current geometry.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::probe::ActorBody;
use crate::error::ControllerError;

/// Axis-aligned bounding box in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }
}

/// Corners and dimensions of the actor's collider
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
    pub top_left: Vec2,
    pub top_right: Vec2,
    pub height: f32,
    pub width: f32,
}

impl Bounds {
    pub fn from_aabb(aabb: Aabb) -> Self {
        let bottom_left = Vec2::new(aabb.min.x, aabb.min.y);
        let bottom_right = Vec2::new(aabb.max.x, aabb.min.y);
        let top_left = Vec2::new(aabb.min.x, aabb.max.y);
        let top_right = Vec2::new(aabb.max.x, aabb.max.y);

        Self {
            bottom_left,
            bottom_right,
            top_left,
            top_right,
            height: bottom_left.distance(top_left),
            width: bottom_left.distance(bottom_right),
        }
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    /// Midpoint of the left edge
    #[inline]
    pub fn left_mid(&self) -> Vec2 {
        (self.bottom_left + self.top_left) * 0.5
    }

    /// Midpoint of the right edge
    #[inline]
    pub fn right_mid(&self) -> Vec2 {
        (self.bottom_right + self.top_right) * 0.5
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.bottom_left + self.top_right) * 0.5
    }
}

/// Read the body's current collider extent.
///
/// A body without a collider is a precondition failure.
pub fn compute_bounds<B: ActorBody + ?Sized>(body: &B) -> Result<Bounds, ControllerError> {
    body.world_bounds()
        .map(Bounds::from_aabb)
        .ok_or(ControllerError::MissingCollider)
}
