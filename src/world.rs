//! Reference collaborators
//!
//! A static level made of axis-aligned solids, a rotatable box actor and a
//! scripted input source. The demo binary and the tests drive the controller
//! through these; an engine integration would supply its own.

use std::collections::HashMap;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::sim::{Aabb, ActorBody, CollisionMask, InputAxes, ProbeHit, ProbeService};
use crate::{right_of, up_from_rotation};

/// Layer used for walkable level geometry
pub const GROUND_LAYER: CollisionMask = CollisionMask::layer(0);

/// Depth of the generated terrain columns below their top
const TERRAIN_DEPTH: f32 = 20.0;

/// One piece of static level geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    pub aabb: Aabb,
    pub layer: CollisionMask,
}

/// Static level geometry answering probe queries
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StaticWorld {
    solids: Vec<Solid>,
}

impl StaticWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a solid, returning its index
    pub fn add_solid(&mut self, aabb: Aabb, layer: CollisionMask) -> usize {
        self.solids.push(Solid { aabb, layer });
        self.solids.len() - 1
    }

    pub fn solids(&self) -> &[Solid] {
        &self.solids
    }

    /// Seeded run of flat steps: widths 2-6 units, rises and drops of up to
    /// one unit in quarter-unit increments. Starts at x = -4 with its top at 0.
    pub fn stepped_terrain(seed: u64, steps: usize) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = Self::new();

        let mut x = -4.0;
        let mut top = 0.0;
        for step in 0..steps {
            let width: f32 = rng.random_range(2.0..6.0);
            if step > 0 {
                let quarters: i32 = rng.random_range(-4..=4);
                top += quarters as f32 * 0.25;
            }
            world.add_solid(
                Aabb::new(
                    Vec2::new(x, top - TERRAIN_DEPTH),
                    Vec2::new(x + width, top),
                ),
                GROUND_LAYER,
            );
            x += width;
        }

        log::debug!("Generated {} terrain steps (seed {seed})", world.solids.len());
        world
    }

    /// Top of the highest solid spanning `x`
    pub fn surface_at(&self, x: f32) -> Option<f32> {
        self.solids
            .iter()
            .filter(|s| x >= s.aabb.min.x && x <= s.aabb.max.x)
            .map(|s| s.aabb.max.y)
            .reduce(f32::max)
    }
}

impl ProbeService for StaticWorld {
    fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: CollisionMask,
    ) -> Option<ProbeHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO {
            return None;
        }

        self.solids
            .iter()
            .filter(|s| mask.intersects(s.layer))
            .filter_map(|s| ray_aabb(origin, dir, &s.aabb))
            .filter(|&t| t <= max_distance)
            .reduce(f32::min)
            .map(|distance| ProbeHit { distance })
    }
}

/// Slab test. Returns the entry distance along `dir`, or 0 when the origin
/// starts inside the box.
fn ray_aabb(origin: Vec2, dir: Vec2, aabb: &Aabb) -> Option<f32> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for axis in 0..2 {
        let (o, d) = (origin[axis], dir[axis]);
        let (lo, hi) = (aabb.min[axis], aabb.max[axis]);

        if d.abs() < f32::EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let mut t1 = (lo - o) * inv;
        let mut t2 = (hi - o) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        tmin = tmin.max(t1);
        tmax = tmax.min(t2);
        if tmin > tmax {
            return None;
        }
    }

    if tmax < 0.0 {
        return None;
    }
    Some(tmin.max(0.0))
}

/// Rectangular actor that may be rotated about its center
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxBody {
    pub center: Vec2,
    /// Collider half extents in the local frame, `None` without a collider
    pub half_extents: Option<Vec2>,
    /// Counter-clockwise rotation (radians)
    pub rotation: f32,
}

impl BoxBody {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents: Some(half_extents),
            rotation: 0.0,
        }
    }

    pub fn without_collider(center: Vec2) -> Self {
        Self {
            center,
            half_extents: None,
            rotation: 0.0,
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// World-space y of the collider's lowest point
    pub fn bottom(&self) -> Option<f32> {
        self.world_bounds().map(|b| b.min.y)
    }
}

impl ActorBody for BoxBody {
    fn world_bounds(&self) -> Option<Aabb> {
        let half = self.half_extents?;
        let (sin, cos) = self.rotation.sin_cos();
        let (sin, cos) = (sin.abs(), cos.abs());
        let extent = Vec2::new(
            cos * half.x + sin * half.y,
            sin * half.x + cos * half.y,
        );
        Some(Aabb::from_center(self.center, extent))
    }

    fn translate_local(&mut self, displacement: Vec2) {
        let up = self.up();
        self.center += right_of(up) * displacement.x + up * displacement.y;
    }

    fn up(&self) -> Vec2 {
        up_from_rotation(self.rotation)
    }
}

/// Input source with fixed axis values. Unknown axes read as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptedInput {
    axes: HashMap<String, f32>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, name: &str, value: f32) -> Self {
        self.set_axis(name, value);
        self
    }

    pub fn set_axis(&mut self, name: &str, value: f32) {
        self.axes.insert(name.to_string(), value);
    }
}

impl InputAxes for ScriptedInput {
    fn axis(&self, name: &str) -> f32 {
        self.axes.get(name).copied().unwrap_or(0.0)
    }
}
