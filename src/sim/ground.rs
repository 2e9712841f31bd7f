//! Ground detection
//!
//! Casts a fan of parallel probes down from the actor and clamps the tick's
//! vertical displacement so the actor stops on the first surface below it.
//!
//! Probe origins run along the vertical middle of the collider, from the left
//! edge to the right edge, lifted by the clearance buffer and shifted by the
//! horizontal displacement of this tick. A probe therefore has to travel half
//! the actor's height plus the buffer before it reaches the actor's bottom,
//! and whatever it travels beyond that is free space below.

use glam::Vec2;

use super::bounds::Bounds;
use super::probe::{CollisionMask, ProbeService};
use super::state::ActorState;
use crate::consts::GROUND_SNAP_EPSILON;
use crate::error::ConfigError;
use crate::right_of;
use crate::settings::Settings;

/// Probe layout for ground detection. Always holds at least one probe.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeFan {
    count: usize,
    clearance_buffer: f32,
    mask: CollisionMask,
    record: bool,
}

impl ProbeFan {
    pub fn new(
        count: usize,
        clearance_buffer: f32,
        mask: CollisionMask,
    ) -> Result<Self, ConfigError> {
        if count < 1 {
            return Err(ConfigError::InvalidProbeCount(count));
        }
        if !clearance_buffer.is_finite() || clearance_buffer < 0.0 {
            return Err(ConfigError::InvalidClearanceBuffer(clearance_buffer));
        }
        Ok(Self {
            count,
            clearance_buffer,
            mask,
            record: false,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ConfigError> {
        Ok(Self::new(
            settings.probe_count,
            settings.clearance_buffer,
            settings.collision_mask,
        )?
        .with_recording(settings.debug_probes))
    }

    /// Keep a [`ProbeCast`] for every probe fired
    pub fn with_recording(mut self, record: bool) -> Self {
        self.record = record;
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn clearance_buffer(&self) -> f32 {
        self.clearance_buffer
    }

    pub fn mask(&self) -> CollisionMask {
        self.mask
    }

    /// Interpolation factor of probe `index` between the left and right origins.
    /// A lone probe sits in the middle.
    #[inline]
    fn spread(&self, index: usize) -> f32 {
        if self.count == 1 {
            0.5
        } else {
            index as f32 / (self.count - 1) as f32
        }
    }
}

/// One probe fired during ground detection, kept for debug drawing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeCast {
    pub origin: Vec2,
    pub direction: Vec2,
    pub length: f32,
    /// Hit distance, `None` on a miss
    pub hit: Option<f32>,
}

/// Result of a ground detection pass
#[derive(Debug, Clone, PartialEq)]
pub struct GroundResolution {
    /// Tentative displacement with the vertical component clamped
    pub displacement: Vec2,
    pub state: ActorState,
    /// Probes fired, only filled when the fan records
    pub casts: Vec<ProbeCast>,
}

/// Probe below the actor and clamp its downward motion.
///
/// Nothing is cast unless the actor is moving down this tick. Any probe that
/// hits grounds the actor, and each hit re-clamps the displacement in fan
/// order, so the last probe to hit decides where the actor stops.
pub fn resolve_vertical_collision<P: ProbeService + ?Sized>(
    probe: &P,
    fan: &ProbeFan,
    displacement: Vec2,
    bounds: &Bounds,
    up: Vec2,
) -> GroundResolution {
    let mut resolution = GroundResolution {
        displacement,
        state: ActorState::default(),
        casts: Vec::new(),
    };

    if displacement.y >= 0.0 {
        return resolution;
    }
    resolution.state.is_falling = true;

    let half_height = bounds.half_height();
    let length = half_height + fan.clearance_buffer + displacement.y.abs();

    let offset = up * fan.clearance_buffer + right_of(up) * displacement.x;
    let left_origin = bounds.left_mid() + offset;
    let right_origin = bounds.right_mid() + offset;
    let direction = -up;

    for index in 0..fan.count {
        let origin = left_origin.lerp(right_origin, fan.spread(index));
        let hit = probe.cast(origin, direction, length, fan.mask);
        log::trace!(
            "probe {index}: origin={origin}, length={length:.4}, hit={:?}",
            hit.map(|h| h.distance)
        );

        if fan.record {
            resolution.casts.push(ProbeCast {
                origin,
                direction,
                length,
                hit: hit.map(|h| h.distance),
            });
        }

        // A miss never clears a grounded flag set by an earlier probe
        if let Some(hit) = hit {
            resolution.state.is_grounded = true;
            let mut clamped = -hit.distance + half_height + fan.clearance_buffer;
            if clamped.abs() < GROUND_SNAP_EPSILON {
                clamped = 0.0;
            }
            resolution.displacement.y = clamped;
        }
    }

    resolution
}
