//! Controller settings
//!
//! Loaded from JSON alongside the level data. Every field has a default, so a
//! settings file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::CollisionMask;

/// Tunable parameters for one controlled actor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Integration ===
    /// Vertical acceleration applied every tick (units/s², negative is down)
    pub gravity_acceleration: f32,

    // === Ground probes ===
    /// Layers the ground probes collide with
    pub collision_mask: CollisionMask,
    /// Number of parallel probes cast across the actor's bottom
    pub probe_count: usize,
    /// Resting gap kept between the actor and the surface below
    pub clearance_buffer: f32,
    /// Record each tick's probe fan so it can be drawn
    pub debug_probes: bool,

    // === Movement ===
    /// Horizontal speed at full axis deflection (units/s)
    pub move_speed: f32,
    /// Axis magnitudes at or below this are treated as no input
    pub input_dead_zone: f32,
    /// Name of the horizontal input axis
    pub horizontal_axis: String,
    /// Name of the vertical input axis
    pub vertical_axis: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gravity_acceleration: DEFAULT_GRAVITY,

            collision_mask: CollisionMask::ALL,
            probe_count: DEFAULT_PROBE_COUNT,
            clearance_buffer: DEFAULT_CLEARANCE_BUFFER,
            debug_probes: false,

            move_speed: DEFAULT_MOVE_SPEED,
            input_dead_zone: DEFAULT_INPUT_DEAD_ZONE,
            horizontal_axis: "Horizontal".to_string(),
            vertical_axis: "Vertical".to_string(),
        }
    }
}

impl Settings {
    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.probe_count < 1 {
            return Err(ConfigError::InvalidProbeCount(self.probe_count));
        }
        if !self.clearance_buffer.is_finite() || self.clearance_buffer < 0.0 {
            return Err(ConfigError::InvalidClearanceBuffer(self.clearance_buffer));
        }
        if !(0.0..1.0).contains(&self.input_dead_zone) {
            return Err(ConfigError::InvalidDeadZone(self.input_dead_zone));
        }
        for (name, value) in [
            ("gravity_acceleration", self.gravity_acceleration),
            ("move_speed", self.move_speed),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from a file, or fall back to defaults when no path is given
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                log::info!("Using default settings");
                Ok(Self::default())
            }
        }
    }

    /// Save settings as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}
