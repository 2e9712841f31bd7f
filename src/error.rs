//! Error types
//!
//! Everything in the tick pipeline is either a normal branch or a fatal
//! precondition. These enums name the preconditions.

use thiserror::Error;

/// Rejected or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("probe count must be at least 1, got {0}")]
    InvalidProbeCount(usize),

    #[error("clearance buffer must be finite and non-negative, got {0}")]
    InvalidClearanceBuffer(f32),

    #[error("input dead zone must lie in [0, 1), got {0}")]
    InvalidDeadZone(f32),

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f32 },

    #[error("failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failures raised by the controller itself
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The actor has no collider, so there is no geometry to probe from
    #[error("actor has no collider attached")]
    MissingCollider,

    /// Negative, NaN or infinite delta time
    #[error("delta time must be finite and non-negative, got {0}")]
    InvalidDeltaTime(f32),
}
