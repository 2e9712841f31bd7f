//! Movement intents
//!
//! A movement state turns one tick's input sample into force on the
//! controller. States only ever see the controller through [`ForceControl`].

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Source of raw named input axes
pub trait InputAxes {
    /// Raw (unsmoothed) axis value, nominally in [-1, 1]
    fn axis(&self, name: &str) -> f32;
}

/// Narrow control surface handed to movement states
pub trait ForceControl {
    /// Overwrite the horizontal force (not additive, not clamped)
    fn set_horizontal_force(&mut self, value: f32);
}

/// Both movement axes as read once at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AxisSample {
    pub horizontal: f32,
    pub vertical: f32,
}

impl AxisSample {
    /// Read the named axes, clamping into [-1, 1]. NaN reads as 0.
    pub fn read(input: &dyn InputAxes, horizontal_axis: &str, vertical_axis: &str) -> Self {
        Self {
            horizontal: clamp_axis(input.axis(horizontal_axis)),
            vertical: clamp_axis(input.axis(vertical_axis)),
        }
    }
}

#[inline]
fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// One movement behaviour run every tick before integration
pub trait MovementState {
    /// Latch this tick's input
    fn local_input(&mut self, input: AxisSample);

    /// Push the latched intent into the controller
    fn execute(&mut self, control: &mut dyn ForceControl);
}

/// Walks left/right at a fixed speed outside the dead zone
#[derive(Debug, Clone, PartialEq)]
pub struct HorizontalMovement {
    speed: f32,
    dead_zone: f32,
    horizontal: f32,
}

impl HorizontalMovement {
    pub fn new(speed: f32, dead_zone: f32) -> Self {
        Self {
            speed,
            dead_zone,
            horizontal: 0.0,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.move_speed, settings.input_dead_zone)
    }

    /// Horizontal force for the latched input
    pub fn target_force(&self) -> f32 {
        if self.horizontal.abs() > self.dead_zone {
            self.horizontal * self.speed
        } else {
            0.0
        }
    }
}

impl MovementState for HorizontalMovement {
    fn local_input(&mut self, input: AxisSample) {
        self.horizontal = input.horizontal;
    }

    fn execute(&mut self, control: &mut dyn ForceControl) {
        control.set_horizontal_force(self.target_force());
    }
}
