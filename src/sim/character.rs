//! Input-driven character
//!
//! Runs every movement state against the controller once per tick, then
//! integrates. States run in insertion order, so a later state overrides the
//! force an earlier one set.

use super::intent::{AxisSample, HorizontalMovement, InputAxes, MovementState};
use super::probe::{ActorBody, ProbeService};
use super::state::{ActorState, TickReport};
use super::tick::{KinematicController, check_delta_time};
use crate::error::ControllerError;
use crate::settings::Settings;

/// A controlled actor together with its movement states
pub struct Character<B, P> {
    controller: KinematicController<B, P>,
    states: Vec<Box<dyn MovementState>>,
    horizontal_axis: String,
    vertical_axis: String,
    last_input: AxisSample,
}

impl<B: ActorBody, P: ProbeService> Character<B, P> {
    /// Character with the default horizontal movement state
    pub fn new(settings: &Settings, body: B, probe: P) -> Result<Self, ControllerError> {
        let controller = KinematicController::new(settings, body, probe)?;
        let walk: Box<dyn MovementState> = Box::new(HorizontalMovement::from_settings(settings));
        Ok(Self {
            controller,
            states: vec![walk],
            horizontal_axis: settings.horizontal_axis.clone(),
            vertical_axis: settings.vertical_axis.clone(),
            last_input: AxisSample::default(),
        })
    }

    /// Append a movement state; it runs after every state already present
    pub fn push_state(&mut self, state: impl MovementState + 'static) {
        self.states.push(Box::new(state));
    }

    /// Sample input, let every state push force, then integrate one tick
    pub fn tick(&mut self, input: &dyn InputAxes, dt: f32) -> Result<TickReport, ControllerError> {
        check_delta_time(dt)?;

        let sample = AxisSample::read(input, &self.horizontal_axis, &self.vertical_axis);
        self.last_input = sample;

        for state in &mut self.states {
            state.local_input(sample);
            state.execute(&mut self.controller);
        }

        self.controller.tick(dt)
    }
}

impl<B, P> Character<B, P> {
    pub fn controller(&self) -> &KinematicController<B, P> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut KinematicController<B, P> {
        &mut self.controller
    }

    pub fn state(&self) -> ActorState {
        self.controller.state()
    }

    pub fn is_grounded(&self) -> bool {
        self.controller.is_grounded()
    }

    pub fn is_falling(&self) -> bool {
        self.controller.is_falling()
    }

    /// Input sampled at the start of the last tick
    pub fn last_input(&self) -> AxisSample {
        self.last_input
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }
}
