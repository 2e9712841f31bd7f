//! Ledgewalk demo driver
//!
//! Drops a box actor onto seeded stepped terrain and walks it back and forth
//! with scripted input, stepping the simulation at a fixed rate from a
//! variable frame clock. Run with `RUST_LOG=debug` to see landings.

use std::path::PathBuf;
use std::process::ExitCode;

use glam::Vec2;

use ledgewalk::consts::*;
use ledgewalk::sim::Character;
use ledgewalk::world::{BoxBody, ScriptedInput, StaticWorld};
use ledgewalk::{ControllerError, Settings};

/// Seed for the demo terrain
const TERRAIN_SEED: u64 = 0x1ed9e;
const TERRAIN_STEPS: usize = 16;
/// Frames to simulate, at a jittery ~60 Hz
const DEMO_FRAMES: u32 = 600;

/// Fixed-step driver for one character
struct Demo<'w> {
    character: Character<BoxBody, &'w StaticWorld>,
    input: ScriptedInput,
    accumulator: f32,
    sim_time: f32,
}

impl<'w> Demo<'w> {
    fn new(settings: &Settings, world: &'w StaticWorld) -> Result<Self, ControllerError> {
        let body = BoxBody::new(Vec2::new(-2.0, 4.0), Vec2::new(0.4, 0.9));
        Ok(Self {
            character: Character::new(settings, body, world)?,
            input: ScriptedInput::new(),
            accumulator: 0.0,
            sim_time: 0.0,
        })
    }

    /// Walk right, pause, walk left, pause
    fn script_input(&mut self) {
        let phase = self.sim_time % 8.0;
        let horizontal = match phase {
            p if p < 3.0 => 1.0,
            p if p < 4.0 => 0.0,
            p if p < 7.0 => -1.0,
            _ => 0.0,
        };
        self.input.set_axis("Horizontal", horizontal);
    }

    /// Run simulation ticks
    fn update(&mut self, dt: f32) -> Result<(), ControllerError> {
        let dt = dt.min(MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.script_input();
            self.character.tick(&self.input, SIM_DT)?;
            self.accumulator -= SIM_DT;
            self.sim_time += SIM_DT;
            substeps += 1;
        }
        Ok(())
    }
}

fn run(settings_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default(settings_path.as_deref())?;
    let world = StaticWorld::stepped_terrain(TERRAIN_SEED, TERRAIN_STEPS);
    let mut demo = Demo::new(&settings, &world)?;

    for frame in 0..DEMO_FRAMES {
        // Frame clock wobbles between ~14 ms and ~19 ms
        let jitter = ((frame % 7) as f32 - 3.0) * 0.0008;
        demo.update(1.0 / 60.0 + jitter)?;

        if frame % 60 == 0 {
            let controller = demo.character.controller();
            let body = controller.body();
            log::info!(
                "t={:5.2}s pos=({:6.2}, {:6.2}) force=({:6.2}, {:6.2}) grounded={} falling={}",
                demo.sim_time,
                body.center.x,
                body.center.y,
                controller.force().x,
                controller.force().y,
                demo.character.is_grounded(),
                demo.character.is_falling(),
            );
            for cast in controller.probe_casts() {
                log::debug!(
                    "  probe origin={} length={:.3} hit={:?}",
                    cast.origin,
                    cast.length,
                    cast.hit
                );
            }
        }
    }

    let body = demo.character.controller().body();
    log::info!(
        "Finished {DEMO_FRAMES} frames at ({:.2}, {:.2}), surface below: {:?}",
        body.center.x,
        body.center.y,
        world.surface_at(body.center.x)
    );
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings_path = std::env::args_os().nth(1).map(PathBuf::from);
    match run(settings_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
