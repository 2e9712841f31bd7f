//! Per-tick kinematic integration
//!
//! The controller owns a force vector that persists across ticks. Each tick:
//! gravity is added to the force, the force becomes a tentative displacement,
//! ground probes clamp the vertical part of that displacement, the result is
//! committed to the body, and the force is re-derived from what was actually
//! moved so that a landing cancels accumulated fall speed.

use glam::Vec2;

use super::bounds::{Bounds, compute_bounds};
use super::ground::{ProbeCast, ProbeFan, resolve_vertical_collision};
use super::intent::ForceControl;
use super::probe::{ActorBody, ProbeService};
use super::state::{ActorState, TickReport};
use crate::error::ControllerError;
use crate::settings::Settings;

/// Reject negative or non-finite delta times before any state is touched
pub fn check_delta_time(dt: f32) -> Result<(), ControllerError> {
    if dt.is_finite() && dt >= 0.0 {
        Ok(())
    } else {
        log::warn!("Rejected tick with delta time {dt}");
        Err(ControllerError::InvalidDeltaTime(dt))
    }
}

/// Kinematic controller for one actor
#[derive(Debug)]
pub struct KinematicController<B, P> {
    body: B,
    probe: P,
    gravity: f32,
    fan: ProbeFan,
    /// Persistent force (units/s)
    force: Vec2,
    /// Displacement for the tick in progress, or the last committed one
    displacement: Vec2,
    bounds: Bounds,
    state: ActorState,
    casts: Vec<ProbeCast>,
}

impl<B: ActorBody, P: ProbeService> KinematicController<B, P> {
    /// Build a controller around a body and the level it moves through.
    ///
    /// Fails if the settings are out of range or the body has no collider.
    pub fn new(settings: &Settings, body: B, probe: P) -> Result<Self, ControllerError> {
        settings.validate()?;
        let fan = ProbeFan::from_settings(settings)?;
        let bounds = compute_bounds(&body)?;

        Ok(Self {
            body,
            probe,
            gravity: settings.gravity_acceleration,
            fan,
            force: Vec2::ZERO,
            displacement: Vec2::ZERO,
            bounds,
            state: ActorState::default(),
            casts: Vec::new(),
        })
    }

    /// Run one full tick: gravity, displacement, ground clamp, commit, force.
    ///
    /// Delta time and bounds are checked before anything changes, so a tick
    /// that fails up front leaves the controller untouched. Only a collider
    /// vanishing during the commit itself can fail later; the body has then
    /// moved and the force already matches that move.
    pub fn tick(&mut self, dt: f32) -> Result<TickReport, ControllerError> {
        check_delta_time(dt)?;
        let bounds = compute_bounds(&self.body)?;

        let was_grounded = self.state.is_grounded;

        self.on_tick_start(dt);
        self.on_mid_tick(bounds);
        self.commit(self.displacement);
        self.on_tick_end(dt)?;

        if self.state.is_grounded != was_grounded {
            if self.state.is_grounded {
                log::debug!("Landed, force={}", self.force);
            } else {
                log::debug!("Left ground, falling={}", self.state.is_falling);
            }
        }

        Ok(self.report())
    }

    /// Reset the actor state, apply gravity and derive the tentative displacement
    pub fn on_tick_start(&mut self, dt: f32) {
        self.state.reset();
        self.force.y += self.gravity * dt;
        self.displacement = self.force * dt;
    }

    /// Clamp the tentative displacement against the ground below `bounds`
    pub fn on_mid_tick(&mut self, bounds: Bounds) {
        self.bounds = bounds;
        let resolution = resolve_vertical_collision(
            &self.probe,
            &self.fan,
            self.displacement,
            &self.bounds,
            self.body.up(),
        );
        self.displacement = resolution.displacement;
        self.state = resolution.state;
        self.casts = resolution.casts;
    }

    /// Move the body by `displacement` in its local frame. This becomes the
    /// displacement the force is re-derived from at tick end.
    pub fn commit(&mut self, displacement: Vec2) {
        self.displacement = displacement;
        self.body.translate_local(displacement);
    }

    /// Re-derive force from the committed displacement and refresh bounds.
    ///
    /// A zero delta time leaves the force untouched. The force is settled
    /// before the bounds lookup, so a missing collider here cannot leave it
    /// out of step with the move that was just made.
    pub fn on_tick_end(&mut self, dt: f32) -> Result<(), ControllerError> {
        if dt > 0.0 {
            self.force = self.displacement / dt;
        }
        self.bounds = compute_bounds(&self.body)?;
        Ok(())
    }

    pub fn report(&self) -> TickReport {
        TickReport {
            displacement: self.displacement,
            force: self.force,
            state: self.state,
        }
    }
}

impl<B, P> KinematicController<B, P> {
    /// Overwrite the horizontal force. Takes effect at the next tick start.
    pub fn set_horizontal_force(&mut self, value: f32) {
        self.force.x = value;
    }

    pub fn force(&self) -> Vec2 {
        self.force
    }

    /// Replace the force outright (teleports, knockback, tests)
    pub fn set_force(&mut self, force: Vec2) {
        self.force = force;
    }

    pub fn displacement(&self) -> Vec2 {
        self.displacement
    }

    pub fn state(&self) -> ActorState {
        self.state
    }

    pub fn is_grounded(&self) -> bool {
        self.state.is_grounded
    }

    pub fn is_falling(&self) -> bool {
        self.state.is_falling
    }

    /// Bounds as of the last recompute
    pub fn bounds(&self) -> &Bounds {
        &self.bounds
    }

    /// Probes fired during the last tick (empty unless `debug_probes` is set)
    pub fn probe_casts(&self) -> &[ProbeCast] {
        &self.casts
    }

    pub fn body(&self) -> &B {
        &self.body
    }

    pub fn body_mut(&mut self) -> &mut B {
        &mut self.body
    }
}

impl<B, P> ForceControl for KinematicController<B, P> {
    fn set_horizontal_force(&mut self, value: f32) {
        KinematicController::set_horizontal_force(self, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::bounds::Aabb;
    use crate::sim::probe::{CollisionMask, ProbeHit};
    use proptest::prelude::*;

    /// Axis-aligned box that moves in world space
    #[derive(Debug)]
    struct TestBody {
        center: Vec2,
        half_extents: Vec2,
        collider: bool,
    }

    impl TestBody {
        fn at(center: Vec2) -> Self {
            Self {
                center,
                half_extents: Vec2::splat(0.5),
                collider: true,
            }
        }

        fn bottom(&self) -> f32 {
            self.center.y - self.half_extents.y
        }
    }

    impl ActorBody for TestBody {
        fn world_bounds(&self) -> Option<Aabb> {
            self.collider
                .then(|| Aabb::from_center(self.center, self.half_extents))
        }

        fn translate_local(&mut self, displacement: Vec2) {
            self.center += displacement;
        }
    }

    struct NoCollider;

    impl ActorBody for NoCollider {
        fn world_bounds(&self) -> Option<Aabb> {
            None
        }

        fn translate_local(&mut self, _displacement: Vec2) {}
    }

    /// Infinite floor with its top at `top`
    struct Floor {
        top: f32,
    }

    impl ProbeService for Floor {
        fn cast(
            &self,
            origin: Vec2,
            direction: Vec2,
            max_distance: f32,
            _mask: CollisionMask,
        ) -> Option<ProbeHit> {
            if direction.y >= 0.0 {
                return None;
            }
            let distance = (origin.y - self.top).max(0.0);
            (distance <= max_distance).then_some(ProbeHit { distance })
        }
    }

    struct Void;

    impl ProbeService for Void {
        fn cast(&self, _: Vec2, _: Vec2, _: f32, _: CollisionMask) -> Option<ProbeHit> {
            None
        }
    }

    fn controller<P: ProbeService>(center: Vec2, probe: P) -> KinematicController<TestBody, P> {
        KinematicController::new(&Settings::default(), TestBody::at(center), probe).unwrap()
    }

    /// Always reports the same hit distance
    struct FixedHit(f32);

    impl ProbeService for FixedHit {
        fn cast(&self, _: Vec2, _: Vec2, _: f32, _: CollisionMask) -> Option<ProbeHit> {
            Some(ProbeHit { distance: self.0 })
        }
    }

    #[test]
    fn test_airborne_tick() {
        let mut controller = controller(Vec2::new(0.0, 10.0), Void);

        let report = controller.tick(0.1).unwrap();

        assert!((report.force.y - (-2.0)).abs() < 1e-6);
        assert!((report.displacement.y - (-0.2)).abs() < 1e-6);
        assert!(!report.state.is_grounded);
        assert!(report.state.is_falling);
        assert!((controller.body().center.y - 9.8).abs() < 1e-5);
    }

    #[test]
    fn test_landing_clamps_and_cancels_fall() {
        // Half height 0.5, buffer 0.05, every probe hits at 0.1
        let mut controller = controller(Vec2::ZERO, FixedHit(0.1));

        let report = controller.tick(0.1).unwrap();

        assert!((report.displacement.y - 0.45).abs() < 1e-6);
        assert!(report.state.is_grounded);
        // Force follows the realized displacement
        assert!((report.force.y - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_zero_dt_keeps_force() {
        let mut controller = controller(Vec2::ZERO, Void);
        controller.set_force(Vec2::new(3.0, -1.0));

        let report = controller.tick(0.0).unwrap();

        assert_eq!(report.force, Vec2::new(3.0, -1.0));
        assert_eq!(report.displacement, Vec2::ZERO);
    }

    #[test]
    fn test_negative_dt_rejected() {
        let mut controller = controller(Vec2::ZERO, Void);
        controller.set_force(Vec2::new(1.0, 2.0));

        for dt in [-0.016, f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(matches!(
                controller.tick(dt),
                Err(ControllerError::InvalidDeltaTime(_))
            ));
        }
        assert_eq!(controller.force(), Vec2::new(1.0, 2.0));
        assert_eq!(controller.body().center, Vec2::ZERO);

        // Still usable after a bad frame
        let report = controller.tick(0.1).unwrap();
        assert!(report.force.is_finite());
    }

    #[test]
    fn test_lost_collider_leaves_state_alone() {
        let mut controller = controller(Vec2::new(0.0, 0.5), Floor { top: 0.0 });
        controller.set_force(Vec2::new(2.0, 0.0));
        controller.tick(SIM_DT).unwrap();
        let before = controller.report();
        let center = controller.body().center;

        controller.body_mut().collider = false;
        assert!(matches!(
            controller.tick(SIM_DT),
            Err(ControllerError::MissingCollider)
        ));

        assert_eq!(controller.report(), before);
        assert_eq!(controller.body().center, center);
    }

    #[test]
    fn test_commit_uses_given_displacement() {
        let mut controller = controller(Vec2::new(0.0, 10.0), Void);

        controller.on_tick_start(0.1);
        let bounds = *controller.bounds();
        controller.on_mid_tick(bounds);
        controller.commit(Vec2::new(0.5, -0.1));
        controller.on_tick_end(0.1).unwrap();

        assert!((controller.body().center - Vec2::new(0.5, 9.9)).length() < 1e-5);
        assert_eq!(controller.displacement(), Vec2::new(0.5, -0.1));
        assert!((controller.force() - Vec2::new(5.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn test_missing_collider_fails_at_construction() {
        let result = KinematicController::new(&Settings::default(), NoCollider, Void);
        assert!(matches!(result, Err(ControllerError::MissingCollider)));
    }

    #[test]
    fn test_invalid_settings_fail_at_construction() {
        let settings = Settings {
            probe_count: 0,
            ..Default::default()
        };
        let result = KinematicController::new(&settings, TestBody::at(Vec2::ZERO), Void);
        assert!(matches!(result, Err(ControllerError::Config(_))));
    }

    #[test]
    fn test_horizontal_force_overwrites() {
        let mut controller = controller(Vec2::ZERO, Void);

        controller.set_horizontal_force(4.0);
        controller.set_horizontal_force(10.0);
        let report = controller.tick(0.1).unwrap();

        assert!((report.displacement.x - 1.0).abs() < 1e-6);
        assert!((report.force.x - 10.0).abs() < 1e-5);
    }

    #[test]
    fn test_late_horizontal_force_waits_a_tick() {
        let mut controller = controller(Vec2::ZERO, Void);

        controller.on_tick_start(0.1);
        controller.set_horizontal_force(10.0);
        assert_eq!(controller.displacement().x, 0.0);

        let bounds = *controller.bounds();
        controller.on_mid_tick(bounds);
        controller.commit(controller.displacement());
        controller.on_tick_end(0.1).unwrap();
        // Re-derived from the displacement, which never saw the late force
        assert_eq!(controller.force().x, 0.0);
    }

    #[test]
    fn test_falls_then_rests_on_floor() {
        let mut controller = controller(Vec2::new(0.0, 3.0), Floor { top: 0.0 });

        let mut landed_at = None;
        for i in 0..600 {
            let report = controller.tick(SIM_DT).unwrap();
            if report.state.is_grounded && landed_at.is_none() {
                landed_at = Some(i);
            }
        }
        assert!(landed_at.is_some());

        // Resting: every further tick is grounded with no vertical motion
        for _ in 0..120 {
            let report = controller.tick(SIM_DT).unwrap();
            assert!(report.state.is_grounded);
            assert!(report.state.is_falling);
            assert_eq!(report.displacement.y, 0.0);
        }
        assert!(controller.body().bottom().abs() < 1e-3);
    }

    #[test]
    fn test_walks_along_floor() {
        let mut controller = controller(Vec2::new(0.0, 0.5), Floor { top: 0.0 });

        for _ in 0..120 {
            controller.set_horizontal_force(10.0);
            let report = controller.tick(SIM_DT).unwrap();
            assert!(report.state.is_grounded);
        }
        assert!((controller.body().center.x - 10.0).abs() < 1e-3);
        assert!(controller.body().bottom().abs() < 1e-3);
    }

    #[test]
    fn test_recording_follows_settings() {
        let settings = Settings {
            debug_probes: true,
            probe_count: 3,
            ..Default::default()
        };
        let body = TestBody::at(Vec2::new(0.0, 0.5));
        let mut controller = KinematicController::new(&settings, body, Floor { top: 0.0 }).unwrap();
        controller.tick(SIM_DT).unwrap();
        assert_eq!(controller.probe_casts().len(), 3);
        assert!(controller.probe_casts().iter().all(|c| c.hit.is_some()));
    }

    proptest! {
        #[test]
        fn prop_gravity_accumulates_while_airborne(
            start in -50.0f32..50.0,
            dt in 0.001f32..0.1,
            ticks in 1usize..30,
        ) {
            let mut controller = KinematicController::new(
                &Settings::default(),
                TestBody::at(Vec2::ZERO),
                Void,
            ).unwrap();
            controller.set_force(Vec2::new(0.0, start));

            for _ in 0..ticks {
                let before = controller.force().y;
                let report = controller.tick(dt).unwrap();
                prop_assert!(report.force.y < before);
                prop_assert!(!report.state.is_grounded);
            }
        }

        #[test]
        fn prop_force_matches_displacement(
            fx in -20.0f32..20.0,
            fy in -20.0f32..20.0,
            dt in 0.001f32..0.1,
        ) {
            let mut controller = KinematicController::new(
                &Settings::default(),
                TestBody::at(Vec2::new(0.0, 0.5)),
                Floor { top: 0.0 },
            ).unwrap();
            controller.set_force(Vec2::new(fx, fy));

            let report = controller.tick(dt).unwrap();
            let expected = report.displacement / dt;
            prop_assert!((report.force - expected).length() < 1e-3);
        }
    }
}
