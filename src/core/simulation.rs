use glam::DVec2;
use tracing::{debug, info, warn};

use crate::core::clock::SimulationClock;
use crate::core::config::SimConfig;
use crate::core::error::{CommandError, LaunchError, SimError};
use crate::core::kinematics::{DOWN, Kinematics};
use crate::core::overlay::VectorOverlay;
use crate::core::peak::PeakMarker;
use crate::core::planner::{LaunchPlan, LaunchSetup, parse_duration, plan_launch};
use crate::core::scenario::{
    Parameter, Projectile, ScenarioKind, ScenarioSpec, Target, apply_parameter, parameter_value,
};
use crate::core::snapshot::{PeakView, Snapshot};
use crate::core::trail::TrailBuffer;
use crate::core::units::UnitConverter;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No plan; bodies can be placed.
    Idle,
    /// Plan committed and the clock is running (possibly paused).
    Launched,
    /// Clock frozen at the target duration.
    Completed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickSummary {
    pub phase: Phase,
    pub effective_s: f64,
    /// The run finished on this tick.
    pub completed: bool,
    /// The peak marker became visible on this tick.
    pub peak_revealed: bool,
}

/// The whole mutable state of one scenario session.
///
/// Fields depend on each other (the clock's elapsed time is meaningless
/// without the plan it was started for), so every mutation goes through a
/// method here and the struct is only ever driven by a single owner.
#[derive(Clone, Debug)]
pub struct SimulationCore {
    spec: ScenarioSpec,
    config: SimConfig,
    kinematics: Kinematics,
    units: UnitConverter,
    projectile: Projectile,
    target: Target,
    sliders: Vec<(Parameter, f64)>,
    duration_text: String,
    target_duration_s: f64,
    plan: Option<LaunchPlan>,
    clock: SimulationClock,
    trail: TrailBuffer,
    peak: PeakMarker,
    velocity: DVec2,
    overlay: VectorOverlay,
    error: Option<LaunchError>,
    phase: Phase,
}

impl SimulationCore {
    /// Expects a config that passed [`SimConfig::validate`].
    pub fn new(kind: ScenarioKind, config: &SimConfig) -> Self {
        Self::with_spec(ScenarioSpec::preset(kind, config), config)
    }

    pub fn with_spec(spec: ScenarioSpec, config: &SimConfig) -> Self {
        let projectile = Projectile::new(spec.initial_projectile, config.projectile_radius_px);
        let target = Target::new(
            spec.initial_target,
            config.target_width_px,
            config.target_height_px,
        );
        let duration_text = spec.default_duration.to_string();
        let target_duration_s = parse_duration(Some(&duration_text)).unwrap_or(0.0);

        let mut core = Self {
            spec,
            config: *config,
            kinematics: config.kinematics(),
            units: config.units(),
            projectile,
            target,
            sliders: Vec::new(),
            duration_text,
            target_duration_s,
            plan: None,
            clock: SimulationClock::from_config(config),
            trail: TrailBuffer::new(config.trail_capacity, config.trail_interval_s),
            peak: PeakMarker::default(),
            velocity: DVec2::ZERO,
            overlay: VectorOverlay::default(),
            error: None,
            phase: Phase::Idle,
        };
        core.sync_target();
        core.seed_sliders();
        info!(scenario = %core.spec.kind, "scenario ready");
        core
    }

    pub fn kind(&self) -> ScenarioKind {
        self.spec.kind
    }

    pub fn spec(&self) -> &ScenarioSpec {
        &self.spec
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn plan(&self) -> Option<&LaunchPlan> {
        self.plan.as_ref()
    }

    pub fn projectile(&self) -> &Projectile {
        &self.projectile
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn trail(&self) -> &TrailBuffer {
        &self.trail
    }

    pub fn peak(&self) -> &PeakMarker {
        &self.peak
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    pub fn overlay(&self) -> VectorOverlay {
        self.overlay
    }

    pub fn target_duration_s(&self) -> f64 {
        self.target_duration_s
    }

    pub fn duration_text(&self) -> &str {
        &self.duration_text
    }

    pub fn error(&self) -> Option<&LaunchError> {
        self.error.as_ref()
    }

    pub fn slider_value(&self, parameter: Parameter) -> Option<f64> {
        self.sliders
            .iter()
            .find(|(p, _)| *p == parameter)
            .map(|(_, v)| *v)
    }

    /// Places a body from a normalized slider value. Only allowed while
    /// nothing is in flight; a finished run is discarded.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f64) -> Result<(), CommandError> {
        if !self.spec.is_enabled(parameter) {
            warn!(%parameter, scenario = %self.spec.kind, "parameter not adjustable");
            return Err(CommandError::ParameterDisabled(parameter));
        }
        if self.clock.is_running() {
            warn!(%parameter, "parameter change rejected while in flight");
            return Err(CommandError::ParametersLocked);
        }

        let value = if value.is_nan() { 0.5 } else { value.clamp(0.0, 1.0) };
        apply_parameter(
            parameter,
            value,
            &self.config.stage,
            &mut self.projectile,
            &mut self.target,
        );
        self.sync_target();
        if let Some(slot) = self.sliders.iter_mut().find(|(p, _)| *p == parameter) {
            slot.1 = value;
        }
        if self.phase != Phase::Idle {
            self.clear_run();
        }
        self.projectile.reset_to_initial();
        debug!(%parameter, value, "parameter updated");
        Ok(())
    }

    /// Edits the stored duration text. Clears any surfaced error.
    pub fn set_duration_text(&mut self, text: impl Into<String>) {
        self.duration_text = text.into();
        self.error = None;
    }

    /// Plans and starts a launch. `duration_input` replaces the stored
    /// duration text when given. A rejected plan leaves the core idle with
    /// the error surfaced.
    pub fn request_launch(
        &mut self,
        duration_input: Option<&str>,
        now_s: f64,
    ) -> Result<LaunchPlan, SimError> {
        if self.clock.is_running() {
            warn!("launch rejected: already in flight");
            return Err(CommandError::LaunchInFlight.into());
        }
        if let Some(text) = duration_input {
            self.duration_text = text.to_string();
        }
        self.clear_run();

        let kind = self.spec.kind;
        let setup = LaunchSetup::from_input(kind, Some(&self.duration_text))
            .map_err(|err| self.fail(err))?;
        let start = self.projectile.initial;
        let plan = plan_launch(
            setup,
            &self.kinematics,
            start,
            self.target.center(),
            self.config.epsilon,
        )
        .map_err(|err| {
            if err == LaunchError::UnreachableTarget {
                self.target_duration_s = 0.0;
            }
            self.fail(err)
        })?;

        self.target_duration_s = plan.duration_s;
        if !kind.takes_duration_input() {
            self.duration_text = format!("{:.2}", plan.duration_s);
        }
        self.peak.arm(plan.apex);
        self.overlay = VectorOverlay::default();
        self.clock.launch(now_s, plan.duration_s);
        self.velocity = plan.velocity;
        self.plan = Some(plan);
        self.phase = Phase::Launched;
        info!(
            scenario = %kind,
            vx = plan.velocity.x,
            vy = plan.velocity.y,
            duration_s = plan.duration_s,
            "launched"
        );
        Ok(plan)
    }

    /// Returns to idle from any state, restoring the default duration text.
    pub fn request_reset(&mut self) {
        self.clear_run();
        self.duration_text = self.spec.default_duration.to_string();
        self.target_duration_s = parse_duration(Some(&self.duration_text)).unwrap_or(0.0);
        self.overlay = VectorOverlay::default();
        self.seed_sliders();
        info!(scenario = %self.spec.kind, "reset");
    }

    pub fn toggle_pause(&mut self, now_s: f64) -> Result<bool, CommandError> {
        let paused = self.clock.toggle_pause(now_s).inspect_err(|err| {
            warn!(%err, "pause toggle rejected");
        })?;
        debug!(paused, "pause toggled");
        Ok(paused)
    }

    pub fn adjust_speed(&mut self, delta: f64, now_s: f64) -> f64 {
        let speed = self.clock.adjust_speed(delta, now_s);
        debug!(speed, "speed multiplier changed");
        speed
    }

    /// Shows or hides every motion arrow. Allowed in any phase.
    pub fn toggle_vectors(&mut self) -> bool {
        let visible = self.overlay.toggle_visible();
        debug!(visible, "vector overlay toggled");
        visible
    }

    /// Switches between Vx/Vy components and the resultant velocity.
    pub fn toggle_velocity_mode(&mut self) -> bool {
        let combined = self.overlay.toggle_velocity_mode();
        debug!(combined, "velocity arrow mode toggled");
        combined
    }

    /// Switches between velocity arrows and the gravity arrow.
    pub fn toggle_acceleration_vector(&mut self) -> bool {
        let acceleration = self.overlay.toggle_acceleration();
        debug!(acceleration, "acceleration arrow toggled");
        acceleration
    }

    /// Advances one frame. Commands for this frame must already be applied.
    pub fn tick(&mut self, now_s: f64) -> TickSummary {
        let Some(plan) = self.plan else {
            self.velocity = DVec2::ZERO;
            return TickSummary {
                phase: self.phase,
                effective_s: 0.0,
                completed: false,
                peak_revealed: false,
            };
        };

        let tick = self.clock.tick(now_s);
        let state = self
            .kinematics
            .evaluate(plan.origin, plan.velocity, tick.effective_s);
        self.velocity = state.velocity;

        let mut peak_revealed = false;
        if tick.completed {
            let mut end = state.position;
            if plan.kind == ScenarioKind::Vertical {
                end.y = plan.origin.y;
            }
            self.projectile.current = end;
            self.trail.finish(end);
            self.phase = Phase::Completed;
            peak_revealed = self.peak.reveal(plan.kind);
            info!(
                duration_s = tick.effective_s,
                x = end.x,
                y = end.y,
                trail_points = self.trail.len(),
                "run completed"
            );
        } else if self.clock.is_advancing() {
            self.projectile.current = state.position;
            self.trail.sample(tick.effective_s, state.position);
        }

        TickSummary {
            phase: self.phase,
            effective_s: tick.effective_s,
            completed: tick.completed,
            peak_revealed,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let units = &self.units;
        let to_mps = |v: DVec2| DVec2::new(units.px_s_to_mps(v.x), units.px_s_to_mps(-v.y));
        let offset = self.projectile.current - self.projectile.initial;
        let launch_velocity = self.plan.map_or(DVec2::ZERO, |plan| plan.velocity);
        let peak = self.peak.visible_record().map(|apex| {
            let origin = self.plan.map_or(self.projectile.initial, |plan| plan.origin);
            PeakView {
                time_s: apex.time_s,
                position: apex.position,
                height_m: units.px_to_m(origin.y - apex.position.y),
            }
        });
        let gravity = self.kinematics.gravity();
        let in_motion = self.clock.is_running() || self.clock.elapsed_display_s() > 0.0;
        let arrows = if in_motion {
            self.overlay.arrows(self.projectile.current, self.velocity, gravity, units)
        } else {
            Vec::new()
        };

        Snapshot {
            scenario: self.spec.kind,
            title: self.spec.title,
            phase: self.phase,
            projectile_position: self.projectile.current,
            projectile_start: self.projectile.initial,
            projectile_radius: self.projectile.radius,
            target_top_left: self.target.top_left,
            target_size: DVec2::new(self.target.width, self.target.height),
            target_center: self.target.center(),
            target_visible: self.spec.kind.shows_target(),
            running: self.clock.is_running(),
            paused: self.clock.is_paused(),
            speed: self.clock.speed(),
            target_duration_s: self.target_duration_s,
            elapsed_display_s: self.clock.elapsed_display_s(),
            effective_elapsed_s: self.clock.effective_s(),
            velocity_px_s: self.velocity,
            velocity_mps: to_mps(self.velocity),
            launch_velocity_px_s: launch_velocity,
            launch_velocity_mps: to_mps(launch_velocity),
            acceleration_px_s2: DOWN * gravity,
            acceleration_mps2: DVec2::new(0.0, -units.px_to_m(gravity)),
            displacement_m: DVec2::new(units.px_to_m(offset.x), units.px_to_m(-offset.y)),
            trail: self.trail.to_vec(),
            peak,
            vectors: self.overlay,
            arrows,
            duration_text: self.duration_text.clone(),
            sliders: self.sliders.clone(),
            error: self.error.as_ref().map(ToString::to_string),
        }
    }

    fn fail(&mut self, err: LaunchError) -> SimError {
        warn!(%err, scenario = %self.spec.kind, "launch rejected");
        self.error = Some(err.clone());
        err.into()
    }

    /// Drops plan, clock, trail and peak together.
    fn clear_run(&mut self) {
        self.plan = None;
        self.clock.reset();
        self.trail.clear();
        self.peak.clear();
        self.velocity = DVec2::ZERO;
        self.error = None;
        self.projectile.reset_to_initial();
        self.phase = Phase::Idle;
    }

    /// In the vertical scene the target marks the launch point.
    fn sync_target(&mut self) {
        if self.spec.kind == ScenarioKind::Vertical {
            self.target.center_on(self.projectile.initial);
        }
    }

    fn seed_sliders(&mut self) {
        let stage = self.config.stage;
        self.sliders = self
            .spec
            .enabled
            .iter()
            .map(|&p| (p, parameter_value(p, &stage, &self.projectile, &self.target)))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::{Phase, SimulationCore};
    use crate::core::config::SimConfig;
    use crate::core::error::{CommandError, LaunchError, SimError};
    use crate::core::overlay::{ArrowKind, VectorOverlay};
    use crate::core::scenario::{Parameter, ScenarioKind};

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    fn core(kind: ScenarioKind) -> SimulationCore {
        SimulationCore::new(kind, &SimConfig::default())
    }

    #[test]
    fn starts_idle_with_default_duration() {
        let core = core(ScenarioKind::Oblique);
        assert_eq!(core.phase(), Phase::Idle);
        assert_eq!(core.duration_text(), "2.0");
        assert_eq!(core.target_duration_s(), 2.0);
        assert_eq!(core.slider_value(Parameter::TargetX).map(|v| v > 0.0), Some(true));
    }

    #[test]
    fn oblique_run_ends_on_target_center() {
        let mut core = core(ScenarioKind::Oblique);
        core.request_launch(Some("1.2"), 100.0).expect("valid launch");
        assert_eq!(core.phase(), Phase::Launched);

        let mut t = 100.0;
        while core.phase() == Phase::Launched {
            t += 1.0 / 60.0;
            core.tick(t);
        }

        let center = core.target().center();
        let end = core.projectile().current;
        assert_close(end.x, center.x, 1e-6);
        assert_close(end.y, center.y, 1e-6);
        assert_eq!(core.trail().last(), Some(end));
        assert!(core.peak().is_visible());
    }

    #[test]
    fn invalid_duration_keeps_idle_and_surfaces_message() {
        let mut core = core(ScenarioKind::Vertical);
        let err = core.request_launch(Some("-2"), 0.0).unwrap_err();

        assert!(matches!(err, SimError::Launch(LaunchError::InvalidDuration { .. })));
        assert_eq!(core.phase(), Phase::Idle);
        let snap = core.snapshot();
        assert!(snap.error.is_some());
        assert!(!snap.running);

        core.set_duration_text("3");
        assert_eq!(core.snapshot().error, None);
    }

    #[test]
    fn horizontal_writes_computed_duration_back() {
        let mut core = core(ScenarioKind::Horizontal);
        let plan = core.request_launch(None, 0.0).expect("default layout is reachable");
        assert_eq!(core.duration_text(), format!("{:.2}", plan.duration_s));
        assert_eq!(core.target_duration_s(), plan.duration_s);
    }

    #[test]
    fn horizontal_unreachable_forces_zero_duration() {
        let mut core = core(ScenarioKind::Horizontal);
        core.set_parameter(Parameter::ProjectileY, 1.0).expect("idle");
        core.set_parameter(Parameter::TargetY, 0.0).expect("idle");

        let err = core.request_launch(None, 0.0).unwrap_err();
        assert_eq!(err, SimError::Launch(LaunchError::UnreachableTarget));
        assert_eq!(core.target_duration_s(), 0.0);
        assert_eq!(core.clock().effective_s(), 0.0);
        assert_eq!(core.phase(), Phase::Idle);
    }

    #[test]
    fn parameters_lock_during_flight() {
        let mut core = core(ScenarioKind::Oblique);
        core.request_launch(None, 0.0).expect("valid launch");
        assert_eq!(
            core.set_parameter(Parameter::TargetX, 0.2),
            Err(CommandError::ParametersLocked)
        );
        assert_eq!(
            core.request_launch(None, 0.5),
            Err(SimError::Command(CommandError::LaunchInFlight))
        );
    }

    #[test]
    fn vertical_has_no_adjustable_parameters() {
        let mut core = core(ScenarioKind::Vertical);
        assert_eq!(
            core.set_parameter(Parameter::ProjectileX, 0.2),
            Err(CommandError::ParameterDisabled(Parameter::ProjectileX))
        );
        assert_eq!(core.target().center(), core.projectile().initial);
    }

    #[test]
    fn parameter_change_after_completion_returns_to_idle() {
        let mut core = core(ScenarioKind::Oblique);
        core.request_launch(Some("0.5"), 0.0).expect("valid launch");
        core.tick(1.0);
        assert_eq!(core.phase(), Phase::Completed);

        core.set_parameter(Parameter::ProjectileX, 0.1).expect("not running");
        assert_eq!(core.phase(), Phase::Idle);
        assert!(core.trail().is_empty());
        assert!(!core.peak().is_visible());
        assert_eq!(core.projectile().current, core.projectile().initial);
    }

    #[test]
    fn relaunch_from_completed_discards_previous_run() {
        let mut core = core(ScenarioKind::Oblique);
        core.request_launch(Some("0.5"), 0.0).expect("valid launch");
        core.tick(0.2);
        core.tick(1.0);
        assert_eq!(core.phase(), Phase::Completed);
        assert!(!core.trail().is_empty());

        core.request_launch(Some("2.0"), 5.0).expect("relaunch allowed");
        assert_eq!(core.phase(), Phase::Launched);
        assert!(core.trail().is_empty());
        assert!(!core.peak().is_visible());
        assert_eq!(core.clock().effective_s(), 0.0);
    }

    #[test]
    fn paused_frame_keeps_velocity_at_freeze_point() {
        let mut core = core(ScenarioKind::Vertical);
        core.request_launch(Some("3.0"), 0.0).expect("valid launch");
        core.tick(0.5);
        let frozen = core.projectile().current;
        core.toggle_pause(0.5).expect("in flight");

        core.tick(2.0);
        let snap = core.snapshot();
        assert!(snap.paused);
        assert_eq!(snap.projectile_position, frozen);
        let g = core.config().gravity_px_s2();
        assert_close(snap.velocity_px_s.y, -g * 1.5 + g * 0.5, 1e-9);
    }

    #[test]
    fn overlay_toggles_reset_on_launch_and_reset() {
        let mut core = core(ScenarioKind::Oblique);
        assert!(!core.toggle_vectors());
        assert!(core.toggle_acceleration_vector());
        assert!(core.toggle_velocity_mode());

        core.request_launch(Some("2.0"), 0.0).expect("valid launch");
        assert_eq!(core.overlay(), VectorOverlay::default());

        core.toggle_acceleration_vector();
        core.request_reset();
        assert_eq!(core.overlay(), VectorOverlay::default());
    }

    #[test]
    fn arrows_follow_the_projectile_in_flight() {
        let mut core = core(ScenarioKind::Oblique);
        assert!(core.snapshot().arrows.is_empty());

        core.request_launch(Some("2.0"), 0.0).expect("valid launch");
        core.tick(0.5);
        let snap = core.snapshot();
        let kinds: Vec<ArrowKind> = snap.arrows.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, vec![ArrowKind::VelocityX, ArrowKind::VelocityY]);
        assert!(snap.arrows.iter().all(|a| a.from == snap.projectile_position));

        core.toggle_acceleration_vector();
        let snap = core.snapshot();
        assert_eq!(snap.arrows.len(), 1);
        assert_eq!(snap.arrows[0].kind, ArrowKind::Acceleration);
        assert_close(snap.acceleration_mps2.y, -9.81, 1e-9);
        assert_eq!(snap.acceleration_px_s2.x, 0.0);
        assert_close(snap.acceleration_px_s2.y, core.config().gravity_px_s2(), 1e-12);

        core.toggle_vectors();
        assert!(core.snapshot().arrows.is_empty());
        assert!(!core.snapshot().vectors.visible);
    }
}
