use projectile_lab::core::headless::{run_to_completion, run_with_frame_limit};
use projectile_lab::core::{
    Command, DVec2, Kinematics, LaunchError, LaunchSetup, Parameter, Phase, ScenarioKind,
    SimConfig, SimError, SimulationCore, Simulator, plan_launch,
};

const EPS: f64 = 1e-6;

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "actual={actual}, expected={expected}, tolerance={tolerance}"
    );
}

#[test]
fn oblique_level_shot() {
    let kin = Kinematics::new(7.36);
    let plan = plan_launch(
        LaunchSetup::Oblique { duration_s: 2.0 },
        &kin,
        DVec2::new(100.0, 700.0),
        DVec2::new(700.0, 700.0),
        EPS,
    )
    .expect("valid duration");

    assert_close(plan.velocity.x, 300.0, 1e-12);
    assert_close(plan.velocity.y, -7.36, 1e-12);
    let end = kin.evaluate(plan.origin, plan.velocity, 2.0).position;
    assert_close(end.x, 700.0, 1e-9);
    assert_close(end.y, 700.0, 1e-9);
}

#[test]
fn vertical_apex_is_temporal_midpoint() {
    let g = SimConfig::default().gravity_px_s2();
    let kin = Kinematics::new(g);
    let p0 = DVec2::new(693.5, 600.0);
    let plan = plan_launch(LaunchSetup::Vertical { round_trip_s: 3.0 }, &kin, p0, p0, EPS)
        .expect("valid duration");

    let apex = plan.apex.expect("upward launch has an apex");
    assert_close(apex.time_s, 1.5, 1e-12);
    assert_close(apex.position.y, p0.y - 0.5 * g * 1.5 * 1.5, 1e-9);

    let mid = kin.evaluate(p0, plan.velocity, 1.5).position;
    assert_close(mid.y, apex.position.y, 1e-9);
    assert_eq!(kin.evaluate(p0, plan.velocity, 3.0).position.x, p0.x);
}

#[test]
fn horizontal_duration_from_drop() {
    let g = 7.36;
    let kin = Kinematics::new(g);
    let plan = plan_launch(
        LaunchSetup::Horizontal,
        &kin,
        DVec2::new(100.0, 200.0),
        DVec2::new(800.0, 700.0),
        EPS,
    )
    .expect("target is below");

    let expected_t = (2.0 * 500.0 / g).sqrt();
    assert_close(plan.duration_s, expected_t, 1e-12);
    assert_close(plan.velocity.x, 700.0 / expected_t, 1e-9);
    assert_eq!(plan.velocity.y, 0.0);
    assert_eq!(plan.apex, None);
}

#[test]
fn horizontal_target_above_start_is_unreachable() {
    let mut core = SimulationCore::new(ScenarioKind::Horizontal, &SimConfig::default());
    core.set_parameter(Parameter::ProjectileY, 1.0).expect("idle");
    core.set_parameter(Parameter::TargetY, 0.0).expect("idle");

    let err = core.request_launch(None, 10.0).unwrap_err();
    assert_eq!(err, SimError::Launch(LaunchError::UnreachableTarget));
    core.tick(11.0);
    let snap = core.snapshot();
    assert_eq!(snap.phase, Phase::Idle);
    assert_eq!(snap.target_duration_s, 0.0);
    assert_eq!(snap.elapsed_display_s, 0.0);
    assert!(snap.error.is_some());
}

#[test]
fn reset_mid_flight_returns_to_idle() {
    for kind in ScenarioKind::ALL {
        let mut core = SimulationCore::new(kind, &SimConfig::default());
        core.request_launch(None, 0.0).expect("default layout launches");
        core.tick(0.3);
        core.tick(0.6);
        core.request_reset();

        let snap = core.snapshot();
        assert_eq!(snap.phase, Phase::Idle, "{kind}");
        assert_eq!(snap.effective_elapsed_s, 0.0);
        assert_eq!(snap.elapsed_display_s, 0.0);
        assert!(snap.trail.is_empty());
        assert!(snap.peak.is_none());
        assert_eq!(snap.projectile_position, snap.projectile_start);
    }
}

#[test]
fn pause_and_resume_carry_no_time_debt() {
    let mut core = SimulationCore::new(ScenarioKind::Oblique, &SimConfig::default());
    core.request_launch(Some("5.0"), 0.0).expect("valid duration");
    core.tick(1.0);
    core.toggle_pause(1.0).expect("in flight");
    core.tick(2.0);
    core.toggle_pause(3.0).expect("paused");

    let summary = core.tick(3.0);
    assert_close(summary.effective_s, 1.0, 1e-12);
    assert_close(core.tick(3.5).effective_s, 1.5, 1e-12);
}

#[test]
fn completed_trail_ends_at_final_position() {
    let config = SimConfig {
        trail_capacity: 8,
        ..SimConfig::default()
    };
    let mut core = SimulationCore::new(ScenarioKind::Oblique, &config);
    let run = run_to_completion(&mut core, Some("3.0"), 60.0).expect("valid duration");

    assert!(run.last.trail.len() <= 8);
    assert_eq!(run.last.trail.last().copied(), Some(run.last.projectile_position));
    assert!(run.last.peak.is_some());
}

#[test]
fn horizontal_never_shows_peak() {
    let mut core = SimulationCore::new(ScenarioKind::Horizontal, &SimConfig::default());
    let run = run_to_completion(&mut core, None, 60.0).expect("default layout is reachable");
    assert_eq!(run.last.phase, Phase::Completed);
    assert!(run.last.peak.is_none());
}

#[test]
fn commands_apply_before_tick() {
    let mut sim = Simulator::new(SimConfig::default()).expect("valid config");
    sim.apply(Command::SelectScenario(ScenarioKind::Vertical), 0.0)
        .expect("select");
    sim.apply(Command::SetDurationText("2".into()), 0.0)
        .expect("edit");
    sim.apply(Command::Launch(None), 4.0).expect("launch");

    let summary = sim.tick(4.0).expect("scenario active");
    assert_eq!(summary.phase, Phase::Launched);
    let snap = sim.snapshot().expect("scenario active");
    assert_eq!(snap.projectile_position, snap.projectile_start);
    assert_eq!(snap.velocity_px_s, snap.launch_velocity_px_s);
}

#[test]
fn speed_change_survives_reset() {
    let mut sim = Simulator::new(SimConfig::default()).expect("valid config");
    sim.select_scenario(ScenarioKind::Oblique);
    sim.apply(Command::AdjustSpeed(1.0), 0.0).expect("speed");
    sim.apply(Command::Reset, 0.0).expect("reset");
    assert_eq!(sim.snapshot().map(|s| s.speed), Some(2.0));
}

#[test]
fn speed_change_after_completion_updates_display_time() {
    let mut core = SimulationCore::new(ScenarioKind::Oblique, &SimConfig::default());
    core.request_launch(Some("2.0"), 0.0).expect("valid duration");
    core.tick(2.5);
    assert_eq!(core.phase(), Phase::Completed);
    assert_close(core.snapshot().elapsed_display_s, 2.0, 1e-12);

    core.adjust_speed(1.0, 3.0);
    let snap = core.snapshot();
    assert_eq!(snap.speed, 2.0);
    assert_close(snap.elapsed_display_s, 1.0, 1e-12);
    assert_eq!(snap.effective_elapsed_s, 2.0);
}

#[test]
fn long_headless_run_reaches_completion() {
    let mut core = SimulationCore::new(ScenarioKind::Vertical, &SimConfig::default());
    let run = run_to_completion(&mut core, Some("20000"), 60.0).expect("fits the frame ceiling");

    assert_eq!(run.last.phase, Phase::Completed);
    assert_eq!(run.last.effective_elapsed_s, 20_000.0);
    assert_eq!(run.last.projectile_position, run.plan.origin);
}

#[test]
fn frame_limit_surfaces_incomplete_run() {
    let mut core = SimulationCore::new(ScenarioKind::Vertical, &SimConfig::default());
    let err = run_with_frame_limit(&mut core, Some("20000"), 60.0, 600).unwrap_err();
    assert!(matches!(err, SimError::Incomplete { frames: 600, .. }));
    assert!(err.to_string().contains("600 frames"));
}
