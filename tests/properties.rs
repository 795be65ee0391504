use proptest::prelude::*;

use projectile_lab::core::{DVec2, Kinematics, SimulationClock, TrailBuffer};

fn point() -> impl Strategy<Value = DVec2> {
    (-2_000.0..2_000.0f64, -2_000.0..2_000.0f64).prop_map(|(x, y)| DVec2::new(x, y))
}

proptest! {
    #[test]
    fn solved_velocity_reaches_target(
        from in point(),
        to in point(),
        duration in 0.05..20.0f64,
        g in 0.1..1_000.0f64,
    ) {
        let kin = Kinematics::new(g);
        let v0 = kin.solve_required_velocity(from, to, duration);
        let end = kin.evaluate(from, v0, duration).position;
        let tolerance = 1e-9 * (1.0 + to.x.abs().max(to.y.abs()) + g * duration * duration);
        prop_assert!((end.x - to.x).abs() <= tolerance, "x: {} vs {}", end.x, to.x);
        prop_assert!((end.y - to.y).abs() <= tolerance, "y: {} vs {}", end.y, to.y);
    }

    #[test]
    fn evaluate_at_zero_is_identity(origin in point(), v0 in point(), g in 0.0..1_000.0f64) {
        let state = Kinematics::new(g).evaluate(origin, v0, 0.0);
        prop_assert_eq!(state.position, origin);
        prop_assert_eq!(state.velocity, v0);
    }

    #[test]
    fn trail_is_bounded(capacity in 1usize..64, steps in 0usize..400) {
        let mut trail = TrailBuffer::new(capacity, 0.05);
        for i in 0..steps {
            let t = i as f64 * 0.02;
            trail.sample(t, DVec2::new(t, -t));
            prop_assert!(trail.len() <= capacity);
        }
        let end = DVec2::new(1e6, 1e6);
        trail.finish(end);
        prop_assert!(trail.len() <= capacity);
        prop_assert_eq!(trail.last(), Some(end));
    }

    #[test]
    fn speed_stays_within_bounds(deltas in prop::collection::vec(-3.0..3.0f64, 0..200)) {
        let mut clock = SimulationClock::new(0.1, 5.0, 0.1);
        for delta in deltas {
            let speed = clock.adjust_speed(delta, 0.0);
            prop_assert!((0.1..=5.0).contains(&speed), "speed {}", speed);
        }
    }

    #[test]
    fn effective_time_never_decreases(
        frames in prop::collection::vec(0.0..0.2f64, 1..120),
        toggles in prop::collection::vec(any::<bool>(), 120),
    ) {
        let mut clock = SimulationClock::new(0.1, 5.0, 0.1);
        clock.launch(0.0, 1_000.0);
        let mut now = 0.0;
        let mut last = 0.0;
        for (dt, toggle) in frames.into_iter().zip(toggles) {
            now += dt;
            if toggle {
                clock.toggle_pause(now).ok();
            }
            let tick = clock.tick(now);
            prop_assert!(tick.effective_s >= last);
            last = tick.effective_s;
        }
    }
}
