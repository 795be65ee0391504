use glam::DVec2;

/// Unit vector along gravity in screen space.
pub const DOWN: DVec2 = DVec2::Y;

/// Position and velocity of a body at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionState {
    pub position: DVec2,
    pub velocity: DVec2,
}

/// Closed-form constant-gravity kinematics in pixel space.
///
/// Gravity is a positive magnitude acting along +Y (down on screen), so an
/// upward launch carries a negative `vy`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Kinematics {
    gravity_px_s2: f64,
}

impl Kinematics {
    pub const fn new(gravity_px_s2: f64) -> Self {
        Self { gravity_px_s2 }
    }

    pub fn gravity(&self) -> f64 {
        self.gravity_px_s2
    }

    /// Initial velocity that carries a body from `from` to `to` in exactly
    /// `duration_s` seconds. Returns zero for a non-positive duration.
    pub fn solve_required_velocity(&self, from: DVec2, to: DVec2, duration_s: f64) -> DVec2 {
        if duration_s <= 0.0 {
            return DVec2::ZERO;
        }

        let delta = to - from;
        let vx = delta.x / duration_s;
        // dy = vy*t + g*t^2/2, down positive
        let vy = (delta.y - 0.5 * self.gravity_px_s2 * duration_s * duration_s) / duration_s;
        DVec2::new(vx, vy)
    }

    pub fn evaluate(&self, origin: DVec2, initial_velocity: DVec2, time_s: f64) -> MotionState {
        let fall = 0.5 * self.gravity_px_s2 * time_s * time_s;
        MotionState {
            position: origin + initial_velocity * time_s + DOWN * fall,
            velocity: initial_velocity + DOWN * (self.gravity_px_s2 * time_s),
        }
    }

    /// Free-fall time over a downward drop of `drop_px`. Zero when the drop is
    /// not positive or gravity is degenerate.
    pub fn fall_time(&self, drop_px: f64) -> f64 {
        if self.gravity_px_s2 <= 0.0 || drop_px <= 0.0 {
            return 0.0;
        }
        (2.0 * drop_px / self.gravity_px_s2).sqrt()
    }

    pub fn sample_path(
        &self,
        origin: DVec2,
        initial_velocity: DVec2,
        duration_s: f64,
        samples: usize,
    ) -> Vec<DVec2> {
        let sample_count = samples.max(2);
        (0..=sample_count)
            .map(|i| {
                let t = (i as f64 * duration_s) / sample_count as f64;
                self.evaluate(origin, initial_velocity, t).position
            })
            .collect()
    }
}
