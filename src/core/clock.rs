use crate::core::config::SimConfig;
use crate::core::error::CommandError;

/// Result of advancing the clock by one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockTick {
    /// Simulated time to feed the kinematics.
    pub effective_s: f64,
    /// True only on the frame that reached the target duration.
    pub completed: bool,
}

/// Maps wall time onto simulated time under pause and a speed multiplier.
///
/// All wall times are absolute seconds from the host's monotonic clock.
/// Speed changes re-anchor the mapping so simulated time stays continuous;
/// with a constant multiplier, effective time is `raw_elapsed * speed`.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationClock {
    start_wall_s: f64,
    paused_accum_s: f64,
    pause_started_s: f64,
    running: bool,
    paused: bool,
    speed: f64,
    speed_min: f64,
    speed_max: f64,
    speed_step: f64,
    duration_s: f64,
    elapsed_wall_s: f64,
    effective_s: f64,
    anchor_wall_s: f64,
    anchor_effective_s: f64,
}

impl SimulationClock {
    pub fn new(speed_min: f64, speed_max: f64, speed_step: f64) -> Self {
        Self {
            start_wall_s: 0.0,
            paused_accum_s: 0.0,
            pause_started_s: 0.0,
            running: false,
            paused: false,
            speed: 1.0_f64.max(speed_min).min(speed_max),
            speed_min,
            speed_max,
            speed_step,
            duration_s: 0.0,
            elapsed_wall_s: 0.0,
            effective_s: 0.0,
            anchor_wall_s: 0.0,
            anchor_effective_s: 0.0,
        }
    }

    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.speed_min, config.speed_max, config.speed_step)
    }

    pub fn launch(&mut self, now_s: f64, duration_s: f64) {
        self.reset();
        self.start_wall_s = now_s;
        self.duration_s = duration_s;
        self.running = true;
    }

    /// Back to the idle state. The speed multiplier is kept.
    pub fn reset(&mut self) {
        *self = Self {
            speed: self.speed,
            ..Self::new(self.speed_min, self.speed_max, self.speed_step)
        };
    }

    /// Flips the pause flag of an in-flight run and returns the new value.
    pub fn toggle_pause(&mut self, now_s: f64) -> Result<bool, CommandError> {
        if !self.running {
            return Err(CommandError::NothingInFlight);
        }
        if self.paused {
            self.paused_accum_s += now_s - self.pause_started_s;
            self.paused = false;
        } else {
            self.pause_started_s = now_s;
            self.paused = true;
        }
        Ok(self.paused)
    }

    pub fn adjust_speed(&mut self, delta: f64, now_s: f64) -> f64 {
        let target = round_to_step(self.speed + delta, self.speed_step);
        let next = target.max(self.speed_min).min(self.speed_max);
        if self.running {
            let raw = self.raw_elapsed(now_s).max(self.elapsed_wall_s);
            self.anchor_effective_s = self.effective_at(raw);
            self.anchor_wall_s = raw;
        }
        self.speed = next;
        if self.is_completed() {
            self.elapsed_wall_s = self.duration_s / next;
        }
        next
    }

    pub fn speed_up(&mut self, now_s: f64) -> f64 {
        self.adjust_speed(self.speed_step, now_s)
    }

    pub fn slow_down(&mut self, now_s: f64) -> f64 {
        self.adjust_speed(-self.speed_step, now_s)
    }

    pub fn tick(&mut self, now_s: f64) -> ClockTick {
        if !self.running || self.paused {
            return ClockTick {
                effective_s: self.effective_s,
                completed: false,
            };
        }

        let raw = self.raw_elapsed(now_s).max(self.elapsed_wall_s);
        let effective = self.effective_at(raw).max(self.effective_s);

        if self.duration_s > 0.0 && effective >= self.duration_s {
            self.effective_s = self.duration_s;
            self.elapsed_wall_s =
                self.anchor_wall_s + (self.duration_s - self.anchor_effective_s) / self.speed;
            self.running = false;
            return ClockTick {
                effective_s: self.effective_s,
                completed: true,
            };
        }

        self.elapsed_wall_s = raw;
        self.effective_s = effective;
        ClockTick {
            effective_s: effective,
            completed: false,
        }
    }

    fn raw_elapsed(&self, now_s: f64) -> f64 {
        let until = if self.paused {
            self.pause_started_s
        } else {
            now_s
        };
        (until - self.start_wall_s) - self.paused_accum_s
    }

    fn effective_at(&self, raw_s: f64) -> f64 {
        self.anchor_effective_s + (raw_s - self.anchor_wall_s) * self.speed
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Stopped at the target duration.
    pub fn is_completed(&self) -> bool {
        !self.running && self.duration_s > 0.0 && self.effective_s >= self.duration_s
    }

    /// Running and not paused.
    pub fn is_advancing(&self) -> bool {
        self.running && !self.paused
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    /// Wall seconds the run has been playing, excluding pauses.
    pub fn elapsed_display_s(&self) -> f64 {
        self.elapsed_wall_s
    }

    pub fn effective_s(&self) -> f64 {
        self.effective_s
    }
}

fn round_to_step(value: f64, step: f64) -> f64 {
    if step <= 0.0 {
        return value;
    }
    (value / step).round() / (1.0 / step)
}
