use crate::core::error::ConfigError;
use crate::core::kinematics::Kinematics;
use crate::core::units::UnitConverter;

pub const PIXELS_PER_METER: f64 = 37.5;
pub const EARTH_GRAVITY_MPS2: f64 = 9.81;
pub const TRAIL_INTERVAL_S: f64 = 0.05;
pub const TRAIL_CAPACITY: usize = 200;
pub const SPEED_MIN: f64 = 0.1;
pub const SPEED_MAX: f64 = 5.0;
pub const SPEED_STEP: f64 = 0.1;
pub const NUMERIC_EPSILON: f64 = 1e-6;

pub const STAGE_WIDTH_PX: f64 = 1387.0;
pub const STAGE_TOP_PX: f64 = 135.0;
pub const STAGE_DRAWABLE_HEIGHT_PX: f64 = 577.0;
pub const PROJECTILE_RADIUS_PX: f64 = 16.0;
pub const TARGET_SIZE_PX: f64 = 56.0;

/// Area the bodies may be placed in. The band starts `top` pixels below the
/// window edge (the formula panel sits above it).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stage {
    pub width: f64,
    pub top: f64,
    pub drawable_height: f64,
}

impl Stage {
    pub fn bottom(&self) -> f64 {
        self.top + self.drawable_height
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self {
            width: STAGE_WIDTH_PX,
            top: STAGE_TOP_PX,
            drawable_height: STAGE_DRAWABLE_HEIGHT_PX,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimConfig {
    pub pixels_per_meter: f64,
    pub gravity_mps2: f64,
    pub trail_interval_s: f64,
    pub trail_capacity: usize,
    pub speed_min: f64,
    pub speed_max: f64,
    pub speed_step: f64,
    pub stage: Stage,
    pub projectile_radius_px: f64,
    pub target_width_px: f64,
    pub target_height_px: f64,
    pub epsilon: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            pixels_per_meter: PIXELS_PER_METER,
            gravity_mps2: EARTH_GRAVITY_MPS2,
            trail_interval_s: TRAIL_INTERVAL_S,
            trail_capacity: TRAIL_CAPACITY,
            speed_min: SPEED_MIN,
            speed_max: SPEED_MAX,
            speed_step: SPEED_STEP,
            stage: Stage::default(),
            projectile_radius_px: PROJECTILE_RADIUS_PX,
            target_width_px: TARGET_SIZE_PX,
            target_height_px: TARGET_SIZE_PX,
            epsilon: NUMERIC_EPSILON,
        }
    }
}

impl SimConfig {
    pub fn gravity_px_s2(&self) -> f64 {
        self.gravity_mps2 * self.pixels_per_meter
    }

    pub fn kinematics(&self) -> Kinematics {
        Kinematics::new(self.gravity_px_s2())
    }

    pub fn units(&self) -> UnitConverter {
        UnitConverter::new(self.pixels_per_meter)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("pixels_per_meter", self.pixels_per_meter),
            ("gravity_mps2", self.gravity_mps2),
            ("trail_interval_s", self.trail_interval_s),
            ("speed_min", self.speed_min),
            ("speed_max", self.speed_max),
            ("speed_step", self.speed_step),
            ("stage.width", self.stage.width),
            ("stage.drawable_height", self.stage.drawable_height),
            ("projectile_radius_px", self.projectile_radius_px),
            ("target_width_px", self.target_width_px),
            ("target_height_px", self.target_height_px),
            ("epsilon", self.epsilon),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        if !self.stage.top.is_finite() {
            return Err(ConfigError::NotPositive {
                field: "stage.top",
                value: self.stage.top,
            });
        }
        if self.trail_capacity == 0 {
            return Err(ConfigError::EmptyTrail);
        }
        if self.speed_min > self.speed_max {
            return Err(ConfigError::SpeedBounds {
                min: self.speed_min,
                max: self.speed_max,
            });
        }

        let diameter = 2.0 * self.projectile_radius_px;
        let fits = [
            ("projectile", diameter),
            ("target", self.target_width_px.max(self.target_height_px)),
        ];
        for (body, size) in fits {
            if size >= self.stage.width || size >= self.stage.drawable_height {
                return Err(ConfigError::StageTooSmall {
                    width: self.stage.width,
                    height: self.stage.drawable_height,
                    body,
                    size,
                });
            }
        }
        Ok(())
    }
}
