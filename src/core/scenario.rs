use std::fmt;
use std::str::FromStr;

use glam::DVec2;

use crate::core::config::{SimConfig, Stage};

const LAUNCH_OFFSET_X_PX: f64 = 75.0;
const OBLIQUE_FLOOR_OFFSET_PX: f64 = 150.0;
const OBLIQUE_TARGET_RIGHT_OFFSET_PX: f64 = 187.0;
const VERTICAL_FLOOR_OFFSET_PX: f64 = 112.0;
const HORIZONTAL_TARGET_PADDING_PX: f64 = 22.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScenarioKind {
    Oblique,
    Vertical,
    Horizontal,
}

impl ScenarioKind {
    pub const ALL: [Self; 3] = [Self::Oblique, Self::Vertical, Self::Horizontal];

    pub fn label(self) -> &'static str {
        match self {
            Self::Oblique => "Oblique",
            Self::Vertical => "Vertical",
            Self::Horizontal => "Horizontal",
        }
    }

    /// Whether the duration comes from the user rather than from geometry.
    pub fn takes_duration_input(self) -> bool {
        !matches!(self, Self::Horizontal)
    }

    /// Whether a completed run may surface the peak marker.
    pub fn shows_peak(self) -> bool {
        matches!(self, Self::Oblique | Self::Vertical)
    }

    /// Whether the target box is drawn as a separate body.
    pub fn shows_target(self) -> bool {
        !matches!(self, Self::Vertical)
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A user-adjustable placement slider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Parameter {
    ProjectileX,
    ProjectileY,
    TargetX,
    TargetY,
}

impl Parameter {
    pub const ALL: [Self; 4] = [
        Self::ProjectileX,
        Self::ProjectileY,
        Self::TargetX,
        Self::TargetY,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::ProjectileX => "projectile_x",
            Self::ProjectileY => "projectile_y",
            Self::TargetX => "target_x",
            Self::TargetY => "target_y",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Parameter {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == value)
            .ok_or_else(|| format!("Unknown parameter '{value}'."))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projectile {
    pub initial: DVec2,
    pub current: DVec2,
    pub radius: f64,
}

impl Projectile {
    pub fn new(initial: DVec2, radius: f64) -> Self {
        Self {
            initial,
            current: initial,
            radius,
        }
    }

    pub fn set_initial(&mut self, position: DVec2) {
        self.initial = position;
        self.current = position;
    }

    pub fn reset_to_initial(&mut self) {
        self.current = self.initial;
    }
}

/// Axis-aligned target box, positioned by its top-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub top_left: DVec2,
    pub width: f64,
    pub height: f64,
}

impl Target {
    pub fn new(top_left: DVec2, width: f64, height: f64) -> Self {
        Self {
            top_left,
            width,
            height,
        }
    }

    pub fn center(&self) -> DVec2 {
        self.top_left + DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn center_on(&mut self, point: DVec2) {
        self.top_left = point - DVec2::new(self.width / 2.0, self.height / 2.0);
    }
}

/// Immutable description of one scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioSpec {
    pub kind: ScenarioKind,
    pub title: &'static str,
    pub initial_projectile: DVec2,
    pub initial_target: DVec2,
    pub default_duration: &'static str,
    pub enabled: &'static [Parameter],
}

impl ScenarioSpec {
    pub fn preset(kind: ScenarioKind, config: &SimConfig) -> Self {
        let stage = config.stage;
        let floor = stage.bottom();
        match kind {
            ScenarioKind::Oblique => Self {
                kind,
                title: "Oblique Launch",
                initial_projectile: DVec2::new(LAUNCH_OFFSET_X_PX, floor - OBLIQUE_FLOOR_OFFSET_PX),
                initial_target: DVec2::new(
                    stage.width - OBLIQUE_TARGET_RIGHT_OFFSET_PX,
                    floor - OBLIQUE_FLOOR_OFFSET_PX,
                ),
                default_duration: "2.0",
                enabled: &Parameter::ALL,
            },
            ScenarioKind::Vertical => {
                let start = DVec2::new(stage.width / 2.0, floor - VERTICAL_FLOOR_OFFSET_PX);
                Self {
                    kind,
                    title: "Vertical Launch (Up and Down)",
                    initial_projectile: start,
                    initial_target: start
                        - DVec2::new(config.target_width_px / 2.0, config.target_height_px / 2.0),
                    default_duration: "3.0",
                    enabled: &[],
                }
            }
            ScenarioKind::Horizontal => Self {
                kind,
                title: "Horizontal Launch",
                initial_projectile: DVec2::new(LAUNCH_OFFSET_X_PX, floor / 3.0),
                initial_target: DVec2::new(
                    stage.width * 0.75,
                    floor - config.target_height_px - HORIZONTAL_TARGET_PADDING_PX,
                ),
                default_duration: "1.0",
                enabled: &Parameter::ALL,
            },
        }
    }

    pub fn is_enabled(&self, parameter: Parameter) -> bool {
        self.enabled.contains(&parameter)
    }
}

/// Moves the body controlled by `parameter` to the stage position selected by
/// the normalized `value` (clamped to `0..=1`).
pub fn apply_parameter(
    parameter: Parameter,
    value: f64,
    stage: &Stage,
    projectile: &mut Projectile,
    target: &mut Target,
) {
    let value = value.clamp(0.0, 1.0);
    let r = projectile.radius;
    let mut start = projectile.initial;
    match parameter {
        Parameter::ProjectileX => {
            let range = stage.width - 2.0 * r;
            start.x = if range > 0.0 { r + value * range } else { r };
        }
        Parameter::ProjectileY => {
            let range = stage.drawable_height - 2.0 * r;
            start.y = if range > 0.0 {
                stage.top + r + value * range
            } else {
                stage.top + r
            };
        }
        Parameter::TargetX => {
            let range = stage.width - target.width;
            target.top_left.x = if range > 0.0 { value * range } else { 0.0 };
        }
        Parameter::TargetY => {
            let range = stage.drawable_height - target.height;
            target.top_left.y = if range > 0.0 {
                stage.top + value * range
            } else {
                stage.top
            };
        }
    }
    projectile.set_initial(start);
}

/// Inverse of [`apply_parameter`]: the normalized slider value matching the
/// current placement, clamped to `0..=1`.
pub fn parameter_value(
    parameter: Parameter,
    stage: &Stage,
    projectile: &Projectile,
    target: &Target,
) -> f64 {
    let r = projectile.radius;
    let (offset, range) = match parameter {
        Parameter::ProjectileX => (projectile.initial.x - r, stage.width - 2.0 * r),
        Parameter::ProjectileY => (
            projectile.initial.y - stage.top - r,
            stage.drawable_height - 2.0 * r,
        ),
        Parameter::TargetX => (target.top_left.x, stage.width - target.width),
        Parameter::TargetY => (
            target.top_left.y - stage.top,
            stage.drawable_height - target.height,
        ),
    };
    if range > 0.0 {
        (offset / range).clamp(0.0, 1.0)
    } else {
        0.5
    }
}
