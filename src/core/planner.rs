use glam::DVec2;

use crate::core::error::{DurationIssue, LaunchError};
use crate::core::kinematics::Kinematics;
use crate::core::scenario::ScenarioKind;
use crate::core::units::UnitConverter;

/// Highest point of an upward launch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Apex {
    pub time_s: f64,
    pub position: DVec2,
}

/// Per-scenario launch input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LaunchSetup {
    /// Hit the target center after `duration_s`.
    Oblique { duration_s: f64 },
    /// Rise and fall back to the start within `round_trip_s`.
    Vertical { round_trip_s: f64 },
    /// Roll off a ledge; the fall height fixes the duration.
    Horizontal,
}

impl LaunchSetup {
    /// Builds the setup for `kind`, validating the duration text for the
    /// scenarios that take one.
    pub fn from_input(kind: ScenarioKind, duration_input: Option<&str>) -> Result<Self, LaunchError> {
        match kind {
            ScenarioKind::Oblique => Ok(Self::Oblique {
                duration_s: parse_duration(duration_input)?,
            }),
            ScenarioKind::Vertical => Ok(Self::Vertical {
                round_trip_s: parse_duration(duration_input)?,
            }),
            ScenarioKind::Horizontal => Ok(Self::Horizontal),
        }
    }

    pub fn kind(&self) -> ScenarioKind {
        match self {
            Self::Oblique { .. } => ScenarioKind::Oblique,
            Self::Vertical { .. } => ScenarioKind::Vertical,
            Self::Horizontal => ScenarioKind::Horizontal,
        }
    }
}

/// Committed initial conditions for one launch. Superseded, never mutated.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LaunchPlan {
    pub kind: ScenarioKind,
    pub origin: DVec2,
    pub velocity: DVec2,
    pub duration_s: f64,
    /// Present only for a genuinely upward launch.
    pub apex: Option<Apex>,
}

impl LaunchPlan {
    /// The apex, or the start point at t=0 when the launch never rises.
    pub fn apex_or_origin(&self) -> Apex {
        self.apex.unwrap_or(Apex {
            time_s: 0.0,
            position: self.origin,
        })
    }

    /// Launch velocity in m/s with Y pointing up.
    pub fn velocity_mps(&self, units: &UnitConverter) -> DVec2 {
        DVec2::new(
            units.px_s_to_mps(self.velocity.x),
            units.px_s_to_mps(-self.velocity.y),
        )
    }
}

pub fn parse_duration(input: Option<&str>) -> Result<f64, LaunchError> {
    let text = input.map(str::trim).unwrap_or_default();
    let invalid = |issue| LaunchError::InvalidDuration {
        input: text.to_string(),
        issue,
    };

    if text.is_empty() {
        return Err(invalid(DurationIssue::Missing));
    }
    let value = text
        .parse::<f64>()
        .map_err(|_| invalid(DurationIssue::NotNumeric))?;
    if !value.is_finite() {
        return Err(invalid(DurationIssue::NotNumeric));
    }
    if value <= 0.0 {
        return Err(invalid(DurationIssue::NotPositive));
    }
    Ok(value)
}

pub fn plan_launch(
    setup: LaunchSetup,
    kinematics: &Kinematics,
    start: DVec2,
    target_center: DVec2,
    epsilon: f64,
) -> Result<LaunchPlan, LaunchError> {
    let (velocity, duration_s) = match setup {
        LaunchSetup::Oblique { duration_s } => (
            kinematics.solve_required_velocity(start, target_center, duration_s),
            duration_s,
        ),
        LaunchSetup::Vertical { round_trip_s } => {
            let ascent_s = round_trip_s / 2.0;
            (DVec2::new(0.0, -kinematics.gravity() * ascent_s), round_trip_s)
        }
        LaunchSetup::Horizontal => {
            let drop = target_center.y - start.y;
            if drop <= 0.0 {
                return Err(LaunchError::UnreachableTarget);
            }
            let duration_s = kinematics.fall_time(drop);
            if duration_s <= epsilon {
                return Err(LaunchError::UnreachableTarget);
            }
            let vx = (target_center.x - start.x) / duration_s;
            (DVec2::new(vx, 0.0), duration_s)
        }
    };

    Ok(LaunchPlan {
        kind: setup.kind(),
        origin: start,
        velocity,
        duration_s,
        apex: find_apex(kinematics, start, velocity, epsilon),
    })
}

fn find_apex(kinematics: &Kinematics, start: DVec2, velocity: DVec2, epsilon: f64) -> Option<Apex> {
    let rise_speed = -velocity.y;
    if rise_speed <= epsilon || kinematics.gravity() <= 0.0 {
        return None;
    }
    let time_s = rise_speed / kinematics.gravity();
    Some(Apex {
        time_s,
        position: kinematics.evaluate(start, velocity, time_s).position,
    })
}
