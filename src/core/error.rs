use std::fmt;

use thiserror::Error;

use crate::core::scenario::Parameter;

/// Why a duration field was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationIssue {
    Missing,
    NotNumeric,
    NotPositive,
}

impl fmt::Display for DurationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Missing => "a duration is required",
            Self::NotNumeric => "expected a number",
            Self::NotPositive => "duration must be greater than 0",
        };
        f.write_str(text)
    }
}

/// A launch request that could not be turned into a plan.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LaunchError {
    #[error("Invalid duration '{input}': {issue}.")]
    InvalidDuration { input: String, issue: DurationIssue },
    #[error("Horizontal launch impossible: the target center must be below the start point.")]
    UnreachableTarget,
}

/// A command that does not apply to the current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Parameters are locked while a launch is in flight.")]
    ParametersLocked,
    #[error("Parameter '{0}' is not adjustable in this scenario.")]
    ParameterDisabled(Parameter),
    #[error("A launch is already in flight.")]
    LaunchInFlight,
    #[error("Nothing is in flight to pause.")]
    NothingInFlight,
    #[error("No scenario is selected.")]
    NoScenario,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    #[error(transparent)]
    Launch(#[from] LaunchError),
    #[error(transparent)]
    Command(#[from] CommandError),
    /// A headless run hit its frame limit before reaching the target duration.
    #[error("Run stopped after {frames} frames at t={effective_s:.3} s of {duration_s:.3} s.")]
    Incomplete {
        frames: usize,
        effective_s: f64,
        duration_s: f64,
    },
}

/// Rejected startup configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be a finite number greater than 0 (got {value}).")]
    NotPositive { field: &'static str, value: f64 },
    #[error("Trail capacity must hold at least one point.")]
    EmptyTrail,
    #[error("Speed bounds are inverted: min {min} > max {max}.")]
    SpeedBounds { min: f64, max: f64 },
    #[error("Stage of {width}x{height} px cannot fit a {body} of {size} px.")]
    StageTooSmall {
        width: f64,
        height: f64,
        body: &'static str,
        size: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::{CommandError, DurationIssue, LaunchError, SimError};
    use crate::core::scenario::Parameter;

    #[test]
    fn messages_name_the_problem() {
        let err = LaunchError::InvalidDuration {
            input: "abc".to_string(),
            issue: DurationIssue::NotNumeric,
        };
        assert_eq!(err.to_string(), "Invalid duration 'abc': expected a number.");

        let err = CommandError::ParameterDisabled(Parameter::TargetY);
        assert!(err.to_string().contains("target_y"));
    }

    #[test]
    fn sim_error_is_transparent() {
        let err: SimError = LaunchError::UnreachableTarget.into();
        assert_eq!(err.to_string(), LaunchError::UnreachableTarget.to_string());
    }
}
