//! Drives a scenario to completion without a window, on a synthetic
//! fixed-rate clock.

use glam::DVec2;

use crate::core::error::SimError;
use crate::core::planner::LaunchPlan;
use crate::core::simulation::{Phase, SimulationCore};
use crate::core::snapshot::Snapshot;

/// Hard ceiling on simulated frames for a single run.
pub const MAX_FRAMES: usize = 20_000_000;
/// Frames granted past the computed budget to absorb rounding.
const SLACK_FRAMES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub wall_s: f64,
    pub effective_s: f64,
    pub position: DVec2,
    pub velocity: DVec2,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeadlessRun {
    pub plan: LaunchPlan,
    pub frames: Vec<Frame>,
    /// State on the completion frame.
    pub last: Snapshot,
}

/// Launches `core` with `duration_input` and ticks it at `fps` until the
/// run completes. Speed changes already applied to the core are honored.
///
/// The frame limit is sized from the plan, so any duration that fits under
/// [`MAX_FRAMES`] completes. Longer runs fail with [`SimError::Incomplete`].
pub fn run_to_completion(
    core: &mut SimulationCore,
    duration_input: Option<&str>,
    fps: f64,
) -> Result<HeadlessRun, SimError> {
    drive(core, duration_input, fps, None)
}

/// Like [`run_to_completion`] but stops after `max_frames` ticks. Returns
/// [`SimError::Incomplete`] when the run has not finished by then; the core
/// is left mid-flight.
pub fn run_with_frame_limit(
    core: &mut SimulationCore,
    duration_input: Option<&str>,
    fps: f64,
    max_frames: usize,
) -> Result<HeadlessRun, SimError> {
    drive(core, duration_input, fps, Some(max_frames))
}

/// Ticks needed to cover `duration_s` of simulated time at `speed`.
pub fn frame_budget(duration_s: f64, frame_s: f64, speed: f64) -> usize {
    let frames = (duration_s / speed / frame_s).ceil();
    if !frames.is_finite() || frames >= MAX_FRAMES as f64 {
        return usize::MAX;
    }
    frames.max(0.0) as usize + SLACK_FRAMES
}

fn drive(
    core: &mut SimulationCore,
    duration_input: Option<&str>,
    fps: f64,
    max_frames: Option<usize>,
) -> Result<HeadlessRun, SimError> {
    let frame_s = if fps.is_finite() && fps > 0.0 { 1.0 / fps } else { 1.0 / 60.0 };
    let plan = core.request_launch(duration_input, 0.0)?;
    let budget = frame_budget(plan.duration_s, frame_s, core.clock().speed());
    let incomplete = |frames: usize, effective_s: f64| SimError::Incomplete {
        frames,
        effective_s,
        duration_s: plan.duration_s,
    };
    if max_frames.is_none() && budget > MAX_FRAMES {
        tracing::warn!(duration_s = plan.duration_s, fps, "run exceeds the frame ceiling");
        return Err(incomplete(0, 0.0));
    }
    let limit = max_frames.unwrap_or(budget).min(MAX_FRAMES);

    let mut frames = Vec::with_capacity(limit.min(1 << 16));
    let mut wall_s = 0.0;
    let mut completed = false;
    for frame in 1..=limit {
        wall_s = frame as f64 * frame_s;
        let summary = core.tick(wall_s);
        frames.push(Frame {
            wall_s,
            effective_s: summary.effective_s,
            position: core.projectile().current,
            velocity: core.velocity(),
        });
        if summary.phase == Phase::Completed {
            completed = true;
            break;
        }
    }

    if !completed {
        let effective_s = core.clock().effective_s();
        tracing::warn!(frames = frames.len(), effective_s, "headless run hit its frame limit");
        return Err(incomplete(frames.len(), effective_s));
    }
    tracing::debug!(frames = frames.len(), wall_s, "headless run finished");

    Ok(HeadlessRun {
        plan,
        frames,
        last: core.snapshot(),
    })
}
