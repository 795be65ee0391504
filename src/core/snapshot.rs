use glam::DVec2;

use crate::core::overlay::{Arrow, VectorOverlay};
use crate::core::scenario::{Parameter, ScenarioKind};
use crate::core::simulation::Phase;

/// Apex marker as handed to the renderer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PeakView {
    pub time_s: f64,
    pub position: DVec2,
    /// Height above the launch point, meters.
    pub height_m: f64,
}

/// Everything a frontend needs to draw one frame. Positions and `*_px_s`
/// velocities are in pixel space (Y down); `*_mps` and `*_m` values are
/// physical with Y up.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub scenario: ScenarioKind,
    pub title: &'static str,
    pub phase: Phase,
    pub projectile_position: DVec2,
    pub projectile_start: DVec2,
    pub projectile_radius: f64,
    pub target_top_left: DVec2,
    pub target_size: DVec2,
    pub target_center: DVec2,
    pub target_visible: bool,
    pub running: bool,
    pub paused: bool,
    pub speed: f64,
    pub target_duration_s: f64,
    pub elapsed_display_s: f64,
    pub effective_elapsed_s: f64,
    pub velocity_px_s: DVec2,
    pub velocity_mps: DVec2,
    pub launch_velocity_px_s: DVec2,
    pub launch_velocity_mps: DVec2,
    pub acceleration_px_s2: DVec2,
    pub acceleration_mps2: DVec2,
    pub displacement_m: DVec2,
    pub trail: Vec<DVec2>,
    /// Set only while the marker may be drawn.
    pub peak: Option<PeakView>,
    pub vectors: VectorOverlay,
    /// Motion arrows at the projectile; empty before launch or when hidden.
    pub arrows: Vec<Arrow>,
    pub duration_text: String,
    pub sliders: Vec<(Parameter, f64)>,
    pub error: Option<String>,
}

impl Snapshot {
    /// True once a run has produced something worth showing in the
    /// instantaneous-values panel.
    pub fn has_motion(&self) -> bool {
        self.running || self.paused || self.elapsed_display_s > 0.0
    }
}
