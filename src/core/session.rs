use tracing::{debug, info};

use crate::core::config::SimConfig;
use crate::core::error::{CommandError, ConfigError, SimError};
use crate::core::planner::LaunchPlan;
use crate::core::scenario::{Parameter, ScenarioKind};
use crate::core::simulation::{SimulationCore, TickSummary};
use crate::core::snapshot::Snapshot;

/// A discrete user action, applied before the frame's tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    SelectScenario(ScenarioKind),
    SetParameter(Parameter, f64),
    SetDurationText(String),
    /// `None` launches with the stored duration text.
    Launch(Option<String>),
    Reset,
    TogglePause,
    AdjustSpeed(f64),
    ToggleVectors,
    ToggleVelocityMode,
    ToggleAccelerationVector,
    ExitToMenu,
}

/// Top-level session: the scene menu plus at most one live scenario.
#[derive(Clone, Debug)]
pub struct Simulator {
    config: SimConfig,
    core: Option<SimulationCore>,
}

impl Simulator {
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, core: None })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Whether the menu is showing.
    pub fn in_menu(&self) -> bool {
        self.core.is_none()
    }

    pub fn core(&self) -> Option<&SimulationCore> {
        self.core.as_ref()
    }

    /// Replaces whatever scenario was active with a fresh one.
    pub fn select_scenario(&mut self, kind: ScenarioKind) -> &mut SimulationCore {
        info!(scenario = %kind, "scene selected");
        self.core.insert(SimulationCore::new(kind, &self.config))
    }

    pub fn request_exit_to_menu(&mut self) {
        if let Some(core) = self.core.take() {
            info!(scenario = %core.kind(), "returned to menu");
        }
    }

    /// Applies one command. Launch returns the committed plan.
    pub fn apply(&mut self, command: Command, now_s: f64) -> Result<Option<LaunchPlan>, SimError> {
        debug!(?command, "apply");
        match command {
            Command::SelectScenario(kind) => {
                self.select_scenario(kind);
            }
            Command::ExitToMenu => self.request_exit_to_menu(),
            Command::SetParameter(parameter, value) => {
                self.active()?.set_parameter(parameter, value)?;
            }
            Command::SetDurationText(text) => self.active()?.set_duration_text(text),
            Command::Launch(input) => {
                let plan = self.active()?.request_launch(input.as_deref(), now_s)?;
                return Ok(Some(plan));
            }
            Command::Reset => self.active()?.request_reset(),
            Command::TogglePause => {
                self.active()?.toggle_pause(now_s)?;
            }
            Command::AdjustSpeed(delta) => {
                self.active()?.adjust_speed(delta, now_s);
            }
            Command::ToggleVectors => {
                self.active()?.toggle_vectors();
            }
            Command::ToggleVelocityMode => {
                self.active()?.toggle_velocity_mode();
            }
            Command::ToggleAccelerationVector => {
                self.active()?.toggle_acceleration_vector();
            }
        }
        Ok(None)
    }

    pub fn tick(&mut self, now_s: f64) -> Option<TickSummary> {
        self.core.as_mut().map(|core| core.tick(now_s))
    }

    pub fn snapshot(&self) -> Option<Snapshot> {
        self.core.as_ref().map(SimulationCore::snapshot)
    }

    fn active(&mut self) -> Result<&mut SimulationCore, CommandError> {
        self.core.as_mut().ok_or(CommandError::NoScenario)
    }
}
