//! Display-free projectile teaching engine.
//!
//! Everything in here works in pixel space with Y pointing down. Meter values
//! are derived through [`units::UnitConverter`] for display only.

pub mod clock;
pub mod config;
pub mod error;
pub mod headless;
pub mod kinematics;
pub mod overlay;
pub mod peak;
pub mod planner;
pub mod scenario;
pub mod session;
pub mod simulation;
pub mod snapshot;
pub mod trail;
pub mod units;

pub use clock::{ClockTick, SimulationClock};
pub use config::{SimConfig, Stage};
pub use error::{CommandError, ConfigError, DurationIssue, LaunchError, SimError};
pub use glam::DVec2;
pub use kinematics::{DOWN, Kinematics, MotionState};
pub use overlay::{Arrow, ArrowKind, VectorOverlay};
pub use peak::PeakMarker;
pub use planner::{Apex, LaunchPlan, LaunchSetup, parse_duration, plan_launch};
pub use scenario::{Parameter, Projectile, ScenarioKind, ScenarioSpec, Target};
pub use session::{Command, Simulator};
pub use simulation::{Phase, SimulationCore, TickSummary};
pub use snapshot::{PeakView, Snapshot};
pub use trail::TrailBuffer;
pub use units::UnitConverter;
