use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand, ValueEnum};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use projectile_lab::core::config::{SPEED_MAX, SPEED_MIN, SPEED_STEP};
use projectile_lab::core::headless::run_to_completion;
use projectile_lab::core::{ConfigError, Parameter, ScenarioKind, SimConfig, SimError, Simulator};
use projectile_lab::report::{self, ChartData, ChartFormat, ReportError};

#[derive(Parser)]
#[command(name = "projectile_lab")]
#[command(about = "Headless runner for the projectile teaching scenarios", long_about = None)]
struct Cli {
    #[command(flatten)]
    config: ConfigArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan and play one launch to completion, then print a summary
    Run(RunArgs),
    /// List scenarios and their defaults
    Scenarios,
}

#[derive(clap::Args)]
struct RunArgs {
    #[arg(short, long, value_enum, default_value_t = SceneArg::Oblique)]
    scenario: SceneArg,

    /// Duration in seconds (ignored by the horizontal scenario)
    #[arg(short, long, allow_hyphen_values = true)]
    duration: Option<String>,

    /// Playback speed multiplier, 0.1 to 5.0 in steps of 0.1
    #[arg(long, default_value_t = 1.0, value_parser = parse_speed)]
    speed: f64,

    /// Synthetic frame rate
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Slider positions in [0, 1], e.g. `--set target_x=0.4`
    #[arg(long = "set", value_parser = parse_slider)]
    sliders: Vec<(Parameter, f64)>,

    /// Write a trajectory chart (.png or .svg)
    #[arg(long)]
    chart: Option<PathBuf>,

    /// Write a timestamped chart into this directory
    #[arg(long, conflicts_with = "chart")]
    chart_dir: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = FormatArg::Png)]
    format: FormatArg,
}

#[derive(clap::Args)]
struct ConfigArgs {
    #[arg(long, env = "PROJECTILE_LAB_PPM")]
    pixels_per_meter: Option<f64>,

    /// Gravity in m/s^2
    #[arg(long)]
    gravity: Option<f64>,

    #[arg(long)]
    trail_capacity: Option<usize>,

    /// Trail sampling interval in simulated seconds
    #[arg(long)]
    trail_interval: Option<f64>,
}

impl ConfigArgs {
    fn build(&self) -> SimConfig {
        let defaults = SimConfig::default();
        SimConfig {
            pixels_per_meter: self.pixels_per_meter.unwrap_or(defaults.pixels_per_meter),
            gravity_mps2: self.gravity.unwrap_or(defaults.gravity_mps2),
            trail_capacity: self.trail_capacity.unwrap_or(defaults.trail_capacity),
            trail_interval_s: self.trail_interval.unwrap_or(defaults.trail_interval_s),
            ..defaults
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SceneArg {
    Oblique,
    Vertical,
    Horizontal,
}

impl From<SceneArg> for ScenarioKind {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::Oblique => Self::Oblique,
            SceneArg::Vertical => Self::Vertical,
            SceneArg::Horizontal => Self::Horizontal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Png,
    Svg,
}

impl From<FormatArg> for ChartFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Png => Self::Png,
            FormatArg::Svg => Self::Svg,
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn parse_slider(raw: &str) -> Result<(Parameter, f64), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let parameter = name.trim().parse::<Parameter>()?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid slider value '{value}'"))?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("slider value {value} is outside [0, 1]"));
    }
    Ok((parameter, value))
}

fn parse_speed(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid speed '{raw}'"))?;
    if !value.is_finite() || !(SPEED_MIN..=SPEED_MAX).contains(&value) {
        return Err(format!("speed {value} is outside [{SPEED_MIN}, {SPEED_MAX}]"));
    }
    let steps = value / SPEED_STEP;
    if (steps - steps.round()).abs() > 1e-9 {
        return Err(format!("speed {value} is not a multiple of {SPEED_STEP}"));
    }
    Ok(value)
}

fn run_scenario(config: SimConfig, args: RunArgs) -> Result<(), CliError> {
    let mut simulator = Simulator::new(config)?;
    let core = simulator.select_scenario(args.scenario.into());
    for (parameter, value) in args.sliders {
        core.set_parameter(parameter, value).map_err(SimError::from)?;
    }
    let speed = core.adjust_speed(args.speed - core.clock().speed(), 0.0);
    if (speed - args.speed).abs() > 1e-9 {
        tracing::warn!(requested = args.speed, speed, "speed adjusted to configured bounds");
    }
    tracing::info!(speed, "playback speed");

    let run = run_to_completion(core, args.duration.as_deref(), args.fps)?;
    let now = Local::now();
    println!("{}", report::summary(&run, &config, now));

    let chart_path = match (args.chart, args.chart_dir) {
        (Some(path), _) => Some(path),
        (None, Some(dir)) => {
            std::fs::create_dir_all(&dir).map_err(ReportError::from)?;
            Some(report::default_chart_path(&dir, run.last.scenario, args.format.into(), now))
        }
        (None, None) => None,
    };
    if let Some(path) = chart_path {
        report::render_chart(&ChartData::from_run(&run, &config), &path)?;
        tracing::info!(path = %path.display(), "chart written");
        println!("Chart: {}", path.display());
    }
    Ok(())
}

fn list_scenarios(config: &SimConfig) {
    for kind in ScenarioKind::ALL {
        let spec = projectile_lab::core::ScenarioSpec::preset(kind, config);
        let sliders: Vec<&str> = spec.enabled.iter().map(|p| p.name()).collect();
        println!(
            "{:<11} {:<30} duration={:<4} sliders=[{}]",
            kind.label().to_ascii_lowercase(),
            spec.title,
            spec.default_duration,
            sliders.join(", ")
        );
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = cli.config.build();
    config.validate()?;

    match cli.command {
        Commands::Run(args) => run_scenario(config, args),
        Commands::Scenarios => {
            list_scenarios(&config);
            Ok(())
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_slider, parse_speed};
    use projectile_lab::core::Parameter;

    #[test]
    fn parses_named_slider() {
        assert_eq!(
            parse_slider("target_x=0.25"),
            Ok((Parameter::TargetX, 0.25))
        );
    }

    #[test]
    fn rejects_out_of_range_slider() {
        let err = parse_slider("projectile_y=1.5").expect_err("out of range");
        assert!(err.contains("outside"));
    }

    #[test]
    fn rejects_missing_separator() {
        assert!(parse_slider("target_y").is_err());
    }

    #[test]
    fn accepts_speed_on_the_step_grid() {
        assert_eq!(parse_speed("2.5"), Ok(2.5));
        assert_eq!(parse_speed(" 0.1 "), Ok(0.1));
        assert_eq!(parse_speed("5"), Ok(5.0));
    }

    #[test]
    fn rejects_speed_that_would_be_altered() {
        assert!(parse_speed("7").expect_err("too fast").contains("outside"));
        assert!(parse_speed("0.05").expect_err("too slow").contains("outside"));
        assert!(parse_speed("1.25").expect_err("off grid").contains("multiple"));
        assert!(parse_speed("NaN").is_err());
        assert!(parse_speed("fast").is_err());
    }
}
