//! Offline artifacts for a finished run: a trajectory chart and a text
//! summary.

use std::ops::Range;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use glam::DVec2;
use plotters::prelude::*;
use thiserror::Error;

use crate::core::config::SimConfig;
use crate::core::headless::HeadlessRun;
use crate::core::scenario::ScenarioKind;

const CHART_SIZE: (u32, u32) = (1000, 500);
const PATH_SAMPLES: usize = 160;
/// Share of each axis span added as margin on both ends.
const AXIS_MARGIN: f64 = 0.08;
/// Narrowest axis span in meters before margins.
const MIN_SPAN_M: f64 = 1.0;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Unsupported chart format '{0}' (expected png or svg).")]
    UnsupportedFormat(String),
    #[error("Failed to draw chart: {0}")]
    Draw(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChartFormat {
    Png,
    Svg,
}

impl ChartFormat {
    pub fn from_path(path: &Path) -> Result<Self, ReportError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            _ => Err(ReportError::UnsupportedFormat(ext)),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// A run expressed in meters relative to the launch point, Y up.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    pub title: String,
    pub path: Vec<(f64, f64)>,
    pub trail: Vec<(f64, f64)>,
    pub apex: Option<(f64, f64)>,
    pub target: Option<(f64, f64)>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl ChartData {
    pub fn from_run(run: &HeadlessRun, config: &SimConfig) -> Self {
        let units = config.units();
        let origin = run.plan.origin;
        let to_m = |p: DVec2| (units.px_to_m(p.x - origin.x), units.px_to_m(origin.y - p.y));

        let path: Vec<(f64, f64)> = config
            .kinematics()
            .sample_path(origin, run.plan.velocity, run.plan.duration_s, PATH_SAMPLES)
            .into_iter()
            .map(to_m)
            .collect();
        let trail = run.last.trail.iter().copied().map(to_m).collect();
        let apex = run.last.peak.map(|peak| to_m(peak.position));
        let target = run.last.target_visible.then(|| to_m(run.last.target_center));

        let (x_range, y_range) = axis_ranges(path.iter().chain(target.iter()).copied());

        Self {
            title: format!("{} ({:.2} s)", run.last.title, run.plan.duration_s),
            path,
            trail,
            apex,
            target,
            x_range,
            y_range,
        }
    }
}

/// Axis ranges covering `points` and the launch point, with a margin on
/// every side, then widened about the center to the chart's aspect ratio.
fn axis_ranges(points: impl IntoIterator<Item = (f64, f64)>) -> (Range<f64>, Range<f64>) {
    let (mut min_x, mut max_x) = (0.0_f64, 0.0_f64);
    let (mut min_y, mut max_y) = (0.0_f64, 0.0_f64);
    for (x, y) in points {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let padded = |lo: f64, hi: f64| {
        let span = (hi - lo).max(MIN_SPAN_M);
        let center = (lo + hi) * 0.5;
        let half = span * (0.5 + AXIS_MARGIN);
        (center - half, center + half)
    };
    let (mut x0, mut x1) = padded(min_x, max_x);
    let (mut y0, mut y1) = padded(min_y, max_y);

    let aspect = f64::from(CHART_SIZE.0) / f64::from(CHART_SIZE.1);
    let (width, height) = (x1 - x0, y1 - y0);
    if width / height < aspect {
        let grow = (height * aspect - width) * 0.5;
        x0 -= grow;
        x1 += grow;
    } else {
        let grow = (width / aspect - height) * 0.5;
        y0 -= grow;
        y1 += grow;
    }
    (x0..x1, y0..y1)
}

pub fn render_chart(data: &ChartData, path: &Path) -> Result<(), ReportError> {
    match ChartFormat::from_path(path)? {
        ChartFormat::Png => draw(BitMapBackend::new(path, CHART_SIZE).into_drawing_area(), data),
        ChartFormat::Svg => draw(SVGBackend::new(path, CHART_SIZE).into_drawing_area(), data),
    }
}

fn draw<DB: DrawingBackend>(root: DrawingArea<DB, plotters::coord::Shift>, data: &ChartData) -> Result<(), ReportError>
where
    DB::ErrorType: 'static,
{
    let draw_err = |err: DrawingAreaErrorKind<DB::ErrorType>| ReportError::Draw(err.to_string());

    root.fill(&WHITE).map_err(draw_err)?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&data.title, ("sans-serif", 26))
        .margin(16)
        .x_label_area_size(40)
        .y_label_area_size(56)
        .build_cartesian_2d(data.x_range.clone(), data.y_range.clone())
        .map_err(draw_err)?;

    chart
        .configure_mesh()
        .x_desc("Horizontal distance (m)")
        .y_desc("Height (m)")
        .draw()
        .map_err(draw_err)?;

    chart
        .draw_series(LineSeries::new(data.path.iter().copied(), &BLUE))
        .map_err(draw_err)?
        .label("trajectory")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .draw_series(
            data.trail
                .iter()
                .map(|&point| Circle::new(point, 2, BLUE.mix(0.5).filled())),
        )
        .map_err(draw_err)?;

    chart
        .draw_series(std::iter::once(Circle::new((0.0, 0.0), 6, BLACK.filled())))
        .map_err(draw_err)?
        .label("start")
        .legend(|(x, y)| Circle::new((x + 10, y), 4, BLACK.filled()));

    if let Some(target) = data.target {
        chart
            .draw_series(std::iter::once(Cross::new(target, 8, RED.stroke_width(2))))
            .map_err(draw_err)?
            .label("target")
            .legend(|(x, y)| Cross::new((x + 10, y), 5, RED));
    }

    if let Some(apex) = data.apex {
        chart
            .draw_series(std::iter::once(TriangleMarker::new(apex, 7, GREEN.filled())))
            .map_err(draw_err)?
            .label("apex")
            .legend(|(x, y)| TriangleMarker::new((x + 10, y), 5, GREEN.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;
    Ok(())
}

/// Plain-text run summary, values in meters with Y up.
pub fn summary(run: &HeadlessRun, config: &SimConfig, generated_at: DateTime<Local>) -> String {
    let units = config.units();
    let launch = run.plan.velocity_mps(&units);
    let last = &run.last;
    let mut lines = vec![
        format!("{} | generated {}", last.title, generated_at.format("%Y-%m-%d %H:%M:%S %:z")),
        format!("Duration: {:.3} s", run.plan.duration_s),
        format!(
            "Launch velocity: vx={:.3} m/s vy={:.3} m/s |v|={:.3} m/s",
            launch.x,
            launch.y,
            launch.length()
        ),
        format!(
            "Final velocity: vx={:.3} m/s vy={:.3} m/s",
            last.velocity_mps.x, last.velocity_mps.y
        ),
        format!(
            "Displacement: dx={:.3} m dy={:.3} m",
            last.displacement_m.x, last.displacement_m.y
        ),
    ];
    match last.peak {
        Some(peak) => lines.push(format!(
            "Peak: {:.3} m above launch at t={:.3} s",
            peak.height_m, peak.time_s
        )),
        None => lines.push("Peak: none".to_string()),
    }
    lines.push(format!(
        "Trail points: {} | frames: {} | speed x{:.1}",
        last.trail.len(),
        run.frames.len(),
        last.speed
    ));
    lines.join("\n")
}

/// `<scenario>-<timestamp>.<ext>` inside `dir`.
pub fn default_chart_path(
    dir: &Path,
    kind: ScenarioKind,
    format: ChartFormat,
    now: DateTime<Local>,
) -> PathBuf {
    let name = format!(
        "{}-{}.{}",
        kind.label().to_ascii_lowercase(),
        now.format("%Y%m%d-%H%M%S"),
        format.extension()
    );
    dir.join(name)
}
