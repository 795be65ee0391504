use macroquad::prelude::*;

use projectile_lab::core::Snapshot;

use crate::constants::{ERROR_COLOR, HUD_WIDTH, TITLE_Y};
use crate::controls::phase_text;
use crate::render::draw_ui_text;

pub(crate) fn draw_hud(snapshot: &Snapshot, status_line: &str, screen_w: f32, font: Option<&Font>) {
    let x = (screen_w - HUD_WIDTH).max(0.0);
    let header_color = Color::from_rgba(30, 30, 35, 255);

    draw_ui_text(snapshot.title, x, TITLE_Y, 28, header_color, font);
    let mut lines = vec![
        format!(
            "{} | t = {:.2} s / {:.2} s | x{:.1}",
            phase_text(snapshot),
            snapshot.elapsed_display_s,
            snapshot.target_duration_s,
            snapshot.speed
        ),
        format!(
            "Launch v: ({:.2}, {:.2}) m/s",
            snapshot.launch_velocity_mps.x, snapshot.launch_velocity_mps.y
        ),
    ];
    if snapshot.has_motion() {
        lines.push(format!(
            "v: ({:.2}, {:.2}) m/s  |v| = {:.2} m/s",
            snapshot.velocity_mps.x,
            snapshot.velocity_mps.y,
            snapshot.velocity_mps.length()
        ));
        lines.push(format!(
            "Displacement: ({:.2}, {:.2}) m",
            snapshot.displacement_m.x, snapshot.displacement_m.y
        ));
    }
    if let Some(peak) = snapshot.peak {
        lines.push(format!(
            "Peak: {:.2} m at t = {:.2} s",
            peak.height_m, peak.time_s
        ));
    }

    for (idx, line) in lines.iter().enumerate() {
        draw_ui_text(line, x, TITLE_Y + 26.0 + idx as f32 * 20.0, 18, DARKGRAY, font);
    }

    let footer_y = TITLE_Y + 26.0 + lines.len() as f32 * 20.0 + 6.0;
    match &snapshot.error {
        Some(message) => draw_ui_text(message, x, footer_y, 18, ERROR_COLOR, font),
        None if !status_line.is_empty() => {
            draw_ui_text(status_line, x, footer_y, 16, GRAY, font)
        }
        None => {}
    }
}
