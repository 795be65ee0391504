use macroquad::prelude::*;
use macroquad::ui::{Id, hash, root_ui, widgets};

use projectile_lab::core::{Command, Parameter, Phase, Snapshot};

use crate::constants::{PANEL_POS, PANEL_SIZE};

/// Keyboard shortcuts: Space launches or pauses, R resets, Up/Down change
/// speed, V/C/A switch the vector overlay, Escape returns to the menu.
pub(crate) fn hotkey_commands(snapshot: &Snapshot, step: f64) -> Vec<Command> {
    let mut commands = Vec::new();
    if is_key_pressed(KeyCode::Space) {
        commands.push(if snapshot.running {
            Command::TogglePause
        } else {
            Command::Launch(None)
        });
    }
    if is_key_pressed(KeyCode::R) {
        commands.push(Command::Reset);
    }
    if is_key_pressed(KeyCode::Up) {
        commands.push(Command::AdjustSpeed(step));
    }
    if is_key_pressed(KeyCode::Down) {
        commands.push(Command::AdjustSpeed(-step));
    }
    if is_key_pressed(KeyCode::V) {
        commands.push(Command::ToggleVectors);
    }
    if is_key_pressed(KeyCode::C) {
        commands.push(Command::ToggleVelocityMode);
    }
    if is_key_pressed(KeyCode::A) {
        commands.push(Command::ToggleAccelerationVector);
    }
    if is_key_pressed(KeyCode::Escape) {
        commands.push(Command::ExitToMenu);
    }
    commands
}

fn slider_id(parameter: Parameter) -> Id {
    match parameter {
        Parameter::ProjectileX => hash!(),
        Parameter::ProjectileY => hash!(),
        Parameter::TargetX => hash!(),
        Parameter::TargetY => hash!(),
    }
}

fn slider_label(parameter: Parameter) -> &'static str {
    match parameter {
        Parameter::ProjectileX => "Projectile X",
        Parameter::ProjectileY => "Projectile Y",
        Parameter::TargetX => "Target X",
        Parameter::TargetY => "Target Y",
    }
}

/// Draws the control window. Widgets are seeded from the snapshot each
/// frame, so any edit shows up as a difference and becomes a command.
pub(crate) fn draw_control_panel(snapshot: &Snapshot, step: f64) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut duration_text = snapshot.duration_text.clone();
    let mut sliders: Vec<(Parameter, f32)> = snapshot
        .sliders
        .iter()
        .map(|&(p, v)| (p, v as f32))
        .collect();

    widgets::Window::new(
        hash!(),
        vec2(PANEL_POS.0, PANEL_POS.1),
        vec2(PANEL_SIZE.0, PANEL_SIZE.1),
    )
    .label(snapshot.title)
    .ui(&mut *root_ui(), |ui| {
        if sliders.is_empty() {
            ui.label(None, "Positions are fixed in this scenario.");
        } else if snapshot.running {
            ui.label(None, "Positions are locked during flight.");
        } else {
            for (parameter, value) in sliders.iter_mut() {
                ui.slider(slider_id(*parameter), slider_label(*parameter), 0.0..1.0, value);
            }
        }
        ui.separator();

        if snapshot.scenario.takes_duration_input() {
            ui.input_text(hash!(), "Duration (s)", &mut duration_text);
        } else {
            ui.label(None, &format!("Duration (s): {}", snapshot.duration_text));
        }
        ui.separator();

        let launch_label = if snapshot.phase == Phase::Completed {
            "Launch again (Space)"
        } else {
            "Launch (Space)"
        };
        if !snapshot.running && ui.button(None, launch_label) {
            commands.push(Command::Launch(None));
        }
        if snapshot.running {
            let label = if snapshot.paused {
                "Resume (Space)"
            } else {
                "Pause (Space)"
            };
            if ui.button(None, label) {
                commands.push(Command::TogglePause);
            }
        }
        if ui.button(None, "Reset (R)") {
            commands.push(Command::Reset);
        }
        ui.same_line(0.0);
        if ui.button(None, "Slower") {
            commands.push(Command::AdjustSpeed(-step));
        }
        ui.same_line(0.0);
        if ui.button(None, "Faster") {
            commands.push(Command::AdjustSpeed(step));
        }
        ui.label(None, &format!("Speed: x{:.1}", snapshot.speed));
        ui.separator();

        let vectors = snapshot.vectors;
        let visible_label = if vectors.visible { "Hide vectors (V)" } else { "Show vectors (V)" };
        if ui.button(None, visible_label) {
            commands.push(Command::ToggleVectors);
        }
        let mode_label = if vectors.combined_velocity {
            "Components (C)"
        } else {
            "Resultant (C)"
        };
        if ui.button(None, mode_label) {
            commands.push(Command::ToggleVelocityMode);
        }
        ui.same_line(0.0);
        let kind_label = if vectors.acceleration {
            "Velocity (A)"
        } else {
            "Acceleration (A)"
        };
        if ui.button(None, kind_label) {
            commands.push(Command::ToggleAccelerationVector);
        }
        ui.separator();
        if ui.button(None, "Menu (Esc)") {
            commands.push(Command::ExitToMenu);
        }
    });

    // Edits go first so a launch on the same frame sees them.
    let mut edits: Vec<Command> = sliders
        .iter()
        .zip(&snapshot.sliders)
        .filter(|((_, new), (_, old))| (f64::from(*new) - old).abs() > 1e-4)
        .map(|((parameter, new), _)| Command::SetParameter(*parameter, f64::from(*new)))
        .collect();
    if duration_text != snapshot.duration_text {
        edits.push(Command::SetDurationText(duration_text));
    }
    edits.extend(commands);
    edits
}

pub(crate) fn phase_text(snapshot: &Snapshot) -> &'static str {
    match snapshot.phase {
        Phase::Idle => "Ready",
        Phase::Launched if snapshot.paused => "Paused",
        Phase::Launched => "In flight",
        Phase::Completed => "Completed",
    }
}
