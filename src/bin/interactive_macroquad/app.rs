use macroquad::prelude::*;

use projectile_lab::core::{Command, SimConfig};

use crate::constants::{INITIAL_WINDOW_HEIGHT, INITIAL_WINDOW_WIDTH, MSAA_SAMPLES, UI_FONT_PATH};
use crate::controls::{draw_control_panel, hotkey_commands};
use crate::hud::draw_hud;
use crate::render::{
    StageView, draw_arrows, draw_bodies, draw_peak, draw_scene_menu, draw_stage, draw_trail,
};
use crate::state::AppRuntime;

pub(crate) fn window_conf() -> Conf {
    Conf {
        window_title: "Projectile Lab".to_string(),
        window_width: INITIAL_WINDOW_WIDTH,
        window_height: INITIAL_WINDOW_HEIGHT,
        high_dpi: true,
        sample_count: MSAA_SAMPLES,
        ..Default::default()
    }
}

pub(crate) async fn run() {
    let ui_font = match load_ttf_font(UI_FONT_PATH).await {
        Ok(font) => Some(font),
        Err(err) => {
            tracing::warn!(path = UI_FONT_PATH, %err, "falling back to default font");
            None
        }
    };

    let config = SimConfig::default();
    let mut state = match AppRuntime::new(config) {
        Ok(state) => state,
        Err(err) => {
            tracing::error!(%err, "invalid configuration");
            return;
        }
    };

    loop {
        let now = get_time();
        let screen_w = screen_width();
        let screen_h = screen_height();

        let Some(snapshot) = state.simulator.snapshot() else {
            if let Some(kind) = draw_scene_menu(screen_w, screen_h, ui_font.as_ref()) {
                state.simulator.select_scenario(kind);
                state.status_line = format!("Loaded {kind}");
            }
            next_frame().await;
            continue;
        };

        let step = config.speed_step;
        let mut commands = hotkey_commands(&snapshot, step);
        commands.extend(draw_control_panel(&snapshot, step));
        for command in commands {
            let leaving = command == Command::ExitToMenu;
            let result = state.simulator.apply(command, now).map(|_| ());
            state.record(result);
            if leaving {
                break;
            }
        }

        state.simulator.tick(now);
        let Some(snapshot) = state.simulator.snapshot() else {
            next_frame().await;
            continue;
        };

        let view = StageView::fit(&config.stage, screen_w, screen_h);
        draw_stage(&view, &config.stage);
        draw_trail(&view, &snapshot);
        draw_bodies(&view, &snapshot);
        draw_peak(&view, &snapshot, ui_font.as_ref());
        draw_arrows(&view, &snapshot.arrows, ui_font.as_ref());
        draw_hud(&snapshot, &state.status_line, screen_w, ui_font.as_ref());

        next_frame().await;
    }
}
