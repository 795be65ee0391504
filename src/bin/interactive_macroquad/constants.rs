use macroquad::prelude::Color;

pub const INITIAL_WINDOW_WIDTH: i32 = 1387;
pub const INITIAL_WINDOW_HEIGHT: i32 = 712;
pub const MSAA_SAMPLES: i32 = 4;
pub const UI_FONT_PATH: &str = "assets/fonts/Lato-Regular.ttf";

pub const TITLE_Y: f32 = 40.0;
pub const PANEL_POS: (f32, f32) = (12.0, 8.0);
pub const PANEL_SIZE: (f32, f32) = (400.0, 400.0);
pub const HUD_WIDTH: f32 = 380.0;

pub const MENU_BG: Color = Color::new(0.92, 0.93, 0.95, 1.0);
pub const MENU_BUTTON_COLOR: Color = Color::new(0.14, 0.45, 0.95, 1.0);
pub const STAGE_BG: Color = Color::new(0.98, 0.984, 0.992, 1.0);
pub const FLOOR_COLOR: Color = Color::new(0.35, 0.38, 0.42, 1.0);
pub const TRAIL_COLOR: Color = Color::new(0.21, 0.48, 0.96, 0.85);
pub const TARGET_FILL: Color = Color::new(0.32, 0.79, 0.48, 0.85);
pub const PEAK_COLOR: Color = Color::new(0.95, 0.62, 0.02, 1.0);
pub const ACCEL_ARROW_COLOR: Color = Color::new(0.10, 0.62, 0.25, 1.0);
pub const VELOCITY_ARROW_COLOR: Color = Color::new(0.85, 0.12, 0.75, 1.0);
pub const VX_ARROW_COLOR: Color = Color::new(0.15, 0.35, 0.85, 1.0);
pub const VY_ARROW_COLOR: Color = Color::new(0.10, 0.10, 0.12, 1.0);
pub const ERROR_COLOR: Color = Color::new(0.80, 0.10, 0.10, 1.0);

pub const TRAIL_DOT_RADIUS: f32 = 3.0;
pub const PEAK_DOT_RADIUS: f32 = 6.0;
pub const ARROW_HEAD_SIZE: f32 = 9.0;
pub const ARROW_THICKNESS: f32 = 2.5;
