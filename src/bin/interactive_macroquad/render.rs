use macroquad::prelude::*;

use projectile_lab::core::{Arrow, ArrowKind, DVec2, ScenarioKind, Snapshot, Stage};

use crate::constants::{
    ACCEL_ARROW_COLOR, ARROW_HEAD_SIZE, ARROW_THICKNESS, FLOOR_COLOR, MENU_BG, MENU_BUTTON_COLOR,
    PEAK_COLOR, PEAK_DOT_RADIUS, STAGE_BG, TARGET_FILL, TRAIL_COLOR, TRAIL_DOT_RADIUS,
    VELOCITY_ARROW_COLOR, VX_ARROW_COLOR, VY_ARROW_COLOR,
};

/// Uniform scale from stage pixels to screen pixels, centered horizontally.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct StageView {
    pub(crate) scale: f32,
    pub(crate) offset: Vec2,
}

impl StageView {
    pub(crate) fn fit(stage: &Stage, screen_w: f32, screen_h: f32) -> Self {
        let stage_w = stage.width as f32;
        let stage_h = stage.bottom() as f32;
        let scale = (screen_w / stage_w).min(screen_h / stage_h).max(0.01);
        let offset = vec2(((screen_w - stage_w * scale) * 0.5).max(0.0), 0.0);
        Self { scale, offset }
    }

    pub(crate) fn to_screen(&self, point: DVec2) -> Vec2 {
        self.offset + vec2(point.x as f32, point.y as f32) * self.scale
    }

    pub(crate) fn length(&self, pixels: f64) -> f32 {
        pixels as f32 * self.scale
    }
}

pub(crate) fn draw_ui_text(
    text: &str,
    x: f32,
    y: f32,
    font_size: u16,
    color: Color,
    font: Option<&Font>,
) {
    draw_text_ex(
        text,
        x,
        y,
        TextParams {
            font,
            font_size,
            color,
            ..Default::default()
        },
    );
}

pub(crate) fn draw_stage(view: &StageView, stage: &Stage) {
    clear_background(STAGE_BG);
    let left = view.to_screen(DVec2::new(0.0, stage.top));
    let right = view.to_screen(DVec2::new(stage.width, stage.bottom()));
    draw_line(left.x, left.y, right.x, left.y, 1.0, LIGHTGRAY);
    draw_line(left.x, right.y, right.x, right.y, 3.0, FLOOR_COLOR);
}

pub(crate) fn draw_trail(view: &StageView, snapshot: &Snapshot) {
    let radius = (TRAIL_DOT_RADIUS * view.scale).max(1.5);
    for point in &snapshot.trail {
        let p = view.to_screen(*point);
        draw_circle(p.x, p.y, radius, TRAIL_COLOR);
    }
}

pub(crate) fn draw_bodies(view: &StageView, snapshot: &Snapshot) {
    if snapshot.target_visible {
        let top_left = view.to_screen(snapshot.target_top_left);
        let w = view.length(snapshot.target_size.x);
        let h = view.length(snapshot.target_size.y);
        draw_rectangle(top_left.x, top_left.y, w, h, TARGET_FILL);
        draw_rectangle_lines(top_left.x, top_left.y, w, h, 2.0, DARKGREEN);
    }

    let p = view.to_screen(snapshot.projectile_position);
    let radius = view.length(snapshot.projectile_radius);
    draw_circle(p.x, p.y, radius, RED);
    draw_circle_lines(p.x, p.y, radius, 2.0, MAROON);
}

pub(crate) fn draw_peak(view: &StageView, snapshot: &Snapshot, font: Option<&Font>) {
    let Some(peak) = snapshot.peak else {
        return;
    };
    let p = view.to_screen(peak.position);
    let base = view.to_screen(DVec2::new(peak.position.x, snapshot.projectile_start.y));
    draw_line(p.x, p.y, base.x, base.y, 1.5, PEAK_COLOR);
    draw_circle(p.x, p.y, PEAK_DOT_RADIUS, PEAK_COLOR);
    draw_ui_text(
        &format!("h = {:.2} m", peak.height_m),
        p.x + 10.0,
        p.y - 8.0,
        18,
        PEAK_COLOR,
        font,
    );
}

fn arrow_color(kind: ArrowKind) -> Color {
    match kind {
        ArrowKind::Acceleration => ACCEL_ARROW_COLOR,
        ArrowKind::Velocity => VELOCITY_ARROW_COLOR,
        ArrowKind::VelocityX => VX_ARROW_COLOR,
        ArrowKind::VelocityY => VY_ARROW_COLOR,
    }
}

/// Screen points of the two barbs at the tip of `from -> to`. `None` for a
/// zero-length arrow.
pub(crate) fn arrow_head(from: Vec2, to: Vec2, size: f32) -> Option<(Vec2, Vec2)> {
    let dir = (to - from).try_normalize()?;
    let back = to - dir * size;
    let side = dir.perp() * (size * 0.5);
    Some((back + side, back - side))
}

pub(crate) fn draw_arrows(view: &StageView, arrows: &[Arrow], font: Option<&Font>) {
    for arrow in arrows {
        let color = arrow_color(arrow.kind);
        let from = view.to_screen(arrow.from);
        let to = view.to_screen(arrow.to);
        draw_line(from.x, from.y, to.x, to.y, ARROW_THICKNESS, color);
        if let Some((left, right)) = arrow_head(from, to, ARROW_HEAD_SIZE) {
            draw_triangle(to, left, right, color);
        }
        let label_dy = if to.y >= from.y { 18.0 } else { -6.0 };
        draw_ui_text(&arrow.caption(), to.x + 8.0, to.y + label_dy, 16, color, font);
    }
}

/// Returns the scenario picked by click or by the 1/2/3 keys.
pub(crate) fn draw_scene_menu(
    screen_w: f32,
    screen_h: f32,
    font: Option<&Font>,
) -> Option<ScenarioKind> {
    clear_background(MENU_BG);

    let title = "Projectile Lab";
    let title_size: u16 = 80;
    let title_measure = measure_text(title, font, title_size, 1.0);
    let title_y = (screen_h * 0.28).max(110.0);
    draw_ui_text(
        title,
        (screen_w - title_measure.width) * 0.5,
        title_y,
        title_size,
        BLACK,
        font,
    );

    let button_w = 420.0;
    let button_h = 72.0;
    let button_x = (screen_w - button_w) * 0.5;
    let mouse = mouse_position();
    let mouse_vec = vec2(mouse.0, mouse.1);
    let hotkeys = [KeyCode::Key1, KeyCode::Key2, KeyCode::Key3];

    let mut picked = None;
    for (idx, (kind, key)) in ScenarioKind::ALL.into_iter().zip(hotkeys).enumerate() {
        let button_y = title_y + 50.0 + idx as f32 * (button_h + 20.0);
        let rect = Rect::new(button_x, button_y, button_w, button_h);
        draw_rectangle(rect.x, rect.y, rect.w, rect.h, MENU_BUTTON_COLOR);
        draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, 3.0, WHITE);

        let label = format!("{}  {}", idx + 1, kind.label());
        let size = measure_text(&label, font, 36, 1.0);
        draw_ui_text(
            &label,
            rect.x + (rect.w - size.width) * 0.5,
            rect.y + (rect.h + size.height) * 0.5 - 6.0,
            36,
            WHITE,
            font,
        );

        let clicked = is_mouse_button_pressed(MouseButton::Left) && rect.contains(mouse_vec);
        if clicked || is_key_pressed(key) {
            picked = Some(kind);
        }
    }

    picked
}

#[cfg(test)]
mod tests {
    use macroquad::prelude::vec2;

    use super::{StageView, arrow_head};
    use projectile_lab::core::{DVec2, Stage};

    #[test]
    fn native_size_is_identity() {
        let stage = Stage::default();
        let view = StageView::fit(&stage, stage.width as f32, stage.bottom() as f32);
        assert_eq!(view.scale, 1.0);
        let p = view.to_screen(DVec2::new(100.0, 200.0));
        assert_eq!((p.x, p.y), (100.0, 200.0));
    }

    #[test]
    fn wide_window_centers_stage() {
        let stage = Stage::default();
        let view = StageView::fit(&stage, stage.width as f32 * 2.0 + 100.0, stage.bottom() as f32);
        assert_eq!(view.scale, 1.0);
        assert!(view.offset.x > 0.0);
    }

    #[test]
    fn arrow_head_sits_behind_the_tip() {
        let (left, right) = arrow_head(vec2(0.0, 0.0), vec2(0.0, 20.0), 10.0).expect("non-zero");
        assert_eq!(left.y, 10.0);
        assert_eq!(right.y, 10.0);
        assert_eq!(left.x, -right.x);
        assert_eq!(left.x.abs(), 5.0);
        assert!(arrow_head(vec2(3.0, 3.0), vec2(3.0, 3.0), 10.0).is_none());
    }
}
