//! Motion-vector arrows drawn on the projectile.

use glam::DVec2;

use crate::core::kinematics::DOWN;
use crate::core::units::UnitConverter;

/// Screen length per px/s of velocity.
pub const VECTOR_SCALE: f64 = 0.2;
/// Extra shortening applied to the gravity arrow on top of [`VECTOR_SCALE`].
pub const ACCELERATION_SCALE: f64 = 0.3;
/// Velocity components at or below this (px/s) produce no arrow.
const MIN_COMPONENT_PX_S: f64 = 1e-6;

/// The three overlay switches. Launch and reset restore [`Default`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VectorOverlay {
    pub visible: bool,
    /// One resultant velocity arrow instead of Vx/Vy components.
    pub combined_velocity: bool,
    /// Gravity arrow instead of any velocity arrows.
    pub acceleration: bool,
}

impl Default for VectorOverlay {
    fn default() -> Self {
        Self {
            visible: true,
            combined_velocity: false,
            acceleration: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArrowKind {
    Acceleration,
    Velocity,
    VelocityX,
    VelocityY,
}

impl ArrowKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Acceleration => "a",
            Self::Velocity => "v",
            Self::VelocityX => "Vx",
            Self::VelocityY => "Vy",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::Acceleration => "m/s²",
            _ => "m/s",
        }
    }
}

/// One arrow in stage pixels. `value` is the physical reading for the
/// label: a magnitude for `Velocity` and `Acceleration`, a signed Y-up
/// component for `VelocityX` and `VelocityY`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Arrow {
    pub kind: ArrowKind,
    pub from: DVec2,
    pub to: DVec2,
    pub value: f64,
}

impl Arrow {
    pub fn caption(&self) -> String {
        format!("{}: {:.2} {}", self.kind.label(), self.value, self.kind.unit())
    }
}

impl VectorOverlay {
    pub fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn toggle_velocity_mode(&mut self) -> bool {
        self.combined_velocity = !self.combined_velocity;
        self.combined_velocity
    }

    pub fn toggle_acceleration(&mut self) -> bool {
        self.acceleration = !self.acceleration;
        self.acceleration
    }

    /// Arrows anchored at `at` for the current switches. Empty when hidden.
    pub fn arrows(
        &self,
        at: DVec2,
        velocity_px_s: DVec2,
        gravity_px_s2: f64,
        units: &UnitConverter,
    ) -> Vec<Arrow> {
        if !self.visible {
            return Vec::new();
        }

        if self.acceleration {
            return vec![Arrow {
                kind: ArrowKind::Acceleration,
                from: at,
                to: at + DOWN * (gravity_px_s2 * VECTOR_SCALE * ACCELERATION_SCALE),
                value: units.px_to_m(gravity_px_s2),
            }];
        }

        let moving_x = velocity_px_s.x.abs() > MIN_COMPONENT_PX_S;
        let moving_y = velocity_px_s.y.abs() > MIN_COMPONENT_PX_S;
        if !moving_x && !moving_y {
            return Vec::new();
        }

        if self.combined_velocity {
            return vec![Arrow {
                kind: ArrowKind::Velocity,
                from: at,
                to: at + velocity_px_s * VECTOR_SCALE,
                value: units.px_s_to_mps(velocity_px_s.length()),
            }];
        }

        let mut arrows = Vec::with_capacity(2);
        if moving_x {
            arrows.push(Arrow {
                kind: ArrowKind::VelocityX,
                from: at,
                to: at + DVec2::new(velocity_px_s.x * VECTOR_SCALE, 0.0),
                value: units.px_s_to_mps(velocity_px_s.x),
            });
        }
        if moving_y {
            arrows.push(Arrow {
                kind: ArrowKind::VelocityY,
                from: at,
                to: at + DVec2::new(0.0, velocity_px_s.y * VECTOR_SCALE),
                value: units.px_s_to_mps(-velocity_px_s.y),
            });
        }
        arrows
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec2;

    use super::{ArrowKind, VectorOverlay};
    use crate::core::units::UnitConverter;

    const UNITS: UnitConverter = UnitConverter::new(37.5);
    const G_PX: f64 = 367.875;

    fn assert_close(actual: f64, expected: f64, tolerance: f64) {
        assert!(
            (actual - expected).abs() <= tolerance,
            "actual={actual}, expected={expected}, tolerance={tolerance}"
        );
    }

    #[test]
    fn defaults_show_components() {
        let overlay = VectorOverlay::default();
        let at = DVec2::new(100.0, 400.0);
        let arrows = overlay.arrows(at, DVec2::new(375.0, -750.0), G_PX, &UNITS);

        assert_eq!(arrows.len(), 2);
        assert_eq!(arrows[0].kind, ArrowKind::VelocityX);
        assert_eq!(arrows[0].to, DVec2::new(175.0, 400.0));
        assert_close(arrows[0].value, 10.0, 1e-12);
        assert_eq!(arrows[1].kind, ArrowKind::VelocityY);
        assert_eq!(arrows[1].to, DVec2::new(100.0, 250.0));
        assert_close(arrows[1].value, 20.0, 1e-12);
        assert_eq!(arrows[1].caption(), "Vy: 20.00 m/s");
    }

    #[test]
    fn zero_component_is_skipped() {
        let overlay = VectorOverlay::default();
        let arrows = overlay.arrows(DVec2::ZERO, DVec2::new(0.0, 30.0), G_PX, &UNITS);
        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].kind, ArrowKind::VelocityY);
        assert!(arrows[0].value < 0.0);

        assert!(overlay.arrows(DVec2::ZERO, DVec2::ZERO, G_PX, &UNITS).is_empty());
    }

    #[test]
    fn combined_mode_draws_resultant() {
        let mut overlay = VectorOverlay::default();
        assert!(overlay.toggle_velocity_mode());
        let arrows = overlay.arrows(DVec2::ZERO, DVec2::new(225.0, 300.0), G_PX, &UNITS);

        assert_eq!(arrows.len(), 1);
        assert_eq!(arrows[0].kind, ArrowKind::Velocity);
        assert_eq!(arrows[0].to, DVec2::new(45.0, 60.0));
        assert_close(arrows[0].value, 10.0, 1e-12);
    }

    #[test]
    fn acceleration_replaces_velocity_and_points_down() {
        let mut overlay = VectorOverlay::default();
        assert!(overlay.toggle_acceleration());
        let at = DVec2::new(10.0, 20.0);
        let arrows = overlay.arrows(at, DVec2::ZERO, G_PX, &UNITS);

        assert_eq!(arrows.len(), 1);
        let arrow = arrows[0];
        assert_eq!(arrow.kind, ArrowKind::Acceleration);
        assert_eq!(arrow.to.x, at.x);
        assert_close(arrow.to.y - at.y, G_PX * 0.2 * 0.3, 1e-9);
        assert_eq!(arrow.caption(), "a: 9.81 m/s²");
    }

    #[test]
    fn hidden_overlay_draws_nothing() {
        let mut overlay = VectorOverlay::default();
        assert!(!overlay.toggle_visible());
        overlay.toggle_acceleration();
        assert!(overlay.arrows(DVec2::ZERO, DVec2::ONE, G_PX, &UNITS).is_empty());
        assert!(overlay.toggle_visible());
    }
}
