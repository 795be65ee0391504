/// Pixel/meter conversion for display strings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitConverter {
    pixels_per_meter: f64,
}

impl UnitConverter {
    pub const fn new(pixels_per_meter: f64) -> Self {
        Self { pixels_per_meter }
    }

    pub fn pixels_per_meter(&self) -> f64 {
        self.pixels_per_meter
    }

    pub fn px_to_m(&self, pixels: f64) -> f64 {
        if self.pixels_per_meter == 0.0 {
            return 0.0;
        }
        pixels / self.pixels_per_meter
    }

    pub fn m_to_px(&self, meters: f64) -> f64 {
        meters * self.pixels_per_meter
    }

    pub fn px_s_to_mps(&self, pixels_per_second: f64) -> f64 {
        self.px_to_m(pixels_per_second)
    }

    pub fn mps_to_px_s(&self, meters_per_second: f64) -> f64 {
        self.m_to_px(meters_per_second)
    }
}
