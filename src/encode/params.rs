// src/encode/params.rs

use crate::encode::header::DEFAULT_PIXELS_PER_METER;

/// Configuration for BMP encoding.
///
/// Only the resolution stored in the info header can be chosen. It does not
/// affect pixel data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BmpParams {
    /// Horizontal resolution in pixels per meter (default: 3780, ~96 DPI)
    pub x_pixels_per_meter: u32,
    /// Vertical resolution in pixels per meter (default: 3780, ~96 DPI)
    pub y_pixels_per_meter: u32,
}

impl Default for BmpParams {
    fn default() -> Self {
        Self {
            x_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
            y_pixels_per_meter: DEFAULT_PIXELS_PER_METER,
        }
    }
}

impl BmpParams {
    /// Creates params with the default resolution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets both resolutions from dots per inch, rounded to the nearest
    /// pixel per meter.
    pub fn with_dpi(mut self, dpi: u32) -> Self {
        let ppm = dpi_to_pixels_per_meter(dpi);
        self.x_pixels_per_meter = ppm;
        self.y_pixels_per_meter = ppm;
        self
    }

    pub fn with_pixels_per_meter(mut self, x: u32, y: u32) -> Self {
        self.x_pixels_per_meter = x;
        self.y_pixels_per_meter = y;
        self
    }
}

/// 1 inch = 0.0254 m
fn dpi_to_pixels_per_meter(dpi: u32) -> u32 {
    let ppm = (dpi as u64 * 10_000 + 127) / 254;
    ppm.min(u32::MAX as u64) as u32
}
