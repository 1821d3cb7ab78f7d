//! Sample-to-pixel mapping.
//!
//! Horizontal position is a function of the slot index within the series
//! capacity, not of the current length: a partially filled series starts at
//! the left edge and only scrolls once the window is full.  Values outside
//! the range land outside the padded box; nothing is clamped.

use dash_core::{DashError, Result};

/// Fixed vertical scale of a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Position of `value` within the range, `0.0` at `min` and `1.0` at `max`.
    #[inline]
    pub fn normalize(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }
}

/// Pixel area available to a chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width:   f64,
    pub height:  f64,
    pub padding: f64,
}

impl Viewport {
    pub const DEFAULT_PADDING: f64 = 10.0;

    pub fn new(width: f64, height: f64, padding: f64) -> Self {
        Self { width, height, padding }
    }

    /// Width of the padded plot box.
    pub fn inner_width(&self) -> f64 {
        self.width - 2.0 * self.padding
    }

    /// Height of the padded plot box.
    pub fn inner_height(&self) -> f64 {
        self.height - 2.0 * self.padding
    }

    /// y coordinate of the bottom edge of the plot box.
    pub fn baseline(&self) -> f64 {
        self.height - self.padding
    }
}

/// A point in surface coordinates (origin top-left, y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotPoint {
    pub x: f64,
    pub y: f64,
}

impl PlotPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Map `samples` (oldest first) to plot points.
///
/// Fails with [`DashError::Configuration`] when `capacity < 2`, since the
/// horizontal step would divide by zero.
pub fn map_points(
    samples: &[f64],
    range: ValueRange,
    viewport: Viewport,
    capacity: usize,
) -> Result<Vec<PlotPoint>> {
    if capacity < 2 {
        return Err(DashError::Configuration(format!(
            "chart capacity must be at least 2, got {capacity}"
        )));
    }

    let step = viewport.inner_width() / (capacity - 1) as f64;
    let inner_height = viewport.inner_height();

    Ok(samples
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let x = viewport.padding + i as f64 * step;
            let y = viewport.padding + inner_height - range.normalize(value) * inner_height;
            PlotPoint::new(x, y)
        })
        .collect())
}
