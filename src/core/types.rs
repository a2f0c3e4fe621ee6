use serde::{Deserialize, Serialize};

/// Device surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Axis-aligned rectangle in device pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.y + self.height
    }

    /// Sub-rectangle from fractions `[left, bottom, width, height]` measured
    /// from this rectangle's bottom-left corner.
    #[must_use]
    pub fn fraction(self, bounds: [f64; 4]) -> Self {
        let [left, bottom, width, height] = bounds;
        Self {
            x: self.x + left * self.width,
            y: self.y + (1.0 - bottom - height) * self.height,
            width: width * self.width,
            height: height * self.height,
        }
    }
}

/// Running min/max of data-space geometry, used for autoscaling.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DataBounds {
    x: Option<(f64, f64)>,
    y: Option<(f64, f64)>,
}

impl DataBounds {
    pub fn include_x(&mut self, value: f64) {
        self.x = Some(extend(self.x, value));
    }

    pub fn include_y(&mut self, value: f64) {
        self.y = Some(extend(self.y, value));
    }

    pub fn include_point(&mut self, x: f64, y: f64) {
        self.include_x(x);
        self.include_y(y);
    }

    #[must_use]
    pub fn x_range(self) -> Option<(f64, f64)> {
        self.x
    }

    #[must_use]
    pub fn y_range(self) -> Option<(f64, f64)> {
        self.y
    }
}

fn extend(range: Option<(f64, f64)>, value: f64) -> (f64, f64) {
    match range {
        Some((min, max)) => (min.min(value), max.max(value)),
        None => (value, value),
    }
}
