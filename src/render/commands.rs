//! Data-space drawing commands issued by the diagram renderers.
//!
//! Coordinates here are in plot units: x is the reaction step position and
//! y is energy. Backends map them to pixels later.

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LineStrokeStyle};

/// What a line segment represents in a reaction diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRole {
    /// Horizontal constant-energy state of one step.
    Plateau,
    /// Transition joining two adjacent plateaus.
    Connector,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub color: Color,
    pub width: f64,
    pub style: LineStrokeStyle,
    pub role: LineRole,
}

impl LineSegment {
    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite("line", &[self.x1, self.y1, self.x2, self.y2])?;
        ensure_positive("line width", self.width)?;
        self.color.validate()
    }
}

/// Horizontal reference line spanning the full width of the target axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HorizontalRule {
    pub y: f64,
    pub color: Color,
    pub width: f64,
    pub style: LineStrokeStyle,
}

impl HorizontalRule {
    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite("rule", &[self.y])?;
        ensure_positive("rule width", self.width)?;
        self.color.validate()
    }
}

/// Vertical bar rising (or falling) from the zero baseline to `height`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarPrimitive {
    pub x_center: f64,
    pub width: f64,
    pub height: f64,
    pub color: Color,
}

impl BarPrimitive {
    #[must_use]
    pub fn x_left(&self) -> f64 {
        self.x_center - self.width * 0.5
    }

    #[must_use]
    pub fn x_right(&self) -> f64 {
        self.x_center + self.width * 0.5
    }

    pub fn validate(&self) -> ChartResult<()> {
        ensure_finite("bar", &[self.x_center, self.height])?;
        ensure_positive("bar width", self.width)?;
        self.color.validate()
    }
}

/// Numeric annotation attached to the free end of a bar.
///
/// `padding` is the distance from the bar end in points, pointing away from
/// the baseline: above positive bars, below negative ones.
#[derive(Debug, Clone, PartialEq)]
pub struct BarLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub padding: f64,
    pub color: Color,
}

impl BarLabel {
    /// Whether the label sits below its anchor.
    #[must_use]
    pub fn hangs_below(&self) -> bool {
        self.y < 0.0
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.text.is_empty() {
            return Err(ChartError::InvalidData(
                "bar label text must not be empty".to_owned(),
            ));
        }
        ensure_finite("bar label", &[self.x, self.y, self.padding])?;
        self.color.validate()
    }
}

/// Glyph shown next to a legend label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LegendGlyph {
    Line { width: f64, style: LineStrokeStyle },
    Patch,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub label: String,
    pub color: Color,
    pub glyph: LegendGlyph,
}

impl LegendEntry {
    pub fn validate(&self) -> ChartResult<()> {
        if let LegendGlyph::Line { width, .. } = self.glyph {
            ensure_positive("legend line width", width)?;
        }
        self.color.validate()
    }
}

/// One recorded canvas call, in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Line(LineSegment),
    HorizontalRule(HorizontalRule),
    Bar(BarPrimitive),
    Label(BarLabel),
    Legend(LegendEntry),
}

fn ensure_finite(what: &str, values: &[f64]) -> ChartResult<()> {
    if values.iter().all(|value| value.is_finite()) {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} coordinates must be finite"
        )))
    }
}

fn ensure_positive(what: &str, value: f64) -> ChartResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ChartError::InvalidData(format!(
            "{what} must be finite and > 0"
        )))
    }
}
