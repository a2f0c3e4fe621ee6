use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::EnergySeries;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    Canvas, Color, LegendEntry, LegendGlyph, LineRole, LineSegment, LineStrokeStyle,
};

pub const DEFAULT_STEP_LINE_WIDTH: f64 = 2.0;
pub const DEFAULT_PLATEAU_SCALE: f64 = 0.32;

/// Styling for [`render_step_diagram`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDiagramOptions {
    pub color: Color,
    pub label: String,
    /// Step whose energy becomes the zero reference.
    pub zero_index: Option<usize>,
    pub line_width: f64,
    /// Half-width of each plateau in step units.
    pub plateau_scale: f64,
}

impl Default for StepDiagramOptions {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            label: String::new(),
            zero_index: None,
            line_width: DEFAULT_STEP_LINE_WIDTH,
            plateau_scale: DEFAULT_PLATEAU_SCALE,
        }
    }
}

impl StepDiagramOptions {
    #[must_use]
    pub fn new(color: Color, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_zero_index(mut self, zero_index: usize) -> Self {
        self.zero_index = Some(zero_index);
        self
    }

    #[must_use]
    pub fn with_line_width(mut self, line_width: f64) -> Self {
        self.line_width = line_width;
        self
    }

    #[must_use]
    pub fn with_plateau_scale(mut self, plateau_scale: f64) -> Self {
        self.plateau_scale = plateau_scale;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.color
            .validate()
            .map_err(|err| ChartError::option("color", err.to_string()))?;
        if !self.line_width.is_finite() || self.line_width <= 0.0 {
            return Err(ChartError::option(
                "line_width",
                format!("must be finite and > 0, got {}", self.line_width),
            ));
        }
        if !self.plateau_scale.is_finite() || self.plateau_scale <= 0.0 {
            return Err(ChartError::option(
                "plateau_scale",
                format!("must be finite and > 0, got {}", self.plateau_scale),
            ));
        }
        Ok(())
    }
}

/// Draws a staircase reaction-coordinate diagram.
///
/// Step `j` (0-based) becomes a solid plateau over
/// `[j + 1 - scale, j + 1 + scale]` at its energy, followed by a dotted
/// connector from its right edge to the left edge of step `j + 1`. A single
/// legend entry is registered last. With `zero_index` set, all heights are
/// relative to that step's energy.
///
/// Errors propagate immediately; commands issued before the failure stay on
/// the canvas.
pub fn render_step_diagram<C: Canvas + ?Sized>(
    canvas: &mut C,
    energies: &[f64],
    options: &StepDiagramOptions,
) -> ChartResult<()> {
    let series = EnergySeries::from_slice(energies)?;
    render_step_series(canvas, &series, options)
}

/// [`render_step_diagram`] for an already validated series.
pub fn render_step_series<C: Canvas + ?Sized>(
    canvas: &mut C,
    series: &EnergySeries,
    options: &StepDiagramOptions,
) -> ChartResult<()> {
    options.validate()?;
    let series = match options.zero_index {
        Some(zero_index) => series.rebased(zero_index)?,
        None => series.clone(),
    };

    let levels = series.values();
    let scale = options.plateau_scale;
    let segment = |x1: f64, y1: f64, x2: f64, y2: f64, style, role| LineSegment {
        x1,
        y1,
        x2,
        y2,
        color: options.color,
        width: options.line_width,
        style,
        role,
    };

    for (j, &level) in levels.iter().enumerate() {
        let x = (j + 1) as f64;
        canvas.draw_line(segment(
            x - scale,
            level,
            x + scale,
            level,
            LineStrokeStyle::Solid,
            LineRole::Plateau,
        ))?;
        if let Some(&next) = levels.get(j + 1) {
            canvas.draw_line(segment(
                x + scale,
                level,
                x + 1.0 - scale,
                next,
                LineStrokeStyle::Dotted,
                LineRole::Connector,
            ))?;
        }
    }

    canvas.register_legend_entry(LegendEntry {
        label: options.label.clone(),
        color: options.color,
        glyph: LegendGlyph::Line {
            width: options.line_width,
            style: LineStrokeStyle::Solid,
        },
    })?;

    debug!(
        steps = levels.len(),
        connectors = levels.len().saturating_sub(1),
        zero_index = ?options.zero_index,
        label = %options.label,
        "rendered step diagram"
    );
    Ok(())
}
