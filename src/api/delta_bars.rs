use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::EnergySeries;
use crate::error::{ChartError, ChartResult};
use crate::render::{
    BarLabel, BarPrimitive, Canvas, Color, HorizontalRule, LegendEntry, LegendGlyph,
    LineStrokeStyle,
};

use super::LabelFormat;

pub const DEFAULT_BAR_WIDTH: f64 = 0.25;
pub const DEFAULT_LABEL_PADDING: f64 = 3.0;
pub const DEFAULT_ZERO_LINE_WIDTH: f64 = 1.0;

/// Styling for [`render_delta_bars`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeltaBarOptions {
    pub color: Color,
    pub label: String,
    pub bar_width: f64,
    /// Horizontal offset in multiples of `bar_width`, for grouping series.
    pub shift: f64,
    pub annotate: bool,
    pub label_format: LabelFormat,
    /// Gap between a bar end and its annotation, in points.
    pub label_padding: f64,
    pub label_color: Color,
    pub draw_zero_line: bool,
    pub zero_line_width: f64,
    pub zero_line_style: LineStrokeStyle,
    pub zero_line_color: Color,
}

impl Default for DeltaBarOptions {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            label: String::new(),
            bar_width: DEFAULT_BAR_WIDTH,
            shift: 0.0,
            annotate: false,
            label_format: LabelFormat::default(),
            label_padding: DEFAULT_LABEL_PADDING,
            label_color: Color::BLACK,
            draw_zero_line: true,
            zero_line_width: DEFAULT_ZERO_LINE_WIDTH,
            zero_line_style: LineStrokeStyle::Dotted,
            zero_line_color: Color::BLACK,
        }
    }
}

impl DeltaBarOptions {
    #[must_use]
    pub fn new(color: Color, label: impl Into<String>) -> Self {
        Self {
            color,
            label: label.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_bar_width(mut self, bar_width: f64) -> Self {
        self.bar_width = bar_width;
        self
    }

    #[must_use]
    pub fn with_shift(mut self, shift: f64) -> Self {
        self.shift = shift;
        self
    }

    /// Enables value annotations rendered with `label_format`.
    #[must_use]
    pub fn with_annotations(mut self, label_format: LabelFormat, label_padding: f64) -> Self {
        self.annotate = true;
        self.label_format = label_format;
        self.label_padding = label_padding;
        self
    }

    #[must_use]
    pub fn with_zero_line(mut self, width: f64, style: LineStrokeStyle) -> Self {
        self.draw_zero_line = true;
        self.zero_line_width = width;
        self.zero_line_style = style;
        self
    }

    #[must_use]
    pub fn without_zero_line(mut self) -> Self {
        self.draw_zero_line = false;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, color) in [
            ("color", self.color),
            ("label_color", self.label_color),
            ("zero_line_color", self.zero_line_color),
        ] {
            color
                .validate()
                .map_err(|err| ChartError::option(name, err.to_string()))?;
        }
        for (name, value) in [
            ("bar_width", self.bar_width),
            ("zero_line_width", self.zero_line_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::option(
                    name,
                    format!("must be finite and > 0, got {value}"),
                ));
            }
        }
        for (name, value) in [("shift", self.shift), ("label_padding", self.label_padding)] {
            if !value.is_finite() {
                return Err(ChartError::option(
                    name,
                    format!("must be finite, got {value}"),
                ));
            }
        }
        Ok(())
    }

    /// Center x of the bar for the transition into step `to_step` (1-based).
    #[must_use]
    pub fn bar_center(&self, to_step: usize) -> f64 {
        to_step as f64 + self.bar_width * self.shift
    }
}

/// Draws one bar per consecutive energy difference.
///
/// The bar for `E[i + 1] - E[i]` sits at x = `i + 2` (the step it leads
/// into), offset by `bar_width * shift`, and extends from zero to the signed
/// difference. Emission order is legend entry, bars, optional annotations,
/// optional zero rule. A single-step series draws no bars but still emits
/// the zero rule when enabled.
pub fn render_delta_bars<C: Canvas + ?Sized>(
    canvas: &mut C,
    energies: &[f64],
    options: &DeltaBarOptions,
) -> ChartResult<()> {
    let series = EnergySeries::from_slice(energies)?;
    render_delta_series(canvas, &series, options)
}

/// [`render_delta_bars`] for an already validated series.
pub fn render_delta_series<C: Canvas + ?Sized>(
    canvas: &mut C,
    series: &EnergySeries,
    options: &DeltaBarOptions,
) -> ChartResult<()> {
    options.validate()?;
    let deltas = series.deltas()?;

    canvas.register_legend_entry(LegendEntry {
        label: options.label.clone(),
        color: options.color,
        glyph: LegendGlyph::Patch,
    })?;

    let bars: Vec<BarPrimitive> = deltas
        .iter()
        .enumerate()
        .map(|(i, delta)| BarPrimitive {
            x_center: options.bar_center(i + 2),
            width: options.bar_width,
            height: delta,
            color: options.color,
        })
        .collect();
    for bar in &bars {
        canvas.draw_bar(*bar)?;
    }

    if options.annotate {
        for bar in &bars {
            let text = options.label_format.format(bar.height);
            trace!(x = bar.x_center, %text, "annotate bar");
            canvas.draw_label(BarLabel {
                text,
                x: bar.x_center,
                y: bar.height,
                padding: options.label_padding,
                color: options.label_color,
            })?;
        }
    }

    if options.draw_zero_line {
        canvas.draw_horizontal_rule(HorizontalRule {
            y: 0.0,
            color: options.zero_line_color,
            width: options.zero_line_width,
            style: options.zero_line_style,
        })?;
    }

    debug!(
        bars = bars.len(),
        annotated = options.annotate,
        zero_line = options.draw_zero_line,
        label = %options.label,
        "rendered delta bars"
    );
    Ok(())
}
