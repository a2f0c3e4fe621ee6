mod commands;
mod frame;
mod null_renderer;
mod primitives;
mod recording;

pub use commands::{
    BarLabel, BarPrimitive, DrawCommand, HorizontalRule, LegendEntry, LegendGlyph, LineRole,
    LineSegment,
};
pub use frame::{FramePrimitive, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    Color, LinePrimitive, LineStrokeStyle, RectPrimitive, TextHAlign, TextPrimitive, TextVAlign,
};
pub use recording::RecordingCanvas;

use crate::error::ChartResult;

/// Data-space drawing surface targeted by the diagram renderers.
///
/// The caller owns the canvas; renderers only issue operations against it.
/// Call order is layering order.
pub trait Canvas {
    fn draw_line(&mut self, line: LineSegment) -> ChartResult<()>;

    /// Draws a line at height `rule.y` across the whole axes.
    fn draw_horizontal_rule(&mut self, rule: HorizontalRule) -> ChartResult<()>;

    fn draw_bar(&mut self, bar: BarPrimitive) -> ChartResult<()>;

    fn draw_label(&mut self, label: BarLabel) -> ChartResult<()>;

    /// Registers a legend entry without drawing any visible geometry.
    fn register_legend_entry(&mut self, entry: LegendEntry) -> ChartResult<()>;
}

impl<C: Canvas + ?Sized> Canvas for &mut C {
    fn draw_line(&mut self, line: LineSegment) -> ChartResult<()> {
        (**self).draw_line(line)
    }

    fn draw_horizontal_rule(&mut self, rule: HorizontalRule) -> ChartResult<()> {
        (**self).draw_horizontal_rule(rule)
    }

    fn draw_bar(&mut self, bar: BarPrimitive) -> ChartResult<()> {
        (**self).draw_bar(bar)
    }

    fn draw_label(&mut self, label: BarLabel) -> ChartResult<()> {
        (**self).draw_label(label)
    }

    fn register_legend_entry(&mut self, entry: LegendEntry) -> ChartResult<()> {
        (**self).register_legend_entry(entry)
    }
}

/// Contract implemented by any pixel rendering backend.
///
/// Backends receive a fully laid out, deterministic `RenderFrame` so drawing
/// code stays isolated from diagram semantics.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}

#[cfg(feature = "cairo-backend")]
mod cairo_backend;
#[cfg(feature = "cairo-backend")]
pub use cairo_backend::{CairoContextRenderer, CairoRenderStats, CairoRenderer};
