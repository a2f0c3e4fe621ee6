use std::fs::File;
use std::path::Path;

use cairo::{Context, Format, ImageSurface, LineCap};
use pango::FontDescription;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::render::{
    Color, FramePrimitive, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign,
    TextPrimitive, TextVAlign,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CairoRenderStats {
    pub lines_drawn: usize,
    pub rects_drawn: usize,
    pub texts_drawn: usize,
}

/// Renderers that can paint into an externally owned Cairo context.
pub trait CairoContextRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()>;
}

/// Cairo + Pango renderer backend.
///
/// `Renderer::render` paints into an owned image surface which can then be
/// written out with `write_png`.
#[derive(Debug)]
pub struct CairoRenderer {
    surface: ImageSurface,
    last_stats: CairoRenderStats,
}

impl CairoRenderer {
    pub fn new(width: i32, height: i32) -> ChartResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ChartError::InvalidData(
                "cairo surface size must be > 0".to_owned(),
            ));
        }

        let surface = ImageSurface::create(Format::ARgb32, width, height)
            .map_err(|err| map_backend_error("failed to create cairo surface", err))?;
        Ok(Self {
            surface,
            last_stats: CairoRenderStats::default(),
        })
    }

    /// Creates a renderer sized to the frame's viewport.
    pub fn for_frame(frame: &RenderFrame) -> ChartResult<Self> {
        let width = i32::try_from(frame.viewport.width)
            .map_err(|_| ChartError::InvalidData("viewport width exceeds i32".to_owned()))?;
        let height = i32::try_from(frame.viewport.height)
            .map_err(|_| ChartError::InvalidData("viewport height exceeds i32".to_owned()))?;
        Self::new(width, height)
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        "cairo+pango+pangocairo"
    }

    #[must_use]
    pub fn surface(&self) -> &ImageSurface {
        &self.surface
    }

    #[must_use]
    pub fn last_stats(&self) -> CairoRenderStats {
        self.last_stats
    }

    pub fn write_png(&self, path: &Path) -> ChartResult<()> {
        let mut file = File::create(path).map_err(|err| {
            ChartError::Backend(format!("failed to create `{}`: {err}", path.display()))
        })?;
        self.surface.write_to_png(&mut file).map_err(|err| {
            ChartError::Backend(format!("failed to write `{}`: {err}", path.display()))
        })?;
        debug!(path = %path.display(), "wrote png");
        Ok(())
    }

    fn render_with_context(&mut self, context: &Context, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;

        apply_color(context, frame.background);
        context
            .paint()
            .map_err(|err| map_backend_error("failed to clear surface", err))?;

        let mut stats = CairoRenderStats::default();
        for primitive in &frame.primitives {
            match primitive {
                FramePrimitive::Line(line) => {
                    stroke_line(context, line)?;
                    stats.lines_drawn += 1;
                }
                FramePrimitive::Rect(rect) => {
                    fill_rect(context, rect)?;
                    stats.rects_drawn += 1;
                }
                FramePrimitive::Text(text) => {
                    show_text(context, text)?;
                    stats.texts_drawn += 1;
                }
            }
        }

        self.last_stats = stats;
        Ok(())
    }
}

impl Renderer for CairoRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        let context = Context::new(&self.surface)
            .map_err(|err| map_backend_error("failed to create cairo context", err))?;
        self.render_with_context(&context, frame)
    }
}

impl CairoContextRenderer for CairoRenderer {
    fn render_on_cairo_context(
        &mut self,
        context: &Context,
        frame: &RenderFrame,
    ) -> ChartResult<()> {
        self.render_with_context(context, frame)
    }
}

fn stroke_line(context: &Context, line: &LinePrimitive) -> ChartResult<()> {
    apply_color(context, line.color);
    context.set_line_width(line.stroke_width);
    let dashes = line.stroke_style.dash_pattern(line.stroke_width);
    context.set_dash(&dashes, 0.0);
    context.set_line_cap(if dashes.is_empty() {
        LineCap::Square
    } else {
        LineCap::Butt
    });
    context.move_to(line.x1, line.y1);
    context.line_to(line.x2, line.y2);
    context
        .stroke()
        .map_err(|err| map_backend_error("failed to stroke line", err))
}

fn fill_rect(context: &Context, rect: &RectPrimitive) -> ChartResult<()> {
    apply_color(context, rect.fill_color);
    context.rectangle(rect.x, rect.y, rect.width, rect.height);
    context
        .fill()
        .map_err(|err| map_backend_error("failed to fill rectangle", err))
}

fn show_text(context: &Context, text: &TextPrimitive) -> ChartResult<()> {
    let layout = pangocairo::functions::create_layout(context);
    let mut font_description = FontDescription::from_string("Sans");
    font_description.set_absolute_size(text.font_size_px * f64::from(pango::SCALE));
    layout.set_font_description(Some(&font_description));
    layout.set_text(&text.text);

    let (text_width, text_height) = layout.pixel_size();
    let dx = match text.h_align {
        TextHAlign::Left => 0.0,
        TextHAlign::Center => -f64::from(text_width) / 2.0,
        TextHAlign::Right => -f64::from(text_width),
    };
    let dy = match text.v_align {
        TextVAlign::Top => 0.0,
        TextVAlign::Middle => -f64::from(text_height) / 2.0,
        TextVAlign::Bottom => -f64::from(text_height),
    };

    context
        .save()
        .map_err(|err| map_backend_error("failed to save context", err))?;
    apply_color(context, text.color);
    context.translate(text.x, text.y);
    context.rotate(-text.rotation_deg.to_radians());
    context.move_to(dx, dy);
    pangocairo::functions::show_layout(context, &layout);
    context
        .restore()
        .map_err(|err| map_backend_error("failed to restore context", err))
}

fn apply_color(context: &Context, color: Color) {
    context.set_source_rgba(color.red, color.green, color.blue, color.alpha);
}

fn map_backend_error(prefix: &str, err: cairo::Error) -> ChartError {
    ChartError::Backend(format!("{prefix}: {err}"))
}
