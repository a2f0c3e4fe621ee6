use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{Color, LinePrimitive, RectPrimitive, TextPrimitive};

/// Pixel-space primitive in paint order.
#[derive(Debug, Clone, PartialEq)]
pub enum FramePrimitive {
    Line(LinePrimitive),
    Rect(RectPrimitive),
    Text(TextPrimitive),
}

/// Backend-agnostic scene for one figure draw pass.
///
/// Primitives keep the order they were pushed so bars, rules and labels
/// layer the same way the renderers issued them.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub background: Color,
    pub primitives: Vec<FramePrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            background: Color::WHITE,
            primitives: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: LinePrimitive) -> Self {
        self.push_line(line);
        self
    }

    #[must_use]
    pub fn with_rect(mut self, rect: RectPrimitive) -> Self {
        self.push_rect(rect);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: TextPrimitive) -> Self {
        self.push_text(text);
        self
    }

    pub fn push_line(&mut self, line: LinePrimitive) {
        self.primitives.push(FramePrimitive::Line(line));
    }

    pub fn push_rect(&mut self, rect: RectPrimitive) {
        self.primitives.push(FramePrimitive::Rect(rect));
    }

    pub fn push_text(&mut self, text: TextPrimitive) {
        self.primitives.push(FramePrimitive::Text(text));
    }

    pub fn lines(&self) -> impl Iterator<Item = &LinePrimitive> + '_ {
        self.primitives.iter().filter_map(|primitive| match primitive {
            FramePrimitive::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &RectPrimitive> + '_ {
        self.primitives.iter().filter_map(|primitive| match primitive {
            FramePrimitive::Rect(rect) => Some(rect),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextPrimitive> + '_ {
        self.primitives.iter().filter_map(|primitive| match primitive {
            FramePrimitive::Text(text) => Some(text),
            _ => None,
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.background.validate()?;

        for primitive in &self.primitives {
            match primitive {
                FramePrimitive::Line(line) => line.validate()?,
                FramePrimitive::Rect(rect) => rect.validate()?,
                FramePrimitive::Text(text) => text.validate()?,
            }
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
