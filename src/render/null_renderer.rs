use crate::error::ChartResult;
use crate::render::{RenderFrame, Renderer};

/// Renderer that only validates and counts, for tests and headless use.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_line_count: usize,
    pub last_rect_count: usize,
    pub last_text_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_line_count = frame.lines().count();
        self.last_rect_count = frame.rects().count();
        self.last_text_count = frame.texts().count();
        Ok(())
    }
}
