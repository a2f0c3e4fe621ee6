use tracing::trace;

use crate::core::DataBounds;
use crate::error::ChartResult;
use crate::render::{
    BarLabel, BarPrimitive, Canvas, DrawCommand, HorizontalRule, LegendEntry, LineRole,
    LineSegment,
};

/// Canvas that validates and stores every command in issue order.
///
/// Used as the per-axes scene store by `figure::Axes` and as the
/// inspection surface in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn lines(&self) -> impl Iterator<Item = &LineSegment> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Line(line) => Some(line),
            _ => None,
        })
    }

    pub fn lines_with_role(&self, role: LineRole) -> impl Iterator<Item = &LineSegment> + '_ {
        self.lines().filter(move |line| line.role == role)
    }

    pub fn bars(&self) -> impl Iterator<Item = &BarPrimitive> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Bar(bar) => Some(bar),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &BarLabel> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Label(label) => Some(label),
            _ => None,
        })
    }

    pub fn horizontal_rules(&self) -> impl Iterator<Item = &HorizontalRule> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::HorizontalRule(rule) => Some(rule),
            _ => None,
        })
    }

    pub fn legend_entries(&self) -> impl Iterator<Item = &LegendEntry> + '_ {
        self.commands.iter().filter_map(|command| match command {
            DrawCommand::Legend(entry) => Some(entry),
            _ => None,
        })
    }

    /// Extent of the recorded geometry. Bars always include their zero
    /// baseline; rules only contribute their height; labels and legend
    /// entries contribute nothing.
    #[must_use]
    pub fn data_bounds(&self) -> DataBounds {
        let mut bounds = DataBounds::default();
        for command in &self.commands {
            match command {
                DrawCommand::Line(line) => {
                    bounds.include_point(line.x1, line.y1);
                    bounds.include_point(line.x2, line.y2);
                }
                DrawCommand::HorizontalRule(rule) => bounds.include_y(rule.y),
                DrawCommand::Bar(bar) => {
                    bounds.include_x(bar.x_left());
                    bounds.include_x(bar.x_right());
                    bounds.include_y(0.0);
                    bounds.include_y(bar.height);
                }
                DrawCommand::Label(_) | DrawCommand::Legend(_) => {}
            }
        }
        bounds
    }

    fn push(&mut self, command: DrawCommand) {
        trace!(index = self.commands.len(), ?command, "record draw command");
        self.commands.push(command);
    }
}

impl Canvas for RecordingCanvas {
    fn draw_line(&mut self, line: LineSegment) -> ChartResult<()> {
        line.validate()?;
        self.push(DrawCommand::Line(line));
        Ok(())
    }

    fn draw_horizontal_rule(&mut self, rule: HorizontalRule) -> ChartResult<()> {
        rule.validate()?;
        self.push(DrawCommand::HorizontalRule(rule));
        Ok(())
    }

    fn draw_bar(&mut self, bar: BarPrimitive) -> ChartResult<()> {
        bar.validate()?;
        self.push(DrawCommand::Bar(bar));
        Ok(())
    }

    fn draw_label(&mut self, label: BarLabel) -> ChartResult<()> {
        label.validate()?;
        self.push(DrawCommand::Label(label));
        Ok(())
    }

    fn register_legend_entry(&mut self, entry: LegendEntry) -> ChartResult<()> {
        entry.validate()?;
        self.push(DrawCommand::Legend(entry));
        Ok(())
    }
}
