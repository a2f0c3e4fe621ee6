//! Diagram renderers: pure mappings from energy series to canvas commands.

mod delta_bars;
mod label_format;
mod step_diagram;

pub use delta_bars::{
    DEFAULT_BAR_WIDTH, DEFAULT_LABEL_PADDING, DEFAULT_ZERO_LINE_WIDTH, DeltaBarOptions,
    render_delta_bars, render_delta_series,
};
pub use label_format::{LabelFormat, MAX_FORMAT_FIELD, format_value};
pub use step_diagram::{
    DEFAULT_PLATEAU_SCALE, DEFAULT_STEP_LINE_WIDTH, StepDiagramOptions, render_step_diagram,
    render_step_series,
};
