//! Stock reaction-pathway figures: delta-E bars, step diagram, and step
//! diagram with a delta-E inset.

use serde::{Deserialize, Serialize};

use crate::api::{
    DeltaBarOptions, LabelFormat, StepDiagramOptions, render_delta_bars, render_step_diagram,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{AxesConfig, Figure, FigureConfig, LegendLocation, Tick};

pub const JOB_SCHEMA_VERSION: u32 = 1;

/// Position of the delta-E inset in fractions of the main axes.
pub const INSET_BOUNDS: [f64; 4] = [0.6, 0.7, 0.35, 0.25];

/// Input for the stock figures; loadable from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionFigureJob {
    pub schema_version: u32,
    pub energies: Vec<f64>,
    pub color: Color,
    pub label: String,
    pub energy_unit: String,
    pub zero_index: Option<usize>,
    pub figure: FigureConfig,
    pub bar_width: f64,
    pub label_padding: f64,
    pub label_format: LabelFormat,
}

impl Default for ReactionFigureJob {
    fn default() -> Self {
        Self {
            schema_version: JOB_SCHEMA_VERSION,
            energies: SAMPLE_ENERGIES.to_vec(),
            color: Color::RED,
            label: "Dummy Data".to_owned(),
            energy_unit: "eV".to_owned(),
            zero_index: Some(0),
            figure: FigureConfig::new(8.0, 6.0, 300.0),
            bar_width: 0.5,
            label_padding: 5.0,
            label_format: LabelFormat::default(),
        }
    }
}

impl ReactionFigureJob {
    pub fn from_json(raw: &str) -> ChartResult<Self> {
        let job: Self = serde_json::from_str(raw)
            .map_err(|err| ChartError::InvalidData(format!("failed to parse job json: {err}")))?;
        if job.schema_version != JOB_SCHEMA_VERSION {
            return Err(ChartError::InvalidData(format!(
                "unsupported job schema version: {}",
                job.schema_version
            )));
        }
        Ok(job)
    }

    fn step_options(&self) -> StepDiagramOptions {
        StepDiagramOptions {
            zero_index: self.zero_index,
            ..StepDiagramOptions::new(self.color, self.label.clone())
        }
    }

    fn delta_options(&self, annotate: bool) -> DeltaBarOptions {
        let options = DeltaBarOptions::new(self.color, self.label.clone())
            .with_bar_width(self.bar_width);
        if annotate {
            options.with_annotations(self.label_format.clone(), self.label_padding)
        } else {
            options
        }
    }
}

/// The seven-step dummy pathway used when no job file is given.
pub const SAMPLE_ENERGIES: [f64; 7] = [6.0, 5.5, 5.7, 5.0, 4.3, 3.4, 3.0];

/// Ticks `"1"`, `"2"`, ... under each step.
#[must_use]
pub fn step_ticks(steps: usize) -> Vec<Tick> {
    (1..=steps)
        .map(|step| Tick::new(step as f64, step.to_string()))
        .collect()
}

/// Ticks `"1-2"`, `"2-3"`, ... under each delta bar.
#[must_use]
pub fn transition_ticks(steps: usize) -> Vec<Tick> {
    (2..=steps)
        .map(|step| Tick::new(step as f64, format!("{}-{}", step - 1, step)))
        .collect()
}

/// Annotated delta-E bar chart.
pub fn delta_bar_figure(job: &ReactionFigureJob) -> ChartResult<Figure> {
    let mut figure = Figure::new(job.figure)?;
    let axes = figure.add_subplot(
        AxesConfig::default()
            .with_labels("Step", format!("\u{394}\u{394}E ({})", job.energy_unit))
            .with_x_ticks(transition_ticks(job.energies.len()))
            .with_font_sizes(14.0, 16.0)
            .with_legend(LegendLocation::LowerLeft, 14.0),
    )?;
    render_delta_bars(figure.canvas(axes)?, &job.energies, &job.delta_options(true))?;
    Ok(figure)
}

/// Standard reaction-coordinate diagram.
pub fn step_figure(job: &ReactionFigureJob) -> ChartResult<Figure> {
    let mut figure = Figure::new(job.figure)?;
    let axes = figure.add_subplot(step_axes_config(job))?;
    render_step_diagram(figure.canvas(axes)?, &job.energies, &job.step_options())?;
    Ok(figure)
}

/// Reaction-coordinate diagram with an un-annotated delta-E inset.
pub fn step_with_inset_figure(job: &ReactionFigureJob) -> ChartResult<Figure> {
    let mut figure = Figure::new(job.figure)?;
    let main = figure.add_subplot(step_axes_config(job))?;
    render_step_diagram(figure.canvas(main)?, &job.energies, &job.step_options())?;

    let inset = figure.add_inset(
        main,
        INSET_BOUNDS,
        AxesConfig::default()
            .with_labels("Step", format!("\u{394}\u{394}E ({})", job.energy_unit))
            .with_x_ticks(transition_ticks(job.energies.len()))
            .with_y_bins(6)
            .with_font_sizes(12.0, 12.0),
    )?;
    render_delta_bars(figure.canvas(inset)?, &job.energies, &job.delta_options(false))?;
    Ok(figure)
}

fn step_axes_config(job: &ReactionFigureJob) -> AxesConfig {
    AxesConfig::default()
        .with_labels("Reaction Coordinate", format!("E ({})", job.energy_unit))
        .with_x_ticks(step_ticks(job.energies.len()))
        .with_font_sizes(14.0, 16.0)
        .with_legend(LegendLocation::LowerLeft, 14.0)
}
