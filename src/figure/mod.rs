//! Figure composition: one or more axes (including insets) laid out on a
//! fixed-size page and flattened into a pixel `RenderFrame`.
//!
//! Each axes owns a [`RecordingCanvas`]; pass it to the diagram renderers,
//! then call [`Figure::layout`] or [`Figure::render`].

mod layout;
pub mod reaction;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{PixelRect, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::render::{RecordingCanvas, RenderFrame, Renderer};

pub use layout::POINTS_PER_INCH;
pub use reaction::{
    ReactionFigureJob, delta_bar_figure, step_figure, step_with_inset_figure,
};

/// Page size and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: 8.0,
            height_in: 6.0,
            dpi: 100.0,
        }
    }
}

impl FigureConfig {
    #[must_use]
    pub fn new(width_in: f64, height_in: f64, dpi: f64) -> Self {
        Self {
            width_in,
            height_in,
            dpi,
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("width_in", self.width_in),
            ("height_in", self.height_in),
            ("dpi", self.dpi),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::option(
                    name,
                    format!("must be finite and > 0, got {value}"),
                ));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            (self.width_in * self.dpi).round() as u32,
            (self.height_in * self.dpi).round() as u32,
        )
    }

    /// Device pixels per typographic point.
    #[must_use]
    pub fn pixels_per_point(&self) -> f64 {
        self.dpi / POINTS_PER_INCH
    }
}

/// Corner of the axes where the legend is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegendLocation {
    LowerLeft,
    LowerRight,
    UpperLeft,
    UpperRight,
}

/// Explicit tick position with its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

impl Tick {
    #[must_use]
    pub fn new(position: f64, label: impl Into<String>) -> Self {
        Self {
            position,
            label: label.into(),
        }
    }
}

/// Decorations and scaling policy of one axes. Sizes are in points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxesConfig {
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Fixed x ticks; automatic when `None`.
    pub x_ticks: Option<Vec<Tick>>,
    pub x_bins: usize,
    pub y_bins: usize,
    pub x_limits: Option<[f64; 2]>,
    pub y_limits: Option<[f64; 2]>,
    /// Fraction of the data span added on each side when autoscaling.
    pub margin: f64,
    pub tick_font_size: f64,
    pub label_font_size: f64,
    pub annotation_font_size: f64,
    pub legend: Option<LegendLocation>,
    pub legend_font_size: f64,
}

impl Default for AxesConfig {
    fn default() -> Self {
        Self {
            x_label: None,
            y_label: None,
            x_ticks: None,
            x_bins: 8,
            y_bins: 8,
            x_limits: None,
            y_limits: None,
            margin: 0.05,
            tick_font_size: 10.0,
            label_font_size: 10.0,
            annotation_font_size: 10.0,
            legend: None,
            legend_font_size: 10.0,
        }
    }
}

impl AxesConfig {
    #[must_use]
    pub fn with_labels(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = Some(x_label.into());
        self.y_label = Some(y_label.into());
        self
    }

    #[must_use]
    pub fn with_x_ticks(mut self, ticks: Vec<Tick>) -> Self {
        self.x_ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn with_y_bins(mut self, y_bins: usize) -> Self {
        self.y_bins = y_bins;
        self
    }

    #[must_use]
    pub fn with_font_sizes(mut self, tick_font_size: f64, label_font_size: f64) -> Self {
        self.tick_font_size = tick_font_size;
        self.label_font_size = label_font_size;
        self
    }

    #[must_use]
    pub fn with_legend(mut self, location: LegendLocation, font_size: f64) -> Self {
        self.legend = Some(location);
        self.legend_font_size = font_size;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.x_bins == 0 || self.y_bins == 0 {
            return Err(ChartError::option("bins", "tick bins must be > 0"));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(ChartError::option("margin", "must be finite and >= 0"));
        }
        for (name, value) in [
            ("tick_font_size", self.tick_font_size),
            ("label_font_size", self.label_font_size),
            ("annotation_font_size", self.annotation_font_size),
            ("legend_font_size", self.legend_font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::option(
                    name,
                    format!("must be finite and > 0, got {value}"),
                ));
            }
        }
        for (name, limits) in [("x_limits", self.x_limits), ("y_limits", self.y_limits)] {
            if let Some([low, high]) = limits {
                if !low.is_finite() || !high.is_finite() || low >= high {
                    return Err(ChartError::option(
                        name,
                        format!("need finite low < high, got [{low}, {high}]"),
                    ));
                }
            }
        }
        if let Some(ticks) = &self.x_ticks {
            if ticks.iter().any(|tick| !tick.position.is_finite()) {
                return Err(ChartError::option("x_ticks", "tick positions must be finite"));
            }
        }
        Ok(())
    }
}

/// Handle to an axes inside its [`Figure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AxesId(usize);

#[derive(Debug, Clone, Copy, PartialEq)]
enum Placement {
    /// `[left, bottom, width, height]` in figure fractions.
    Figure([f64; 4]),
    /// Same layout, in fractions of the parent axes.
    Inset { parent: usize, bounds: [f64; 4] },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    config: AxesConfig,
    placement: Placement,
    canvas: RecordingCanvas,
}

impl Axes {
    #[must_use]
    pub fn config(&self) -> &AxesConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut AxesConfig {
        &mut self.config
    }

    #[must_use]
    pub fn canvas(&self) -> &RecordingCanvas {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut RecordingCanvas {
        &mut self.canvas
    }
}

/// Default single-axes placement leaving room for tick and axis labels.
pub const DEFAULT_AXES_BOUNDS: [f64; 4] = [0.11, 0.11, 0.86, 0.86];

#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    config: FigureConfig,
    axes: Vec<Axes>,
}

impl Figure {
    pub fn new(config: FigureConfig) -> ChartResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            axes: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> FigureConfig {
        self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport()
    }

    /// Adds an axes at `[left, bottom, width, height]` figure fractions.
    pub fn add_axes(&mut self, bounds: [f64; 4], config: AxesConfig) -> ChartResult<AxesId> {
        validate_bounds(bounds)?;
        config.validate()?;
        self.axes.push(Axes {
            config,
            placement: Placement::Figure(bounds),
            canvas: RecordingCanvas::new(),
        });
        Ok(AxesId(self.axes.len() - 1))
    }

    /// Adds an axes filling [`DEFAULT_AXES_BOUNDS`].
    pub fn add_subplot(&mut self, config: AxesConfig) -> ChartResult<AxesId> {
        self.add_axes(DEFAULT_AXES_BOUNDS, config)
    }

    /// Adds an axes placed in fractions of `parent`'s plot area. It paints
    /// after (on top of) its parent.
    pub fn add_inset(
        &mut self,
        parent: AxesId,
        bounds: [f64; 4],
        config: AxesConfig,
    ) -> ChartResult<AxesId> {
        self.axes(parent)?;
        validate_bounds(bounds)?;
        config.validate()?;
        self.axes.push(Axes {
            config,
            placement: Placement::Inset {
                parent: parent.0,
                bounds,
            },
            canvas: RecordingCanvas::new(),
        });
        Ok(AxesId(self.axes.len() - 1))
    }

    pub fn axes(&self, id: AxesId) -> ChartResult<&Axes> {
        self.axes
            .get(id.0)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown axes id {}", id.0)))
    }

    pub fn axes_mut(&mut self, id: AxesId) -> ChartResult<&mut Axes> {
        self.axes
            .get_mut(id.0)
            .ok_or_else(|| ChartError::InvalidData(format!("unknown axes id {}", id.0)))
    }

    /// Drawing surface of one axes, for the diagram renderers.
    pub fn canvas(&mut self, id: AxesId) -> ChartResult<&mut RecordingCanvas> {
        Ok(self.axes_mut(id)?.canvas_mut())
    }

    /// Pixel rectangle of an axes' plot area.
    pub fn axes_rect(&self, id: AxesId) -> ChartResult<PixelRect> {
        self.axes(id)?;
        let viewport = self.viewport();
        let page = PixelRect::new(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
        );
        Ok(self.resolve_rect(id.0, page))
    }

    fn resolve_rect(&self, index: usize, page: PixelRect) -> PixelRect {
        match self.axes[index].placement {
            Placement::Figure(bounds) => page.fraction(bounds),
            Placement::Inset { parent, bounds } => {
                self.resolve_rect(parent, page).fraction(bounds)
            }
        }
    }

    /// Lays out every axes, in insertion order, into one pixel frame.
    pub fn layout(&self) -> ChartResult<RenderFrame> {
        let viewport = self.viewport();
        let mut frame = RenderFrame::new(viewport);
        let page = PixelRect::new(
            0.0,
            0.0,
            f64::from(viewport.width),
            f64::from(viewport.height),
        );
        let px_per_pt = self.config.pixels_per_point();

        for (index, axes) in self.axes.iter().enumerate() {
            let rect = self.resolve_rect(index, page);
            layout::layout_axes(axes, rect, px_per_pt, &mut frame)?;
        }

        frame.validate()?;
        debug!(
            axes = self.axes.len(),
            primitives = frame.primitives.len(),
            width = viewport.width,
            height = viewport.height,
            "laid out figure"
        );
        Ok(frame)
    }

    /// Lays out the figure and hands the frame to `renderer`.
    pub fn render<R: Renderer + ?Sized>(&self, renderer: &mut R) -> ChartResult<RenderFrame> {
        let frame = self.layout()?;
        renderer.render(&frame)?;
        Ok(frame)
    }
}

fn validate_bounds(bounds: [f64; 4]) -> ChartResult<()> {
    let [_, _, width, height] = bounds;
    if bounds.iter().any(|value| !value.is_finite()) || width <= 0.0 || height <= 0.0 {
        return Err(ChartError::option(
            "bounds",
            format!("need finite [left, bottom, width > 0, height > 0], got {bounds:?}"),
        ));
    }
    Ok(())
}
