//! rxn-coords: reaction-coordinate energy diagrams and energy-difference
//! bar charts.
//!
//! The two renderers in [`api`] turn an energy series into data-space draw
//! commands on any [`render::Canvas`]. [`figure`] supplies a ready-made
//! canvas per axes plus the page layout, and the optional Cairo backend
//! rasterizes the result.

pub mod api;
pub mod core;
pub mod error;
pub mod figure;
pub mod render;
pub mod telemetry;

pub use api::{DeltaBarOptions, StepDiagramOptions, render_delta_bars, render_step_diagram};
pub use error::{ChartError, ChartResult};
