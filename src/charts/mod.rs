//! Charts module - Chart descriptions and rendering

mod plotter;
mod renderer;
mod spec;

pub use plotter::{series_color, ChartPlotter};
pub use renderer::{RenderError, StaticChartRenderer};
pub use spec::{dashboard_charts, ChartKind, ChartSpec, LabeledValue};
