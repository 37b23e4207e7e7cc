//! Chart components.
//!
//! Cells, axes, legend and tooltip, composed by [`HeatmapChart`].

mod axis;
mod grid;
mod heatmap;
mod legend;
mod tooltip;

pub use axis::{Axis, AxisOrient, Tick};
pub use grid::{Cell, GridRenderer};
pub use heatmap::{load_chart, try_load_chart, HeatmapChart};
pub use legend::{Legend, Swatch, LEGEND_CAPTION};
pub use tooltip::{TooltipContent, TooltipController, DEFAULT_TOOLTIP_OFFSET};
