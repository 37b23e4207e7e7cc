//! Calendar heatmap of monthly temperature anomalies.
//!
//! [`HeatmapChart`] ties the pieces together: it derives the scales once from
//! an immutable [`Dataset`], lays out cells, axes and legend, owns the tooltip
//! and routes pointer events from the host to it.

use std::collections::HashMap;

use batuta_common::display::WithDimensions;
use tracing::{debug, info, warn};

use crate::color::Rgba;
use crate::config::ChartConfig;
use crate::data::{DataSource, Dataset};
use crate::error::Result;
use crate::geometry::Point;
use crate::output::{SvgElement, SvgEncoder};
use crate::scale::ScaleSet;

use super::axis::Axis;
use super::grid::{Cell, GridRenderer};
use super::legend::Legend;
use super::tooltip::TooltipController;

/// A fully laid-out heatmap plus its tooltip state.
#[derive(Debug, Clone)]
pub struct HeatmapChart {
    config: ChartConfig,
    dataset: Dataset,
    scales: ScaleSet,
    cells: Vec<Cell>,
    /// `(year, zero-based month)` to cell index, for hit testing.
    index: HashMap<(i32, u8), usize>,
    x_axis: Axis,
    y_axis: Axis,
    legend: Legend,
    tooltip: TooltipController,
}

impl HeatmapChart {
    /// Lay out the chart for `dataset`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable.
    pub fn from_dataset(dataset: Dataset, config: ChartConfig) -> Result<Self> {
        config.validate()?;

        let scales = ScaleSet::build(&dataset, &config)?;
        let cells = GridRenderer::cells(&dataset, &scales);
        let index = cells
            .iter()
            .enumerate()
            .map(|(i, c)| ((c.record.year, c.month_index()), i))
            .collect();

        let x_axis = Axis::years(&scales.year, config.year_tick_interval, config.plot_height());
        let y_axis = Axis::months(&scales.month);
        let legend = Legend::new(&scales.color, config.legend_width, config.legend_height);
        let tooltip = TooltipController::new(config.tooltip_offset);

        let (min, max) = scales.color.extent();
        debug!(
            years = scales.year.domain().len(),
            bandwidth = scales.year.bandwidth(),
            thresholds = ?scales.color.thresholds(),
            "Scales built"
        );
        info!(cells = cells.len(), min_temp = min, max_temp = max, "Heatmap laid out");

        Ok(Self {
            config,
            dataset,
            scales,
            cells,
            index,
            x_axis,
            y_axis,
            legend,
            tooltip,
        })
    }

    /// Fetch the dataset from `source` and lay out the chart.
    ///
    /// # Errors
    ///
    /// Propagates fetch errors ([`crate::Error::Network`], [`crate::Error::Format`])
    /// and layout errors.
    pub async fn load(source: &dyn DataSource, config: ChartConfig) -> Result<Self> {
        let dataset = source.fetch().await?;
        Self::from_dataset(dataset, config)
    }

    /// Lay the same dataset out again at a new outer size, margins unchanged.
    ///
    /// Tooltip state is not carried over.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidDimensions`] if the margins leave no plot area.
    pub fn resized(&self, width: u32, height: u32) -> Result<Self> {
        let mut config = self.config.clone();
        config.set_dimensions(width, height);
        Self::from_dataset(self.dataset.clone(), config)
    }

    /// The dataset the chart was built from.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Configuration in effect.
    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Derived scales.
    #[must_use]
    pub fn scales(&self) -> &ScaleSet {
        &self.scales
    }

    /// Cells in document order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Year axis.
    #[must_use]
    pub fn x_axis(&self) -> &Axis {
        &self.x_axis
    }

    /// Month axis.
    #[must_use]
    pub fn y_axis(&self) -> &Axis {
        &self.y_axis
    }

    /// Color legend.
    #[must_use]
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Tooltip state.
    #[must_use]
    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    /// Distinct colors actually used by cells.
    #[must_use]
    pub fn used_colors(&self) -> Vec<Rgba> {
        let mut colors: Vec<Rgba> = Vec::new();
        for cell in &self.cells {
            if !colors.contains(&cell.fill) {
                colors.push(cell.fill);
            }
        }
        colors
    }

    /// Index of the cell under a point given in plot-area coordinates.
    #[must_use]
    pub fn cell_at(&self, point: Point) -> Option<usize> {
        let year = self.scales.year.invert(point.x)?;
        let month = self.scales.month.invert(point.y)?;
        self.index.get(&(year, month)).copied()
    }

    /// Hover on cell `index` with the pointer at `pointer`. Returns false for an unknown index.
    pub fn hover(&mut self, index: usize, pointer: Point) -> bool {
        match self.cells.get(index) {
            Some(cell) => {
                cell.on_hover(&mut self.tooltip, pointer);
                true
            }
            None => {
                warn!(index, "Hover on unknown cell ignored");
                false
            }
        }
    }

    /// Pointer left the hovered cell.
    pub fn unhover(&mut self) {
        self.tooltip.hide();
    }

    /// Route a pointer position (SVG coordinates, margins included) to
    /// hover/unhover. Returns the hovered cell, if any.
    pub fn pointer_moved(&mut self, pointer: Point) -> Option<usize> {
        let plot = pointer.offset(-self.config.margin.left, -self.config.margin.top);
        match self.cell_at(plot) {
            Some(i) => {
                self.hover(i, pointer);
                Some(i)
            }
            None => {
                self.unhover();
                None
            }
        }
    }

    /// Pointer left the chart entirely.
    pub fn pointer_left(&mut self) {
        self.unhover();
    }

    /// `svg#heatmap`: plot group translated by the margins, holding the axes
    /// and cells.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let margin = self.config.margin;
        let plot = SvgElement::group()
            .translate(margin.left, margin.top)
            .child(self.x_axis.to_svg())
            .child(self.y_axis.to_svg())
            .children(self.cells.iter().map(Cell::to_svg));

        SvgEncoder::new(self.config.width, self.config.height)
            .attr("id", "heatmap")
            .element(plot)
    }

    /// Legend SVG, meant for the `#legend` container.
    #[must_use]
    pub fn legend_svg(&self) -> SvgEncoder {
        self.legend.to_svg()
    }
}

/// Fetch and lay out a chart.
///
/// # Errors
///
/// See [`HeatmapChart::load`].
pub async fn load_chart(source: &dyn DataSource, config: ChartConfig) -> Result<HeatmapChart> {
    HeatmapChart::load(source, config).await
}

/// Fetch and lay out a chart; any failure is logged and yields `None`, so
/// nothing is drawn rather than something partial.
pub async fn try_load_chart(source: &dyn DataSource, config: ChartConfig) -> Option<HeatmapChart> {
    match HeatmapChart::load(source, config).await {
        Ok(chart) => Some(chart),
        Err(e) => {
            warn!(source = %source.location(), error = %e, "Heatmap not rendered");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ANOMALY_RAMP;
    use crate::data::{Record, StaticDataSource};
    use crate::error::Error;

    fn chart(records: Vec<Record>) -> HeatmapChart {
        let ds = Dataset::new(8.0, records).unwrap();
        HeatmapChart::from_dataset(ds, ChartConfig::default()).unwrap()
    }

    fn sample() -> HeatmapChart {
        let records = (1990..2010)
            .flat_map(|y| (1..=12u8).map(move |m| Record::new(y, m, f64::from(y - 2000) * 0.1 + f64::from(m) * 0.01)))
            .collect();
        chart(records)
    }

    #[test]
    fn test_single_record_chart() {
        let chart = chart(vec![Record::new(1753, 1, -6.0)]);
        assert_eq!(chart.cells().len(), 1);
        assert_eq!(chart.used_colors(), vec![ANOMALY_RAMP[0]]);
        assert_eq!(chart.legend().swatches().len(), 5);
    }

    #[test]
    fn test_identical_temperatures_one_color() {
        let chart = chart(vec![
            Record::new(1900, 1, 0.5),
            Record::new(1900, 2, 0.5),
            Record::new(1901, 7, 0.5),
        ]);
        assert_eq!(chart.used_colors().len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let ds = Dataset::new(8.0, vec![Record::new(1753, 1, -6.0)]).unwrap();
        let config = ChartConfig {
            legend_width: 0.0,
            ..ChartConfig::default()
        };
        assert!(HeatmapChart::from_dataset(ds, config).is_err());
    }

    #[test]
    fn test_cell_at_hits_cell_centre() {
        let chart = sample();
        for (i, cell) in chart.cells().iter().enumerate().step_by(17) {
            let centre = Point::new(
                cell.bounds.x + cell.bounds.width / 2.0,
                cell.bounds.y + cell.bounds.height / 2.0,
            );
            assert_eq!(chart.cell_at(centre), Some(i));
        }
        assert_eq!(chart.cell_at(Point::new(-5.0, 10.0)), None);
    }

    #[test]
    fn test_pointer_routing() {
        let mut chart = sample();
        let margin = chart.config().margin;
        let cell = chart.cells()[0].clone();
        let pointer = Point::new(
            margin.left + cell.bounds.x + 1.0,
            margin.top + cell.bounds.y + 1.0,
        );

        assert_eq!(chart.pointer_moved(pointer), Some(0));
        assert!(chart.tooltip().is_visible());
        assert_eq!(chart.tooltip().shown_year(), Some(cell.record.year));

        // Over the left margin: nothing hovered.
        assert_eq!(chart.pointer_moved(Point::new(1.0, 1.0)), None);
        assert!(!chart.tooltip().is_visible());

        chart.pointer_moved(pointer);
        chart.pointer_left();
        assert!(!chart.tooltip().is_visible());
    }

    #[test]
    fn test_resized_relayout() {
        let chart = sample();
        let wide = chart.resized(2120, 500).unwrap();

        assert_eq!(wide.cells().len(), chart.cells().len());
        assert!((wide.config().plot_width() - 2000.0).abs() < f32::EPSILON);
        assert!(wide.scales().year.bandwidth() > chart.scales().year.bandwidth());
        assert_eq!(wide.scales().month, chart.scales().month);
        assert!(wide.to_svg().render().contains(r#"width="2120""#));

        assert!(matches!(
            chart.resized(100, 500),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_hover_unknown_index() {
        let mut chart = sample();
        assert!(!chart.hover(10_000, Point::ORIGIN));
        assert!(!chart.tooltip().is_visible());
    }

    #[test]
    fn test_svg_markup_contract() {
        let svg = sample().to_svg().render();
        assert!(svg.contains(r#"id="heatmap""#));
        assert!(svg.contains(r#"id="x-axis""#));
        assert!(svg.contains(r#"id="y-axis""#));
        assert_eq!(svg.matches(r#"class="cell""#).count(), 240);
        assert!(svg.contains(r#"transform="translate(100,50)""#));
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let source = StaticDataSource::new(
            r#"{"baseTemperature": 8.0, "monthlyVariance": [{"year": 2000, "month": 6, "variance": 1.5}]}"#,
        );
        let chart = load_chart(&source, ChartConfig::default()).await.unwrap();
        assert_eq!(chart.cells()[0].record, Record::new(2000, 6, 1.5));
    }

    #[tokio::test]
    async fn test_try_load_swallows_errors() {
        let source = StaticDataSource::new(r#"{"monthlyVariance": []}"#);
        assert!(try_load_chart(&source, ChartConfig::default()).await.is_none());

        let err = load_chart(&source, ChartConfig::default()).await.unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
}
