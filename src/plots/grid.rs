//! Heatmap cells: one rectangle per record.

use crate::color::Rgba;
use crate::data::{Dataset, Record};
use crate::geometry::{Point, Rect};
use crate::output::SvgElement;
use crate::scale::ScaleSet;

use super::tooltip::TooltipController;

/// One drawn cell, in plot-area coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    /// Source record.
    pub record: Record,
    /// Absolute temperature (`base + variance`).
    pub temperature: f64,
    /// Position and size.
    pub bounds: Rect,
    /// Bucket color.
    pub fill: Rgba,
}

impl Cell {
    /// Zero-based month, as exposed in `data-month`.
    #[must_use]
    pub fn month_index(&self) -> u8 {
        self.record.month_index()
    }

    /// `<rect class="cell">` with `data-month`, `data-year` and `data-temp`.
    #[must_use]
    pub fn to_svg(&self) -> SvgElement {
        SvgElement::rect(
            self.bounds.x,
            self.bounds.y,
            self.bounds.width,
            self.bounds.height,
            self.fill,
        )
        .attr("class", "cell")
        .attr("data-month", self.month_index())
        .attr("data-year", self.record.year)
        .attr("data-temp", self.temperature)
    }

    /// Pointer entered the cell.
    pub fn on_hover(&self, tooltip: &mut TooltipController, pointer: Point) {
        tooltip.show(&self.record, self.temperature, pointer);
    }

    /// Pointer left the cell.
    pub fn on_unhover(&self, tooltip: &mut TooltipController) {
        tooltip.hide();
    }
}

/// Lays out the cell grid from the scales.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridRenderer;

impl GridRenderer {
    /// One cell per record, in document order.
    #[must_use]
    pub fn cells(dataset: &Dataset, scales: &ScaleSet) -> Vec<Cell> {
        let width = scales.year.bandwidth();
        let height = scales.month.bandwidth();

        dataset
            .records()
            .iter()
            .filter_map(|record| {
                let x = scales.year.position(record.year)?;
                let y = scales.month.position(record.month_index())?;
                let temperature = dataset.temperature(record);
                Some(Cell {
                    record: *record,
                    temperature,
                    bounds: Rect::new(x, y, width, height),
                    fill: scales.color.color_for(temperature),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ANOMALY_RAMP;
    use crate::config::ChartConfig;

    fn build(records: Vec<Record>) -> (Dataset, ScaleSet) {
        let ds = Dataset::new(8.0, records).unwrap();
        let scales = ScaleSet::build(&ds, &ChartConfig::default()).unwrap();
        (ds, scales)
    }

    #[test]
    fn test_single_record_cell() {
        let (ds, scales) = build(vec![Record::new(1753, 1, -6.0)]);
        let cells = GridRenderer::cells(&ds, &scales);

        assert_eq!(cells.len(), 1);
        let cell = &cells[0];
        assert_eq!(cell.bounds.x, scales.year.position(1753).unwrap());
        assert_eq!(cell.bounds.y, scales.month.position(0).unwrap());
        assert!((cell.temperature - 2.0).abs() < 1e-12);
        assert_eq!(cell.fill, ANOMALY_RAMP[0]);
    }

    #[test]
    fn test_cell_sizes_match_bandwidths() {
        let (ds, scales) = build(vec![
            Record::new(1900, 1, 0.0),
            Record::new(1900, 2, 1.0),
            Record::new(1901, 1, -1.0),
        ]);
        for cell in GridRenderer::cells(&ds, &scales) {
            assert_eq!(cell.bounds.width, scales.year.bandwidth());
            assert_eq!(cell.bounds.height, scales.month.bandwidth());
        }
    }

    #[test]
    fn test_cell_svg_attributes() {
        let (ds, scales) = build(vec![Record::new(2000, 6, 1.5)]);
        let el = GridRenderer::cells(&ds, &scales)[0].to_svg();

        assert_eq!(el.get_attr("class"), Some("cell"));
        assert_eq!(el.get_attr("data-month"), Some("5"));
        assert_eq!(el.get_attr("data-year"), Some("2000"));
        assert_eq!(el.get_attr("data-temp"), Some("9.5"));
    }

    #[test]
    fn test_hover_unhover() {
        let (ds, scales) = build(vec![Record::new(2000, 6, 1.5)]);
        let cells = GridRenderer::cells(&ds, &scales);
        let mut tooltip = TooltipController::default();

        cells[0].on_hover(&mut tooltip, Point::new(50.0, 60.0));
        assert!(tooltip.is_visible());
        assert!(tooltip.text().unwrap().contains("Temperature: 9.50℃"));

        cells[0].on_unhover(&mut tooltip);
        assert!(!tooltip.is_visible());
    }
}
