//! WebAssembly bindings for the heatmap.
//!
//! The page fetches the JSON itself and hands it over; the view owns the
//! laid-out chart and answers pointer events with fresh tooltip markup.
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { HeatmapView } from 'anomaly-heatmap';
//!
//! await init();
//!
//! const json = await (await fetch(url)).text();
//! const view = HeatmapView.fromJson(json);
//! document.getElementById('chart').innerHTML = view.svg();
//! document.getElementById('legend').innerHTML = view.legendSvg();
//!
//! chart.addEventListener('mousemove', (e) => {
//!     view.pointerMove(e.offsetX, e.offsetY);
//!     tooltipHost.innerHTML = view.tooltipHtml();
//! });
//! ```

use wasm_bindgen::prelude::*;

use crate::config::ChartConfig;
use crate::data::Dataset;
use crate::geometry::Point;
use crate::plots::HeatmapChart;

fn to_js(e: &crate::Error) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// A laid-out heatmap held on the Rust side.
#[wasm_bindgen]
#[derive(Debug)]
pub struct HeatmapView {
    chart: HeatmapChart,
}

#[wasm_bindgen]
impl HeatmapView {
    /// Build a view from the dataset JSON, with default layout.
    #[wasm_bindgen(js_name = fromJson)]
    pub fn from_json(json: &str) -> Result<HeatmapView, JsValue> {
        Self::with_config(json, None)
    }

    /// Build a view from the dataset JSON and a YAML layout config.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str, config_yaml: Option<String>) -> Result<HeatmapView, JsValue> {
        let config = match config_yaml {
            Some(yaml) => ChartConfig::parse(&yaml).map_err(|e| to_js(&e))?,
            None => ChartConfig::default(),
        };
        let dataset = Dataset::from_json(json).map_err(|e| to_js(&e))?;
        let chart = HeatmapChart::from_dataset(dataset, config).map_err(|e| to_js(&e))?;
        Ok(Self { chart })
    }

    /// `svg#heatmap` markup.
    #[wasm_bindgen]
    pub fn svg(&self) -> String {
        self.chart.to_svg().render()
    }

    /// Legend SVG markup, for the `#legend` container.
    #[wasm_bindgen(js_name = legendSvg)]
    pub fn legend_svg(&self) -> String {
        self.chart.legend_svg().render()
    }

    /// Pointer moved to `(x, y)` in chart SVG coordinates. Returns whether a cell is hovered.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        self.chart.pointer_moved(Point::new(x, y)).is_some()
    }

    /// Pointer left the chart.
    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&mut self) {
        self.chart.pointer_left();
    }

    /// Current `div#tooltip` markup.
    #[wasm_bindgen(js_name = tooltipHtml)]
    pub fn tooltip_html(&self) -> String {
        self.chart.tooltip().to_html()
    }

    /// Re-lay the chart out at a new outer size (e.g. on container resize).
    #[wasm_bindgen]
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), JsValue> {
        self.chart = self.chart.resized(width, height).map_err(|e| to_js(&e))?;
        Ok(())
    }

    /// Number of cells drawn.
    #[wasm_bindgen(js_name = cellCount)]
    pub fn cell_count(&self) -> usize {
        self.chart.cells().len()
    }
}
