//! HTML host markup for a [`HeatmapChart`].
//!
//! Emits the containers a browser page needs: `#heatmap` (chart SVG),
//! `#legend` (wrapping the legend SVG) and `#tooltip`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use super::svg::escape;
use crate::error::Result;
use crate::plots::HeatmapChart;

const DEFAULT_TITLE: &str = "Monthly Global Land-Surface Temperature";

const STYLE: &str = "\
#container{font-family:sans-serif;text-align:center}\
.cell:hover{stroke:#000;stroke-width:1}\
#tooltip{position:absolute;padding:6px;font-size:12px;background:rgba(255,255,255,0.9);\
border:1px solid #999;border-radius:4px;pointer-events:none;text-align:left}";

/// Builds an HTML fragment or standalone page around a chart.
#[derive(Debug, Clone)]
pub struct HtmlExporter {
    title: String,
    description: Option<String>,
}

impl Default for HtmlExporter {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlExporter {
    /// Exporter with the default heading and a description derived from the data.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            description: None,
        }
    }

    /// Set the `h1#title` text.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Override the `p#description` text.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Year span and base temperature, e.g. `1753 - 2015: base temperature 8.66℃`.
    fn describe(chart: &HeatmapChart) -> String {
        let years = chart.dataset().years();
        let base = chart.dataset().base_temperature();
        match (years.first(), years.last()) {
            (Some(first), Some(last)) => format!("{first} - {last}: base temperature {base}℃"),
            _ => format!("base temperature {base}℃"),
        }
    }

    /// `div#container` holding heading, chart, legend and tooltip.
    #[must_use]
    pub fn fragment(&self, chart: &HeatmapChart) -> String {
        let description = self
            .description
            .clone()
            .unwrap_or_else(|| Self::describe(chart));

        let mut html = String::with_capacity(64 * 1024);
        html.push_str("<div id=\"container\">\n");
        html.push_str(&format!("<h1 id=\"title\">{}</h1>\n", escape(&self.title)));
        html.push_str(&format!(
            "<p id=\"description\">{}</p>\n",
            escape(&description)
        ));
        html.push_str(&chart.to_svg().render());
        html.push_str("<div id=\"legend\">\n");
        html.push_str(&chart.legend_svg().render());
        html.push_str("</div>\n");
        html.push_str(&chart.tooltip().to_html());
        html.push_str("\n</div>\n");
        html
    }

    /// Standalone HTML5 document.
    #[must_use]
    pub fn page(&self, chart: &HeatmapChart) -> String {
        format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
             <title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
            escape(&self.title),
            self.fragment(chart)
        )
    }

    /// Write the standalone page to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, chart: &HeatmapChart, path: P) -> Result<()> {
        let page = self.page(chart);
        let mut file = File::create(path.as_ref())?;
        file.write_all(page.as_bytes())?;
        info!(path = %path.as_ref().display(), bytes = page.len(), "Heatmap page written");
        Ok(())
    }
}
