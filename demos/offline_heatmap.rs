#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Render a heatmap from a local copy of the dataset, then simulate a hover.
//!
//! Run with: `cargo run --example offline_heatmap -- global-temperature.json`
//!
//! Without an argument a small synthetic dataset is used.

use anomaly_heatmap::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

fn synthetic() -> String {
    let records: Vec<String> = (1900..1960)
        .flat_map(|year| {
            (1..=12).map(move |month| {
                let variance = f64::from(year - 1930) * 0.02 + f64::from(month % 5) * 0.1 - 0.2;
                format!(r#"{{"year":{year},"month":{month},"variance":{variance:.3}}}"#)
            })
        })
        .collect();
    format!(r#"{{"baseTemperature":8.66,"monthlyVariance":[{}]}}"#, records.join(","))
}

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    let source: Box<dyn DataSource> = match std::env::args().nth(1) {
        Some(path) => Box::new(FileDataSource::new(path)),
        None => Box::new(StaticDataSource::new(synthetic())),
    };

    let mut chart = load_chart(source.as_ref(), ChartConfig::default())
        .await
        .expect("Failed to build chart");

    // Hover the first cell as a browser would.
    let margin = chart.config().margin;
    let bounds = chart.cells()[0].bounds;
    chart.pointer_moved(Point::new(
        margin.left + bounds.x + bounds.width / 2.0,
        margin.top + bounds.y + bounds.height / 2.0,
    ));
    if let Some(text) = chart.tooltip().text() {
        println!("Tooltip:\n{text}\n");
    }
    chart.pointer_left();

    for swatch in chart.legend().swatches() {
        println!("{} {:>7.2} .. {:>7.2}  ({:.1}px)", swatch.color, swatch.lower, swatch.upper, swatch.width);
    }

    HtmlExporter::new()
        .write_to_file(&chart, "heatmap_offline.html")
        .expect("Failed to write HTML");
    println!("\nSaved: heatmap_offline.html");
}
