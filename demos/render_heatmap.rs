#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Fetch the global temperature dataset and write `heatmap.html`.
//!
//! Run with: `cargo run --example render_heatmap`
//!
//! Set `RUST_LOG=anomaly_heatmap=debug` to see scale details. An optional
//! first argument points at a YAML chart config.

use anomaly_heatmap::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ChartConfig::load(path).expect("Failed to load chart config"),
        None => ChartConfig::default(),
    };

    let source = HttpDataSource::new(config.data_url.clone()).expect("Failed to create HTTP client");
    let Some(chart) = try_load_chart(&source, config).await else {
        eprintln!("No chart rendered; see the log for the cause.");
        std::process::exit(1);
    };

    println!(
        "Loaded {} records, {} years, temperatures {:.2}..{:.2}℃",
        chart.dataset().len(),
        chart.scales().year.domain().len(),
        chart.scales().color.extent().0,
        chart.scales().color.extent().1,
    );

    HtmlExporter::new()
        .write_to_file(&chart, "heatmap.html")
        .expect("Failed to write HTML");
    chart.to_svg().write_to_file("heatmap.svg").expect("Failed to write SVG");
    println!("Saved: heatmap.html, heatmap.svg");
}
