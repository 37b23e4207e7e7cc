//! # Anomaly-Heatmap
//!
//! Calendar heatmap of monthly global land-surface temperature anomalies.
//!
//! The crate fetches the `{ baseTemperature, monthlyVariance }` document, derives
//! a year band scale, a month band scale and a five-color quantile scale, and
//! lays out one cell per month. Charts serialize to SVG and to an HTML host page
//! with `#heatmap`, `#legend` and `#tooltip` containers. Pointer events are
//! forwarded by the host as plain method calls.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use anomaly_heatmap::prelude::*;
//!
//! let source = HttpDataSource::published()?;
//! if let Some(chart) = try_load_chart(&source, ChartConfig::default()).await {
//!     HtmlExporter::new().write_to_file(&chart, "heatmap.html")?;
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `http` (default): fetch the dataset over HTTP(S) with reqwest
//! - `wasm`: JavaScript bindings (build with `--no-default-features --features wasm`)

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
// Allow unwrap() in tests only - banned in production code
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Core Modules
// ============================================================================

/// Color type and the anomaly ramp.
pub mod color;

/// Chart configuration (YAML-loadable).
pub mod config;

/// Geometric primitives (points, rectangles).
pub mod geometry;

/// Band and quantile scales.
pub mod scale;

// ============================================================================
// Data
// ============================================================================

/// Dataset model and data sources.
pub mod data;

// ============================================================================
// Visualization Modules
// ============================================================================

/// Heatmap chart and its components.
pub mod plots;

/// Output encoders (SVG, HTML).
pub mod output;

/// WebAssembly bindings for browser usage.
#[cfg(feature = "wasm")]
#[cfg_attr(docsrs, doc(cfg(feature = "wasm")))]
pub mod wasm;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for heatmap operations.
pub mod error;

pub use error::{Error, Result};
pub use plots::{load_chart, try_load_chart, HeatmapChart};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and traits for convenient imports.
///
/// ```rust,ignore
/// use anomaly_heatmap::prelude::*;
/// ```
pub mod prelude {
    pub use crate::color::{Rgba, ANOMALY_RAMP};
    pub use crate::config::{ChartConfig, Margin};
    #[cfg(not(target_arch = "wasm32"))]
    pub use crate::data::FileDataSource;
    #[cfg(feature = "http")]
    pub use crate::data::HttpDataSource;
    pub use crate::data::{DataSource, Dataset, Record, StaticDataSource};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Point, Rect};
    pub use crate::output::{HtmlExporter, SvgEncoder};
    pub use crate::plots::{load_chart, try_load_chart, HeatmapChart, TooltipController};
    pub use crate::scale::{BandScale, QuantileScale, Scale, ScaleSet};
    pub use batuta_common::display::WithDimensions;
}
