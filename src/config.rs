//! Chart configuration.
//!
//! Every field has a default matching the stock chart layout, so a YAML file
//! only needs the keys it wants to change.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{Rgba, ANOMALY_RAMP};
use crate::error::{Error, Result};

/// URL of the published global-temperature document.
pub const DEFAULT_DATA_URL: &str =
    "https://raw.githubusercontent.com/freeCodeCamp/ProjectReferenceData/master/global-temperature.json";

/// Space reserved around the plot area for axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    /// Top margin in pixels.
    pub top: f32,
    /// Right margin in pixels.
    pub right: f32,
    /// Bottom margin in pixels.
    pub bottom: f32,
    /// Left margin in pixels.
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 50.0,
            right: 20.0,
            bottom: 100.0,
            left: 100.0,
        }
    }
}

/// Layout, palette and data-location settings for one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Outer SVG width, margins included.
    pub width: f32,
    /// Outer SVG height, margins included.
    pub height: f32,
    /// Margins around the plot area.
    pub margin: Margin,
    /// Padding between bands, as a fraction of the band step.
    pub band_padding: f32,
    /// Only years divisible by this get an axis tick.
    pub year_tick_interval: i32,
    /// Total width of the legend strip.
    pub legend_width: f32,
    /// Height of the legend strip.
    pub legend_height: f32,
    /// Tooltip offset from the pointer.
    pub tooltip_offset: (f32, f32),
    /// Bucket colors, coolest first.
    pub palette: Vec<Rgba>,
    /// Where the HTTP source fetches the dataset from.
    pub data_url: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 500.0,
            margin: Margin::default(),
            band_padding: 0.05,
            year_tick_interval: 10,
            legend_width: 300.0,
            legend_height: 20.0,
            tooltip_offset: (10.0, -28.0),
            palette: ANOMALY_RAMP.to_vec(),
            data_url: DEFAULT_DATA_URL.to_string(),
        }
    }
}

impl ChartConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or the values are unusable.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values describe a drawable chart.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] when margins consume the whole
    /// area and [`Error::Config`] for other unusable values.
    pub fn validate(&self) -> Result<()> {
        let (width, height) = (self.plot_width(), self.plot_height());
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::InvalidDimensions { width, height });
        }
        if !(0.0..1.0).contains(&self.band_padding) {
            return Err(Error::Config(format!(
                "band_padding must be in [0, 1), got {}",
                self.band_padding
            )));
        }
        if self.year_tick_interval <= 0 {
            return Err(Error::Config("year_tick_interval must be positive".to_string()));
        }
        if !(self.legend_width > 0.0 && self.legend_height > 0.0) {
            return Err(Error::InvalidDimensions {
                width: self.legend_width,
                height: self.legend_height,
            });
        }
        if self.palette.is_empty() {
            return Err(Error::Config("palette must contain at least one color".to_string()));
        }
        Ok(())
    }

    /// Width of the drawable area inside the margins.
    #[must_use]
    pub fn plot_width(&self) -> f32 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the drawable area inside the margins.
    #[must_use]
    pub fn plot_height(&self) -> f32 {
        self.height - self.margin.top - self.margin.bottom
    }
}

impl batuta_common::display::WithDimensions for ChartConfig {
    fn set_dimensions(&mut self, width: u32, height: u32) {
        self.width = width as f32;
        self.height = height as f32;
    }
}
