//! Error types for anomaly-heatmap operations.

use std::io;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading the dataset or building the chart.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport failure while fetching the dataset (connection, HTTP status, body).
    #[error("Network error: {0}")]
    Network(String),

    /// The payload does not have the expected document shape.
    #[error("Format error: {0}")]
    Format(String),

    /// I/O error (local dataset files, output files).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Chart configuration could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// Plot area collapses to nothing once margins are removed.
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions {
        /// Width value.
        width: f32,
        /// Height value.
        height: f32,
    },

    /// Empty data provided where non-empty is required.
    #[error("Empty data provided")]
    EmptyData,

    /// Scale domain error (e.g., no colors to map onto).
    #[error("Scale domain error: {0}")]
    ScaleDomain(String),

    /// Color parsing error.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Format(err.to_string())
    }
}

impl From<serde_yaml_ng::Error> for Error {
    fn from(err: serde_yaml_ng::Error) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl Error {
    /// Whether this error came from the fetch transport rather than the payload.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    /// Whether this error means the payload had the wrong shape.
    #[must_use]
    pub const fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}
