//! The temperature-anomaly document and its records.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Full English month names, indexed by zero-based month.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Full name of a zero-based month index, `None` past December.
#[must_use]
pub fn month_name(index: u8) -> Option<&'static str> {
    MONTH_NAMES.get(usize::from(index)).copied()
}

/// One monthly observation: the deviation from the base temperature.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Calendar year.
    pub year: i32,
    /// Month, 1-based (1 = January).
    pub month: u8,
    /// Deviation from the base temperature in ℃.
    pub variance: f64,
}

impl Record {
    /// Create a new record.
    #[must_use]
    pub const fn new(year: i32, month: u8, variance: f64) -> Self {
        Self {
            year,
            month,
            variance,
        }
    }

    /// Zero-based month index (0 = January).
    #[must_use]
    pub const fn month_index(&self) -> u8 {
        self.month.saturating_sub(1)
    }

    /// Full month name ("January" for month 1).
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        month_name(self.month_index()).unwrap_or("Unknown")
    }
}

/// Wire shape of the published document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Document {
    base_temperature: f64,
    monthly_variance: Vec<Record>,
}

/// Base temperature plus its monthly records. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    base_temperature: f64,
    records: Vec<Record>,
}

impl Dataset {
    /// Build a dataset, rejecting records that cannot be placed on the grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] if there are no records or a month falls
    /// outside 1-12, and for a non-finite base temperature or variance.
    pub fn new(base_temperature: f64, records: Vec<Record>) -> Result<Self> {
        if !base_temperature.is_finite() {
            return Err(Error::Format(format!(
                "baseTemperature is not finite: {base_temperature}"
            )));
        }
        if records.is_empty() {
            return Err(Error::Format("monthlyVariance is empty".to_string()));
        }
        if let Some((i, r)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| !(1..=12).contains(&r.month))
        {
            return Err(Error::Format(format!(
                "monthlyVariance[{i}]: month {} out of range 1-12",
                r.month
            )));
        }
        if let Some((i, _)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| !r.variance.is_finite())
        {
            return Err(Error::Format(format!(
                "monthlyVariance[{i}]: variance is not finite"
            )));
        }

        Ok(Self {
            base_temperature,
            records,
        })
    }

    /// Parse the JSON document
    /// `{ "baseTemperature": n, "monthlyVariance": [{ "year", "month", "variance" }] }`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Format`] when the payload does not have that shape.
    pub fn from_json(json: &str) -> Result<Self> {
        let doc: Document = serde_json::from_str(json)?;
        Self::new(doc.base_temperature, doc.monthly_variance)
    }

    /// The reference temperature every variance is relative to.
    #[must_use]
    pub const fn base_temperature(&self) -> f64 {
        self.base_temperature
    }

    /// All records in document order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always false for a constructed dataset; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Absolute temperature of a record.
    #[must_use]
    pub fn temperature(&self, record: &Record) -> f64 {
        self.base_temperature + record.variance
    }

    /// Absolute temperatures in document order.
    #[must_use]
    pub fn temperatures(&self) -> Vec<f64> {
        self.records.iter().map(|r| self.temperature(r)).collect()
    }

    /// `(min, max)` of the absolute temperatures.
    #[must_use]
    pub fn temperature_extent(&self) -> (f64, f64) {
        self.records
            .iter()
            .map(|r| self.temperature(r))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), t| {
                (lo.min(t), hi.max(t))
            })
    }

    /// Distinct years, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.records.iter().map(|r| r.year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }
}
