//! Scale functions for data-to-visual mappings.
//!
//! Two kinds are needed for the calendar heatmap:
//!
//! - [`BandScale`]: discrete categories (years, months) to equal-width slots.
//! - [`QuantileScale`]: continuous temperatures to a small color palette,
//!   split into equal-population buckets.
//!
//! Both are immutable value objects: everything is precomputed in the
//! constructor and lookups never mutate.

use crate::color::Rgba;
use crate::config::ChartConfig;
use crate::data::Dataset;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;
}

/// Band scale: each distinct domain value owns one equal-size slot.
///
/// Layout follows the usual band conventions with the same padding fraction
/// used inside and outside: `step = extent / (n + padding)`,
/// `bandwidth = step * (1 - padding)` and the first band starts at
/// `step * padding` so the outer gaps are split evenly.
#[derive(Debug, Clone, PartialEq)]
pub struct BandScale<T> {
    domain: Vec<T>,
    range: (f32, f32),
    padding: f32,
    start: f32,
    step: f32,
    bandwidth: f32,
}

impl<T: Copy + Ord> BandScale<T> {
    /// Create a band scale over the distinct values of `domain`, ascending.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] for an empty domain and
    /// [`Error::ScaleDomain`] for padding outside `[0, 1)` or an inverted range.
    pub fn new(domain: impl IntoIterator<Item = T>, range: (f32, f32), padding: f32) -> Result<Self> {
        let mut domain: Vec<T> = domain.into_iter().collect();
        domain.sort_unstable();
        domain.dedup();

        if domain.is_empty() {
            return Err(Error::EmptyData);
        }
        if !(0.0..1.0).contains(&padding) {
            return Err(Error::ScaleDomain(format!("Band padding must be in [0, 1), got {padding}")));
        }
        if !(range.1 > range.0) {
            return Err(Error::ScaleDomain(format!(
                "Band range must be increasing, got {}..{}",
                range.0, range.1
            )));
        }

        let n = domain.len() as f32;
        let step = (range.1 - range.0) / (n + padding).max(1.0);
        let start = range.0 + (range.1 - range.0 - step * (n - padding)) * 0.5;

        Ok(Self {
            domain,
            range,
            padding,
            start,
            step,
            bandwidth: step * (1.0 - padding),
        })
    }

    /// Offset of the band's leading edge, `None` for values outside the domain.
    #[must_use]
    pub fn position(&self, value: T) -> Option<f32> {
        self.index_of(value).map(|i| self.start + self.step * i as f32)
    }

    /// Index of `value` in the sorted domain.
    #[must_use]
    pub fn index_of(&self, value: T) -> Option<usize> {
        self.domain.binary_search(&value).ok()
    }

    /// Domain value whose band covers the pixel offset, if any.
    ///
    /// Offsets falling in the padding between bands return `None`.
    #[must_use]
    pub fn invert(&self, offset: f32) -> Option<T> {
        // f32 rounding between `position` and here, a few ulps of the offset
        let tolerance = 4.0 * f32::EPSILON * offset.abs().max(1.0);
        let rel = offset - self.start;
        if rel < -tolerance {
            return None;
        }
        let i = (rel.max(0.0) / self.step).floor() as usize;
        let within = rel - self.step * i as f32;
        if (-tolerance..self.bandwidth).contains(&within) {
            self.domain.get(i).copied()
        } else if self.step - within <= tolerance {
            // leading edge of the next band
            self.domain.get(i + 1).copied()
        } else {
            None
        }
    }

    /// Size of each band.
    #[must_use]
    pub fn bandwidth(&self) -> f32 {
        self.bandwidth
    }

    /// Distance between the leading edges of consecutive bands.
    #[must_use]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Padding fraction this scale was built with.
    #[must_use]
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Distinct domain values, ascending.
    #[must_use]
    pub fn domain(&self) -> &[T] {
        &self.domain
    }

    /// Pixel extent the bands are laid out in.
    #[must_use]
    pub fn range(&self) -> (f32, f32) {
        self.range
    }
}

impl BandScale<i32> {
    /// One band per distinct year in the dataset, across `[0, width]`.
    ///
    /// # Errors
    ///
    /// Propagates [`BandScale::new`] errors.
    pub fn years(dataset: &Dataset, width: f32, padding: f32) -> Result<Self> {
        Self::new(dataset.years(), (0.0, width), padding)
    }
}

impl BandScale<u8> {
    /// Fixed twelve-band scale for zero-based months, top to bottom across `[0, height]`.
    ///
    /// # Errors
    ///
    /// Propagates [`BandScale::new`] errors.
    pub fn months(height: f32, padding: f32) -> Result<Self> {
        Self::new(0..12u8, (0.0, height), padding)
    }
}

impl<T: Copy + Ord> Scale<T, Option<f32>> for BandScale<T> {
    fn scale(&self, value: T) -> Option<f32> {
        self.position(value)
    }
}

/// Quantile color scale: equal-population buckets mapped to palette colors.
///
/// Thresholds are the `k / n` quantiles of the observed values (linear
/// interpolation between order statistics). A value equal to a threshold
/// belongs to the lower bucket; the observed maximum always lands in the
/// top bucket unless every value is identical, in which case everything
/// falls into bucket 0.
#[derive(Debug, Clone, PartialEq)]
pub struct QuantileScale {
    colors: Vec<Rgba>,
    thresholds: Vec<f64>,
    min: f64,
    max: f64,
}

impl QuantileScale {
    /// Build the scale from observed values and an ascending palette.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyData`] when `values` is empty and
    /// [`Error::ScaleDomain`] for an empty palette or non-finite values.
    pub fn new(values: &[f64], colors: Vec<Rgba>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyData);
        }
        if colors.is_empty() {
            return Err(Error::ScaleDomain("Color scale requires at least one color".to_string()));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::ScaleDomain("Quantile scale values must be finite".to_string()));
        }

        let mut sorted = values.to_vec();
        sorted.sort_unstable_by(f64::total_cmp);

        let n = colors.len();
        let thresholds = (1..n)
            .map(|k| quantile_sorted(&sorted, k as f64 / n as f64))
            .collect();

        Ok(Self {
            colors,
            thresholds,
            min: sorted[0],
            max: sorted[sorted.len() - 1],
        })
    }

    /// Bucket index for a temperature.
    #[must_use]
    pub fn bucket(&self, value: f64) -> usize {
        if self.max > self.min && value >= self.max {
            return self.colors.len() - 1;
        }
        self.thresholds.iter().filter(|&&q| q < value).count()
    }

    /// Palette color for a temperature.
    #[must_use]
    pub fn color_for(&self, value: f64) -> Rgba {
        self.colors[self.bucket(value)]
    }

    /// Value range covered by a bucket: the first starts at the observed
    /// minimum, the last ends at the observed maximum.
    #[must_use]
    pub fn bucket_extent(&self, bucket: usize) -> Option<(f64, f64)> {
        if bucket >= self.colors.len() {
            return None;
        }
        let lo = if bucket == 0 { self.min } else { self.thresholds[bucket - 1] };
        let hi = if bucket + 1 == self.colors.len() { self.max } else { self.thresholds[bucket] };
        Some((lo, hi))
    }

    /// Interior breakpoints, ascending (`bucket_count() - 1` of them).
    #[must_use]
    pub fn thresholds(&self) -> &[f64] {
        &self.thresholds
    }

    /// Palette, coolest first.
    #[must_use]
    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// Number of buckets (one per color).
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.colors.len()
    }

    /// `(min, max)` of the values the scale was built from.
    #[must_use]
    pub fn extent(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

impl Scale<f64, Rgba> for QuantileScale {
    fn scale(&self, value: f64) -> Rgba {
        self.color_for(value)
    }
}

/// Quantile `p` of an ascending slice, interpolating between neighbours.
fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    match sorted.get(lo + 1) {
        Some(&next) => sorted[lo] + (h - lo as f64) * (next - sorted[lo]),
        None => sorted[lo],
    }
}

/// The three mappings a render needs, derived once from the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleSet {
    /// Year to horizontal offset.
    pub year: BandScale<i32>,
    /// Zero-based month to vertical offset.
    pub month: BandScale<u8>,
    /// Absolute temperature to bucket color.
    pub color: QuantileScale,
}

impl ScaleSet {
    /// Derive all scales for the plot area described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the plot area is degenerate or the palette is empty.
    pub fn build(dataset: &Dataset, config: &ChartConfig) -> Result<Self> {
        let (width, height) = (config.plot_width(), config.plot_height());
        if !(width > 0.0 && height > 0.0) {
            return Err(Error::InvalidDimensions { width, height });
        }

        Ok(Self {
            year: BandScale::years(dataset, width, config.band_padding)?,
            month: BandScale::months(height, config.band_padding)?,
            color: QuantileScale::new(&dataset.temperatures(), config.palette.clone())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ANOMALY_RAMP;
    use crate::data::Record;
    use approx::assert_relative_eq;

    fn ramp() -> Vec<Rgba> {
        ANOMALY_RAMP.to_vec()
    }

    #[test]
    fn test_band_layout() {
        let scale = BandScale::new([10, 20, 30, 40], (0.0, 82.0), 0.05).unwrap();
        // step = 82 / 4.05, first band starts after half the outer padding
        assert_relative_eq!(scale.step(), 82.0 / 4.05, epsilon = 1e-4);
        assert_relative_eq!(scale.bandwidth(), scale.step() * 0.95, epsilon = 1e-4);
        assert_relative_eq!(scale.position(10).unwrap(), scale.step() * 0.05, epsilon = 1e-4);
        let last = scale.position(40).unwrap() + scale.bandwidth();
        assert_relative_eq!(82.0 - last, scale.step() * 0.05, epsilon = 1e-3);
    }

    #[test]
    fn test_band_sorted_distinct() {
        let scale = BandScale::new([1900, 1850, 1900, 1875], (0.0, 100.0), 0.0).unwrap();
        assert_eq!(scale.domain(), &[1850, 1875, 1900]);
        assert!(scale.position(1850).unwrap() < scale.position(1875).unwrap());
        assert_eq!(scale.position(1999), None);
    }

    #[test]
    fn test_band_no_padding_tiles_range() {
        let scale = BandScale::new(0..4, (0.0, 100.0), 0.0).unwrap();
        assert_relative_eq!(scale.bandwidth(), 25.0);
        assert_relative_eq!(scale.position(3).unwrap(), 75.0);
    }

    #[test]
    fn test_band_single_value() {
        let scale = BandScale::new([1753], (0.0, 100.0), 0.05).unwrap();
        let x = scale.position(1753).unwrap();
        assert!(x >= 0.0);
        assert!(x + scale.bandwidth() <= 100.0);
    }

    #[test]
    fn test_band_invert() {
        let scale = BandScale::new(0..10u8, (0.0, 100.0), 0.1).unwrap();
        let x = scale.position(4).unwrap();
        assert_eq!(scale.invert(x), Some(4));
        assert_eq!(scale.invert(x + scale.bandwidth() * 0.5), Some(4));
        // padding gap after band 4
        assert_eq!(scale.invert(x + scale.bandwidth() + 0.001), None);
        assert_eq!(scale.invert(-1.0), None);
        assert_eq!(scale.invert(100.0), None);
    }

    #[test]
    fn test_band_invert_gap_before_band() {
        let scale = BandScale::new(0..10u8, (0.0, 100.0), 0.01).unwrap();
        let x = scale.position(5).unwrap();
        // just inside the gap ending at band 5
        assert_eq!(scale.invert(x - 5e-4), None);
        assert_eq!(scale.invert(x + 5e-4), Some(5));
        assert_eq!(scale.invert(x - scale.step() + scale.bandwidth() * 0.5), Some(4));
    }

    #[test]
    fn test_band_errors() {
        assert!(matches!(
            BandScale::<i32>::new([], (0.0, 10.0), 0.05),
            Err(Error::EmptyData)
        ));
        assert!(BandScale::new([1], (0.0, 10.0), 1.0).is_err());
        assert!(BandScale::new([1], (10.0, 0.0), 0.05).is_err());
    }

    #[test]
    fn test_month_scale_fixed_domain() {
        let scale = BandScale::months(350.0, 0.05).unwrap();
        assert_eq!(scale.domain(), &(0..12).collect::<Vec<u8>>()[..]);
        assert!(scale.position(12).is_none());
        assert!(scale.position(0).unwrap() < scale.position(11).unwrap());
    }

    #[test]
    fn test_quantile_thresholds() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let scale = QuantileScale::new(&values, ramp()).unwrap();
        // (n-1) * k/5 over 1..=10
        let expected = [2.8, 4.6, 6.4, 8.2];
        for (q, e) in scale.thresholds().iter().zip(expected) {
            assert_relative_eq!(*q, e, epsilon = 1e-9);
        }
        assert_eq!(scale.extent(), (1.0, 10.0));
    }

    #[test]
    fn test_quantile_equal_population() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let scale = QuantileScale::new(&values, ramp()).unwrap();
        let mut counts = [0usize; 5];
        for v in &values {
            counts[scale.bucket(*v)] += 1;
        }
        assert_eq!(counts, [20, 20, 20, 20, 20]);
    }

    #[test]
    fn test_quantile_boundary_goes_low() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let scale = QuantileScale::new(&values, ramp()).unwrap();
        // thresholds are 1, 2, 3, 4 exactly
        assert_relative_eq!(scale.thresholds()[0], 1.0);
        assert_eq!(scale.bucket(1.0), 0);
        assert_eq!(scale.bucket(1.0 + 1e-9), 1);
        assert_eq!(scale.bucket(4.0), 3);
        assert_eq!(scale.bucket(5.0), 4);
    }

    #[test]
    fn test_quantile_max_in_top_bucket() {
        // Top quantile coincides with the max: the max still gets the warm color.
        let values = [1.0, 2.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0, 3.0];
        let scale = QuantileScale::new(&values, ramp()).unwrap();
        assert_eq!(scale.color_for(3.0), ANOMALY_RAMP[4]);
        assert_eq!(scale.color_for(1.0), ANOMALY_RAMP[0]);
    }

    #[test]
    fn test_quantile_degenerate() {
        let scale = QuantileScale::new(&[2.0, 2.0, 2.0], ramp()).unwrap();
        assert_eq!(scale.bucket(2.0), 0);
        assert_eq!(scale.color_for(2.0), ANOMALY_RAMP[0]);
        assert!(scale.thresholds().iter().all(|&q| q == 2.0));
    }

    #[test]
    fn test_quantile_single_color() {
        let scale = QuantileScale::new(&[1.0, 5.0], vec![Rgba::BLACK]).unwrap();
        assert!(scale.thresholds().is_empty());
        assert_eq!(scale.color_for(1.0), Rgba::BLACK);
        assert_eq!(scale.color_for(5.0), Rgba::BLACK);
    }

    #[test]
    fn test_quantile_errors() {
        assert!(matches!(QuantileScale::new(&[], ramp()), Err(Error::EmptyData)));
        assert!(QuantileScale::new(&[1.0], vec![]).is_err());
        assert!(QuantileScale::new(&[1.0, f64::NAN], ramp()).is_err());
    }

    #[test]
    fn test_bucket_extent() {
        let values: Vec<f64> = (1..=10).map(f64::from).collect();
        let scale = QuantileScale::new(&values, ramp()).unwrap();
        assert_eq!(scale.bucket_extent(0).unwrap().0, 1.0);
        assert_eq!(scale.bucket_extent(4).unwrap().1, 10.0);
        let (lo, hi) = scale.bucket_extent(2).unwrap();
        assert_relative_eq!(lo, 4.6, epsilon = 1e-9);
        assert_relative_eq!(hi, 6.4, epsilon = 1e-9);
        assert!(scale.bucket_extent(5).is_none());
    }

    #[test]
    fn test_scale_trait() {
        let band = BandScale::new([1, 2], (0.0, 10.0), 0.0).unwrap();
        assert_eq!(Scale::scale(&band, 2), Some(5.0));
        let color = QuantileScale::new(&[0.0, 1.0], ramp()).unwrap();
        assert_eq!(Scale::scale(&color, 1.0), ANOMALY_RAMP[4]);
    }

    #[test]
    fn test_scale_set_single_record() {
        let ds = Dataset::new(8.0, vec![Record::new(1753, 1, -6.0)]).unwrap();
        let scales = ScaleSet::build(&ds, &ChartConfig::default()).unwrap();
        assert_eq!(scales.year.domain(), &[1753]);
        assert!(scales.year.position(1753).is_some());
        assert!(scales.month.position(0).is_some());
        assert_eq!(scales.color.color_for(2.0), ANOMALY_RAMP[0]);
    }

    #[test]
    fn test_scale_set_invalid_dimensions() {
        let ds = Dataset::new(8.0, vec![Record::new(1753, 1, -6.0)]).unwrap();
        let config = ChartConfig {
            width: 50.0,
            ..ChartConfig::default()
        };
        assert!(matches!(
            ScaleSet::build(&ds, &config),
            Err(Error::InvalidDimensions { .. })
        ));
    }
}

// ============================================================================
// Property-based tests with proptest
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::color::ANOMALY_RAMP;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(256))]

        /// Every year band sits inside the range and no two overlap.
        #[test]
        fn prop_year_bands_inside_and_disjoint(
            years in prop::collection::btree_set(1700i32..2100, 1..300),
            width in 100.0f32..4000.0,
        ) {
            let scale = BandScale::new(years.iter().copied(), (0.0, width), 0.05).unwrap();
            let mut prev_end = f32::NEG_INFINITY;
            for &year in &years {
                let x = scale.position(year).unwrap();
                prop_assert!(x >= 0.0 && x < width, "year {} at {} outside [0, {})", year, x, width);
                prop_assert!(x + scale.bandwidth() <= width + 1e-3);
                prop_assert!(x >= prev_end - 1e-3, "band for {} overlaps previous", year);
                prev_end = x + scale.bandwidth();
            }
        }

        /// Band edges and centres invert back to their own year.
        #[test]
        fn prop_year_invert_round_trips(
            years in prop::collection::btree_set(1700i32..2100, 1..300),
            width in 100.0f32..4000.0,
        ) {
            let scale = BandScale::new(years.iter().copied(), (0.0, width), 0.05).unwrap();
            for &year in &years {
                let x = scale.position(year).unwrap();
                prop_assert_eq!(scale.invert(x), Some(year));
                prop_assert_eq!(scale.invert(x + scale.bandwidth() * 0.5), Some(year));
            }
        }

        /// Month bands: exactly 0..=11, equal height, disjoint.
        #[test]
        fn prop_month_bands(height in 12.0f32..2000.0, padding in 0.0f32..0.5) {
            let scale = BandScale::months(height, padding).unwrap();
            prop_assert_eq!(scale.domain().len(), 12);
            let mut prev_end = f32::NEG_INFINITY;
            for m in 0..12u8 {
                let y = scale.position(m).unwrap();
                prop_assert!(y >= prev_end - 1e-3);
                prev_end = y + scale.bandwidth();
            }
            prop_assert!(scale.position(12).is_none());
        }

        /// Bucket index never decreases as temperature increases.
        #[test]
        fn prop_color_bucket_monotonic(
            values in prop::collection::vec(-20.0f64..40.0, 1..500),
            a in -25.0f64..45.0,
            b in -25.0f64..45.0,
        ) {
            let scale = QuantileScale::new(&values, ANOMALY_RAMP.to_vec()).unwrap();
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(scale.bucket(lo) <= scale.bucket(hi));
        }

        /// Every observed value lands in a bucket whose extent contains it.
        #[test]
        fn prop_bucket_extent_covers_value(values in prop::collection::vec(-20.0f64..40.0, 1..200)) {
            let scale = QuantileScale::new(&values, ANOMALY_RAMP.to_vec()).unwrap();
            for &v in &values {
                let (lo, hi) = scale.bucket_extent(scale.bucket(v)).unwrap();
                prop_assert!(lo <= v && v <= hi, "{} outside [{}, {}]", v, lo, hi);
            }
        }
    }
}
