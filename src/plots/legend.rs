//! Color legend: one swatch per quantile bucket.
//!
//! Swatch widths follow each bucket's value span. Quantile breakpoints can
//! coincide (clustered or constant data), so every swatch first gets a fixed
//! floor and only the remainder is shared out by span.

use crate::color::Rgba;
use crate::output::{SvgElement, SvgEncoder, TextAnchor};
use crate::scale::QuantileScale;

/// Share of the legend width every swatch is guaranteed.
const MIN_SWATCH_FRACTION: f32 = 0.04;
const CAPTION_HEIGHT: f32 = 20.0;
const LABEL_HEIGHT: f32 = 16.0;
const FONT_SIZE: f32 = 10.0;

/// Caption centred above the strip.
pub const LEGEND_CAPTION: &str = "Temperature (℃)";

/// One bucket in the legend strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    /// Lowest temperature in the bucket.
    pub lower: f64,
    /// Highest temperature in the bucket.
    pub upper: f64,
    /// Bucket color.
    pub color: Rgba,
    /// Left edge within the strip.
    pub x: f32,
    /// Width within the strip.
    pub width: f32,
}

/// Horizontal strip of swatches with a caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    swatches: Vec<Swatch>,
    width: f32,
    height: f32,
}

impl Legend {
    /// Lay out one swatch per bucket of `scale` across `width`.
    #[must_use]
    pub fn new(scale: &QuantileScale, width: f32, height: f32) -> Self {
        let bounds: Vec<(f64, f64)> = (0..scale.bucket_count())
            .filter_map(|i| scale.bucket_extent(i))
            .collect();
        let widths = allocate_widths(&bounds, width);

        let mut x = 0.0;
        let swatches = bounds
            .iter()
            .zip(scale.colors())
            .zip(widths)
            .map(|((&(lower, upper), &color), w)| {
                let swatch = Swatch {
                    lower,
                    upper,
                    color,
                    x,
                    width: w,
                };
                x += w;
                swatch
            })
            .collect();

        Self {
            swatches,
            width,
            height,
        }
    }

    /// Swatches, coolest first.
    #[must_use]
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// Configured strip width.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Standalone SVG: caption, strip and boundary labels.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let strip_y = CAPTION_HEIGHT;
        let label_y = strip_y + self.height + LABEL_HEIGHT - 4.0;

        let mut svg = SvgEncoder::new(self.width, self.height + CAPTION_HEIGHT + LABEL_HEIGHT)
            .background(None)
            .element(
                SvgElement::text(
                    self.width / 2.0,
                    CAPTION_HEIGHT - 6.0,
                    LEGEND_CAPTION,
                    FONT_SIZE + 2.0,
                    Rgba::BLACK,
                    TextAnchor::Middle,
                )
                .attr("class", "caption"),
            );

        for swatch in &self.swatches {
            svg.add_element(
                SvgElement::rect(swatch.x, strip_y, swatch.width, self.height, swatch.color)
                    .attr("class", "swatch")
                    .attr("data-lower", format!("{:.2}", swatch.lower))
                    .attr("data-upper", format!("{:.2}", swatch.upper)),
            );
        }

        // Boundary labels: the minimum, every interior breakpoint, the maximum.
        let last = self.swatches.len().saturating_sub(1);
        for (i, swatch) in self.swatches.iter().enumerate() {
            let anchor = if i == 0 { TextAnchor::Start } else { TextAnchor::Middle };
            svg.add_element(SvgElement::text(
                swatch.x,
                label_y,
                &format!("{:.1}", swatch.lower),
                FONT_SIZE,
                Rgba::BLACK,
                anchor,
            ));
            if i == last {
                svg.add_element(SvgElement::text(
                    swatch.x + swatch.width,
                    label_y,
                    &format!("{:.1}", swatch.upper),
                    FONT_SIZE,
                    Rgba::BLACK,
                    TextAnchor::End,
                ));
            }
        }

        svg
    }
}

/// Split `total` across buckets: a floor each, the rest by value span.
///
/// Widths are strictly positive and sum to `total`.
fn allocate_widths(bounds: &[(f64, f64)], total: f32) -> Vec<f32> {
    let n = bounds.len();
    if n == 0 {
        return Vec::new();
    }

    // Never let the floors eat more than half the strip.
    let floor = (total * MIN_SWATCH_FRACTION).min(total / (2.0 * n as f32));
    let remainder = total - floor * n as f32;

    let spans: Vec<f64> = bounds.iter().map(|&(lo, hi)| (hi - lo).max(0.0)).collect();
    let span_total: f64 = spans.iter().sum();

    let mut widths: Vec<f32> = spans
        .iter()
        .map(|&span| {
            let share = if span_total > 0.0 {
                (span / span_total) as f32
            } else {
                1.0 / n as f32
            };
            floor + remainder * share
        })
        .collect();

    // Absorb rounding in the last swatch so the strip is exactly `total` wide.
    let head: f32 = widths[..n - 1].iter().sum();
    widths[n - 1] = total - head;
    widths
}
