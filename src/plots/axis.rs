//! Year and month axes.

use crate::color::Rgba;
use crate::data::month_name;
use crate::output::{SvgElement, TextAnchor};
use crate::scale::BandScale;

const TICK_SIZE: f32 = 6.0;
const TICK_PADDING: f32 = 3.0;
const FONT_SIZE: f32 = 10.0;

/// Which side of the plot the axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    /// Below the grid, ticks pointing down.
    Bottom,
    /// Left of the grid, ticks pointing left.
    Left,
}

/// One labelled tick, offset measured along the axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    /// Offset of the band centre.
    pub offset: f32,
    /// Label text.
    pub label: String,
}

/// A rendered axis: element id, orientation, ticks and placement.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    id: &'static str,
    orient: AxisOrient,
    ticks: Vec<Tick>,
    range: (f32, f32),
    translate: (f32, f32),
}

impl Axis {
    /// `#x-axis`: years divisible by `interval`, below a plot of height `plot_height`.
    #[must_use]
    pub fn years(scale: &BandScale<i32>, interval: i32, plot_height: f32) -> Self {
        let half = scale.bandwidth() / 2.0;
        let ticks = scale
            .domain()
            .iter()
            .filter(|&&year| interval > 0 && year % interval == 0)
            .filter_map(|&year| {
                scale.position(year).map(|x| Tick {
                    offset: x + half,
                    label: year.to_string(),
                })
            })
            .collect();

        Self {
            id: "x-axis",
            orient: AxisOrient::Bottom,
            ticks,
            range: scale.range(),
            translate: (0.0, plot_height),
        }
    }

    /// `#y-axis`: all twelve months by full name.
    #[must_use]
    pub fn months(scale: &BandScale<u8>) -> Self {
        let half = scale.bandwidth() / 2.0;
        let ticks = scale
            .domain()
            .iter()
            .filter_map(|&m| {
                let y = scale.position(m)?;
                Some(Tick {
                    offset: y + half,
                    label: month_name(m)?.to_string(),
                })
            })
            .collect();

        Self {
            id: "y-axis",
            orient: AxisOrient::Left,
            ticks,
            range: scale.range(),
            translate: (0.0, 0.0),
        }
    }

    /// Element id.
    #[must_use]
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Orientation.
    #[must_use]
    pub fn orient(&self) -> AxisOrient {
        self.orient
    }

    /// Ticks in axis order.
    #[must_use]
    pub fn ticks(&self) -> &[Tick] {
        &self.ticks
    }

    /// Tick labels in axis order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.ticks.iter().map(|t| t.label.as_str()).collect()
    }

    /// Group with the domain line, tick marks and labels.
    #[must_use]
    pub fn to_svg(&self) -> SvgElement {
        let (r0, r1) = self.range;
        let domain_line = match self.orient {
            AxisOrient::Bottom => SvgElement::line(r0, 0.0, r1, 0.0, Rgba::BLACK, 1.0),
            AxisOrient::Left => SvgElement::line(0.0, r0, 0.0, r1, Rgba::BLACK, 1.0),
        };

        let ticks = self.ticks.iter().map(|tick| {
            let (dx, dy, mark, label) = match self.orient {
                AxisOrient::Bottom => (
                    tick.offset,
                    0.0,
                    SvgElement::line(0.0, 0.0, 0.0, TICK_SIZE, Rgba::BLACK, 1.0),
                    SvgElement::text(
                        0.0,
                        TICK_SIZE + TICK_PADDING,
                        &tick.label,
                        FONT_SIZE,
                        Rgba::BLACK,
                        TextAnchor::Middle,
                    )
                    .attr("dy", "0.71em"),
                ),
                AxisOrient::Left => (
                    0.0,
                    tick.offset,
                    SvgElement::line(0.0, 0.0, -TICK_SIZE, 0.0, Rgba::BLACK, 1.0),
                    SvgElement::text(
                        -(TICK_SIZE + TICK_PADDING),
                        0.0,
                        &tick.label,
                        FONT_SIZE,
                        Rgba::BLACK,
                        TextAnchor::End,
                    )
                    .attr("dy", "0.32em"),
                ),
            };
            SvgElement::group()
                .attr("class", "tick")
                .translate(dx, dy)
                .child(mark)
                .child(label)
        });

        SvgElement::group()
            .attr("id", self.id)
            .translate(self.translate.0, self.translate.1)
            .child(domain_line)
            .children(ticks)
    }
}
