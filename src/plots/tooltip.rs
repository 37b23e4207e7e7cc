//! Hover tooltip state.
//!
//! The host forwards hover/unhover as plain method calls; the controller only
//! remembers what to show and where. The latest call always wins.

use std::fmt;

use crate::data::Record;
use crate::geometry::Point;
use crate::output::escape;

/// Default tooltip offset from the pointer, clear of the hovered cell.
pub const DEFAULT_TOOLTIP_OFFSET: (f32, f32) = (10.0, -28.0);

/// What the tooltip says about one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    /// Calendar year.
    pub year: i32,
    /// Full month name.
    pub month: &'static str,
    /// Absolute temperature in ℃.
    pub temperature: f64,
    /// Deviation from the base temperature in ℃.
    pub variance: f64,
}

impl TooltipContent {
    /// Content for a record whose absolute temperature is already known.
    #[must_use]
    pub fn new(record: &Record, temperature: f64) -> Self {
        Self {
            year: record.year,
            month: record.month_name(),
            temperature,
            variance: record.variance,
        }
    }

    /// The four display lines: year, month, temperature, variance.
    #[must_use]
    pub fn lines(&self) -> [String; 4] {
        [
            format!("Year: {}", self.year),
            format!("Month: {}", self.month),
            format!("Temperature: {:.2}℃", self.temperature),
            format!("Variance: {:.2}℃", self.variance),
        ]
    }
}

impl fmt::Display for TooltipContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}

/// Floating panel shown while a cell is hovered.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipController {
    visible: bool,
    content: Option<TooltipContent>,
    position: Point,
    offset: (f32, f32),
}

impl Default for TooltipController {
    fn default() -> Self {
        Self::new(DEFAULT_TOOLTIP_OFFSET)
    }
}

impl TooltipController {
    /// Hidden tooltip that will sit `offset` away from the pointer.
    #[must_use]
    pub fn new(offset: (f32, f32)) -> Self {
        Self {
            visible: false,
            content: None,
            position: Point::ORIGIN,
            offset,
        }
    }

    /// Fill in the record's details, move next to the pointer and become visible.
    pub fn show(&mut self, record: &Record, temperature: f64, pointer: Point) {
        self.content = Some(TooltipContent::new(record, temperature));
        self.position = pointer.offset(self.offset.0, self.offset.1);
        self.visible = true;
    }

    /// Hide the panel. Content is kept; it is simply not shown.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the panel is currently shown.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last content shown, possibly stale while hidden.
    #[must_use]
    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }

    /// Year of the displayed record, only while visible.
    #[must_use]
    pub fn shown_year(&self) -> Option<i32> {
        self.content.as_ref().filter(|_| self.visible).map(|c| c.year)
    }

    /// Top-left corner of the panel.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Panel text, one line per field.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.content.as_ref().map(ToString::to_string)
    }

    /// Render as the `#tooltip` panel element.
    ///
    /// While visible the element carries `data-year` and is positioned at
    /// [`TooltipController::position`]; while hidden it is `display:none`.
    #[must_use]
    pub fn to_html(&self) -> String {
        let body = self
            .content
            .as_ref()
            .map(|c| {
                c.lines()
                    .iter()
                    .map(|l| escape(l))
                    .collect::<Vec<_>>()
                    .join("<br>")
            })
            .unwrap_or_default();

        match self.shown_year() {
            Some(year) => format!(
                r#"<div id="tooltip" class="tooltip" data-year="{year}" style="display:block;left:{}px;top:{}px">{body}</div>"#,
                self.position.x, self.position.y
            ),
            None => format!(r#"<div id="tooltip" class="tooltip" style="display:none">{body}</div>"#),
        }
    }
}
