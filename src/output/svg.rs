//! SVG output encoder.
//!
//! Vector output only. Elements carry arbitrary attributes (`id`, `class`,
//! `data-*`) so the chart can be queried by the page hosting it.

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Extra `name="value"` pairs written on an element, in insertion order.
pub type Attributes = Vec<(String, String)>;

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: f32,
    /// SVG height
    height: f32,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// Attributes on the root `<svg>` element
    attrs: Attributes,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        fill: Rgba,
        attrs: Attributes,
    },
    /// Line
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        stroke: Rgba,
        stroke_width: f32,
    },
    /// Text
    Text {
        x: f32,
        y: f32,
        text: String,
        font_size: f32,
        fill: Rgba,
        anchor: TextAnchor,
        attrs: Attributes,
    },
    /// Group of elements, optionally translated
    Group {
        translate: Option<(f32, f32)>,
        attrs: Attributes,
        children: Vec<SvgElement>,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl SvgElement {
    /// Filled rectangle without extra attributes.
    #[must_use]
    pub fn rect(x: f32, y: f32, width: f32, height: f32, fill: Rgba) -> Self {
        Self::Rect {
            x,
            y,
            width,
            height,
            fill,
            attrs: Vec::new(),
        }
    }

    /// Straight line.
    #[must_use]
    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32, stroke: Rgba, stroke_width: f32) -> Self {
        Self::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        }
    }

    /// Text run.
    #[must_use]
    pub fn text(x: f32, y: f32, text: &str, font_size: f32, fill: Rgba, anchor: TextAnchor) -> Self {
        Self::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            attrs: Vec::new(),
        }
    }

    /// Empty, untranslated group.
    #[must_use]
    pub fn group() -> Self {
        Self::Group {
            translate: None,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Add an attribute. Lines carry none, so this is a no-op on them.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        match &mut self {
            Self::Rect { attrs, .. } | Self::Text { attrs, .. } | Self::Group { attrs, .. } => {
                attrs.push((name.to_string(), value.to_string()));
            }
            Self::Line { .. } => {}
        }
        self
    }

    /// Translate a group. No-op on other elements.
    #[must_use]
    pub fn translate(mut self, dx: f32, dy: f32) -> Self {
        if let Self::Group { translate, .. } = &mut self {
            *translate = Some((dx, dy));
        }
        self
    }

    /// Append a child to a group. No-op on other elements.
    #[must_use]
    pub fn child(mut self, element: SvgElement) -> Self {
        if let Self::Group { children, .. } = &mut self {
            children.push(element);
        }
        self
    }

    /// Append several children to a group.
    #[must_use]
    pub fn children(mut self, elements: impl IntoIterator<Item = SvgElement>) -> Self {
        if let Self::Group { children, .. } = &mut self {
            children.extend(elements);
        }
        self
    }

    /// Value of an attribute previously added with [`SvgElement::attr`].
    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        let attrs = match self {
            Self::Rect { attrs, .. } | Self::Text { attrs, .. } | Self::Group { attrs, .. } => attrs,
            Self::Line { .. } => return None,
        };
        attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Default for SvgEncoder {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            attrs: Vec::new(),
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add an attribute on the root `<svg>` element.
    #[must_use]
    pub fn attr(mut self, name: &str, value: impl ToString) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    /// Add an element.
    #[must_use]
    pub fn element(mut self, element: SvgElement) -> Self {
        self.elements.push(element);
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(4096 + self.elements.len() * 128);

        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}""#,
            self.width, self.height, self.width, self.height
        );
        write_attrs(&mut svg, &self.attrs);
        svg.push_str(">\n");

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{bg}"/>"#);
        }

        for element in &self.elements {
            write_element(&mut svg, element, 1);
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Escape XML special characters in text and attribute values.
pub(crate) fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_attrs(out: &mut String, attrs: &Attributes) {
    for (name, value) in attrs {
        let _ = write!(out, r#" {name}="{}""#, escape(value));
    }
}

fn write_element(out: &mut String, element: &SvgElement, depth: usize) {
    let indent = "  ".repeat(depth);
    match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
            attrs,
        } => {
            let _ = write!(
                out,
                r#"{indent}<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{fill}""#
            );
            write_attrs(out, attrs);
            out.push_str("/>\n");
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => {
            let _ = writeln!(
                out,
                r#"{indent}<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{stroke}" stroke-width="{stroke_width}"/>"#
            );
        }
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            attrs,
        } => {
            let anchor_str = match anchor {
                TextAnchor::Start => "start",
                TextAnchor::Middle => "middle",
                TextAnchor::End => "end",
            };
            let _ = write!(
                out,
                r#"{indent}<text x="{x}" y="{y}" font-size="{font_size}" fill="{fill}" text-anchor="{anchor_str}" font-family="sans-serif""#
            );
            write_attrs(out, attrs);
            let _ = writeln!(out, ">{}</text>", escape(text));
        }
        SvgElement::Group {
            translate,
            attrs,
            children,
        } => {
            let _ = write!(out, "{indent}<g");
            write_attrs(out, attrs);
            if let Some((dx, dy)) = translate {
                let _ = write!(out, r#" transform="translate({dx},{dy})""#);
            }
            out.push_str(">\n");
            for child in children {
                write_element(out, child, depth + 1);
            }
            let _ = writeln!(out, "{indent}</g>");
        }
    }
}
