//! Output encoders (SVG, HTML).

mod html;
mod svg;

pub use html::HtmlExporter;
pub use svg::{Attributes, SvgElement, SvgEncoder, TextAnchor};

pub(crate) use svg::escape;
