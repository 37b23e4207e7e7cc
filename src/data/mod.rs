//! Dataset model and the sources that fetch it.

mod dataset;
mod source;

pub use dataset::{month_name, Dataset, Record, MONTH_NAMES};
#[cfg(feature = "http")]
pub use source::HttpDataSource;
#[cfg(not(target_arch = "wasm32"))]
pub use source::FileDataSource;
pub use source::{DataSource, StaticDataSource};
