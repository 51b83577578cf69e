//! Point queries against a loaded radar raster.
//!
//! - [`raster`]: read-only access to a decoded raster by coordinate
//! - [`sampler`]: coordinate -> raw cell value
//! - [`feature_info`]: click handler formatting sampled values for popups

pub mod feature_info;
pub mod raster;
pub mod sampler;

pub use feature_info::{format_value, ClickHandler, FeatureInfo, InfoFormat, DEFAULT_LABEL};
pub use raster::GeoRaster;
pub use sampler::{sample, Sampled, Sampler, SamplerConfig};
