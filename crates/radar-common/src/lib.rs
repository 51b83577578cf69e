//! Common types shared across the radar overlay crates.

pub mod bbox;
pub mod coord;
pub mod error;
pub mod grid;

pub use bbox::BoundingBox;
pub use coord::GeoCoordinate;
pub use error::{RadarError, RadarResult};
pub use grid::{GeoTransform, RasterGrid};
