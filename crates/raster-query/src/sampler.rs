//! Grid value sampling for point queries.

use radar_common::GeoCoordinate;
use serde::Serialize;

use crate::raster::GeoRaster;

/// Outcome of sampling a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Sampled {
    /// The raw cell value. It may be the raster's no-data sentinel.
    Value(f64),
    /// Outside the raster, or no raster loaded yet.
    NoValue,
}

impl Sampled {
    pub fn value(&self) -> Option<f64> {
        match self {
            Sampled::Value(v) => Some(*v),
            Sampled::NoValue => None,
        }
    }
}

/// Sample `raster` at `coord`.
pub fn sample(coord: GeoCoordinate, raster: &dyn GeoRaster) -> Sampled {
    if !coord.is_finite() || !raster.bounds().contains(coord) {
        return Sampled::NoValue;
    }
    match raster.value_at(coord) {
        Some(value) => Sampled::Value(value),
        None => Sampled::NoValue,
    }
}

/// Inputs for building a [`Sampler`].
#[derive(Clone, Copy, Default)]
pub struct SamplerConfig<'a> {
    /// `None` until the raster has finished loading.
    pub raster: Option<&'a dyn GeoRaster>,
}

/// Point sampler over a borrowed raster.
#[derive(Clone, Copy)]
pub struct Sampler<'a> {
    raster: Option<&'a dyn GeoRaster>,
}

impl<'a> Sampler<'a> {
    pub fn new(config: SamplerConfig<'a>) -> Self {
        Self {
            raster: config.raster,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.raster.is_some()
    }

    /// Sentinel of the underlying raster.
    pub fn no_data(&self) -> Option<f64> {
        self.raster.and_then(|r| r.no_data())
    }

    pub fn sample(&self, coord: GeoCoordinate) -> Sampled {
        match self.raster {
            Some(raster) => sample(coord, raster),
            None => Sampled::NoValue,
        }
    }
}

impl std::fmt::Debug for Sampler<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sampler")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
