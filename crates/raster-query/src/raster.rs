//! Read-only raster access.

use radar_common::{BoundingBox, GeoCoordinate, RasterGrid};

/// A decoded raster as seen by point queries.
///
/// Implementations are owned by whatever decoded the raster; queries only
/// ever borrow them.
pub trait GeoRaster: Send + Sync {
    /// Raw value of the cell containing `coord`, or `None` outside the extent.
    fn value_at(&self, coord: GeoCoordinate) -> Option<f64>;

    /// The no-data sentinel, if the source declares one.
    fn no_data(&self) -> Option<f64>;

    /// Geographic extent.
    fn bounds(&self) -> BoundingBox;
}

impl GeoRaster for RasterGrid {
    fn value_at(&self, coord: GeoCoordinate) -> Option<f64> {
        RasterGrid::value_at(self, coord)
    }

    fn no_data(&self) -> Option<f64> {
        RasterGrid::no_data(self)
    }

    fn bounds(&self) -> BoundingBox {
        self.bbox()
    }
}
