//! Georeferenced raster grids.
//!
//! A [`RasterGrid`] is the in-memory form of a decoded single-band raster:
//! row-major values, an affine north-up transform and an optional no-data
//! sentinel. It is produced once by the decoding step and only read after.

use serde::{Deserialize, Serialize};

use crate::{BoundingBox, GeoCoordinate, RadarError, RadarResult};

/// North-up affine transform of a regular lat/lon grid.
///
/// The origin is the north-west corner of the first cell (row 0, column 0).
/// Columns grow eastward by `pixel_width`, rows grow southward by
/// `pixel_height`; both sizes are positive degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoTransform {
    pub origin_lon: f64,
    pub origin_lat: f64,
    pub pixel_width: f64,
    pub pixel_height: f64,
}

impl GeoTransform {
    pub fn new(origin_lon: f64, origin_lat: f64, pixel_width: f64, pixel_height: f64) -> Self {
        Self {
            origin_lon,
            origin_lat,
            pixel_width,
            pixel_height,
        }
    }

    /// Build a transform covering `bbox` with `width` x `height` cells.
    pub fn from_bbox(bbox: &BoundingBox, width: usize, height: usize) -> Self {
        Self {
            origin_lon: bbox.min_x,
            origin_lat: bbox.max_y,
            pixel_width: bbox.width() / width as f64,
            pixel_height: bbox.height() / height as f64,
        }
    }

    fn validate(&self) -> Result<(), String> {
        if !self.origin_lon.is_finite() || !self.origin_lat.is_finite() {
            return Err("transform origin must be finite".to_string());
        }
        if !(self.pixel_width.is_finite() && self.pixel_width > 0.0) {
            return Err(format!("pixel_width must be positive, got {}", self.pixel_width));
        }
        if !(self.pixel_height.is_finite() && self.pixel_height > 0.0) {
            return Err(format!("pixel_height must be positive, got {}", self.pixel_height));
        }
        Ok(())
    }
}

/// Check a value against a no-data sentinel.
///
/// Equality is exact. A NaN sentinel matches NaN values.
pub fn matches_no_data(value: f64, no_data: Option<f64>) -> bool {
    match no_data {
        Some(sentinel) if sentinel.is_nan() => value.is_nan(),
        Some(sentinel) => value == sentinel,
        None => false,
    }
}

/// A decoded single-band raster.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "GridDocument")]
pub struct RasterGrid {
    width: usize,
    height: usize,
    transform: GeoTransform,
    no_data: Option<f64>,
    values: Vec<f64>,
}

/// Wire shape of a grid before validation.
#[derive(Deserialize)]
struct GridDocument {
    width: usize,
    height: usize,
    transform: GeoTransform,
    #[serde(default)]
    no_data: Option<f64>,
    values: Vec<f64>,
}

impl TryFrom<GridDocument> for RasterGrid {
    type Error = RadarError;

    fn try_from(doc: GridDocument) -> Result<Self, Self::Error> {
        RasterGrid::new(doc.width, doc.height, doc.transform, doc.no_data, doc.values)
    }
}

impl RasterGrid {
    /// Create a grid, checking that dimensions, transform and values agree.
    pub fn new(
        width: usize,
        height: usize,
        transform: GeoTransform,
        no_data: Option<f64>,
        values: Vec<f64>,
    ) -> RadarResult<Self> {
        if width == 0 || height == 0 {
            return Err(RadarError::InvalidGrid(format!(
                "grid must have at least one cell, got {}x{}",
                width, height
            )));
        }
        // Cell count and the RGBA overlay buffer must both be addressable
        let cells = width
            .checked_mul(height)
            .filter(|cells| cells.checked_mul(4).is_some())
            .ok_or_else(|| {
                RadarError::InvalidGrid(format!("{}x{} grid is too large", width, height))
            })?;
        if values.len() != cells {
            return Err(RadarError::InvalidGrid(format!(
                "expected {} values for a {}x{} grid, got {}",
                cells,
                width,
                height,
                values.len()
            )));
        }
        transform.validate().map_err(RadarError::InvalidGrid)?;

        Ok(Self {
            width,
            height,
            transform,
            no_data,
            values,
        })
    }

    /// Parse a grid from its JSON document form.
    pub fn from_json(bytes: &[u8]) -> RadarResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| RadarError::Decode(e.to_string()))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn no_data(&self) -> Option<f64> {
        self.no_data
    }

    /// Raw values in row-major order (row 0 is the northernmost row).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// One row of values.
    pub fn row(&self, row: usize) -> &[f64] {
        let start = row * self.width;
        &self.values[start..start + self.width]
    }

    /// Geographic extent covered by the cells.
    pub fn bbox(&self) -> BoundingBox {
        let t = &self.transform;
        BoundingBox {
            min_x: t.origin_lon,
            min_y: t.origin_lat - self.height as f64 * t.pixel_height,
            max_x: t.origin_lon + self.width as f64 * t.pixel_width,
            max_y: t.origin_lat,
        }
    }

    /// Cell `(column, row)` containing a coordinate.
    ///
    /// Returns `None` outside the extent. Coordinates on the east or south
    /// edge resolve to the last column or row.
    pub fn coord_to_cell(&self, coord: GeoCoordinate) -> Option<(usize, usize)> {
        if !coord.is_finite() || !self.bbox().contains(coord) {
            return None;
        }

        let t = &self.transform;
        let col = ((coord.lon - t.origin_lon) / t.pixel_width).floor().max(0.0) as usize;
        let row = ((t.origin_lat - coord.lat) / t.pixel_height).floor().max(0.0) as usize;

        Some((col.min(self.width - 1), row.min(self.height - 1)))
    }

    /// Value stored at a cell.
    pub fn value_at_cell(&self, col: usize, row: usize) -> Option<f64> {
        if col >= self.width || row >= self.height {
            return None;
        }
        self.values.get(row * self.width + col).copied()
    }

    /// Value of the cell containing a coordinate, unrounded.
    pub fn value_at(&self, coord: GeoCoordinate) -> Option<f64> {
        let (col, row) = self.coord_to_cell(coord)?;
        self.value_at_cell(col, row)
    }

    /// Whether a value is this grid's no-data sentinel.
    pub fn is_no_data(&self, value: f64) -> bool {
        matches_no_data(value, self.no_data)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_grid() -> RasterGrid {
        // 3 columns x 2 rows, 1 degree cells, NW corner at (-3, 42)
        RasterGrid::new(
            3,
            2,
            GeoTransform::new(-3.0, 42.0, 1.0, 1.0),
            Some(-9999.0),
            vec![10.0, 20.0, 30.0, 40.0, -9999.0, 60.0],
        )
        .unwrap()
    }

    #[test]
    fn test_bbox() {
        let bbox = small_grid().bbox();
        assert_eq!(bbox, BoundingBox::new(-3.0, 40.0, 0.0, 42.0));
    }

    #[test]
    fn test_coord_to_cell() {
        let grid = small_grid();
        assert_eq!(grid.coord_to_cell(GeoCoordinate::new(41.5, -2.5)), Some((0, 0)));
        assert_eq!(grid.coord_to_cell(GeoCoordinate::new(40.5, -0.5)), Some((2, 1)));
        // Edges
        assert_eq!(grid.coord_to_cell(GeoCoordinate::new(42.0, -3.0)), Some((0, 0)));
        assert_eq!(grid.coord_to_cell(GeoCoordinate::new(40.0, 0.0)), Some((2, 1)));
        // Outside
        assert_eq!(grid.coord_to_cell(GeoCoordinate::new(39.9, -1.0)), None);
        assert_eq!(grid.coord_to_cell(GeoCoordinate::new(f64::NAN, -1.0)), None);
    }

    #[test]
    fn test_value_at() {
        let grid = small_grid();
        assert_eq!(grid.value_at(GeoCoordinate::new(41.5, -1.5)), Some(20.0));
        assert_eq!(grid.value_at(GeoCoordinate::new(40.5, -1.5)), Some(-9999.0));
        assert!(grid.is_no_data(-9999.0));
    }

    #[test]
    fn test_rejects_mismatched_values() {
        let err = RasterGrid::new(2, 2, GeoTransform::new(0.0, 0.0, 1.0, 1.0), None, vec![1.0])
            .unwrap_err();
        assert!(matches!(err, RadarError::InvalidGrid(_)));
    }

    #[test]
    fn test_rejects_bad_transform() {
        let err = RasterGrid::new(1, 1, GeoTransform::new(0.0, 0.0, -1.0, 1.0), None, vec![1.0])
            .unwrap_err();
        assert!(matches!(err, RadarError::InvalidGrid(_)));
    }

    #[test]
    fn test_nan_sentinel_matches_nan() {
        assert!(matches_no_data(f64::NAN, Some(f64::NAN)));
        assert!(!matches_no_data(1.0, Some(f64::NAN)));
        assert!(!matches_no_data(f64::NAN, None));
        assert!(!matches_no_data(-9999.0001, Some(-9999.0)));
    }
}
