//! Test data generators for creating synthetic radar-like grids.
//!
//! These generators create predictable, verifiable patterns that can be used
//! across the test suite.

use radar_common::{BoundingBox, GeoTransform, RasterGrid};

use crate::fixtures::NO_DATA;

/// Creates a grid from explicit row-major values with the standard sentinel.
///
/// # Example
///
/// ```
/// use test_utils::{bbox, create_grid_from_values};
///
/// let grid = create_grid_from_values(&bbox::SMALL, 2, 1, vec![45.3, -9999.0]);
/// assert_eq!(grid.len(), 2);
/// ```
pub fn create_grid_from_values(
    bbox: &BoundingBox,
    width: usize,
    height: usize,
    values: Vec<f64>,
) -> RasterGrid {
    RasterGrid::new(
        width,
        height,
        GeoTransform::from_bbox(bbox, width, height),
        Some(NO_DATA),
        values,
    )
    .expect("grid values match dimensions")
}

/// Creates a reflectivity-like grid in dBZ.
///
/// Values rise from 0 dBZ at the western edge to 90 dBZ at the eastern
/// edge. The first row is entirely no-data, mimicking the unscanned
/// border of a radar composite.
pub fn create_reflectivity_grid(bbox: &BoundingBox, width: usize, height: usize) -> RasterGrid {
    let mut values = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            if row == 0 {
                values.push(NO_DATA);
            } else {
                let x_factor = col as f64 / (width.max(2) - 1) as f64;
                values.push(x_factor * 90.0);
            }
        }
    }
    create_grid_from_values(bbox, width, height, values)
}
