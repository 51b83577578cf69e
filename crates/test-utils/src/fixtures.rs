//! Common test fixtures for radar overlay tests.

use radar_common::{BoundingBox, GeoCoordinate, RasterGrid};
use std::io::Write;
use tempfile::NamedTempFile;

/// No-data sentinel used by the radar composite.
pub const NO_DATA: f64 = -9999.0;

/// Common extents for testing.
pub mod bbox {
    use super::BoundingBox;

    /// Iberian peninsula, the extent of the national composite.
    pub const IBERIA: BoundingBox = BoundingBox {
        min_x: -10.0,
        min_y: 35.0,
        max_x: 5.0,
        max_y: 44.0,
    };

    /// Small 4x4 degree box for hand-checked lookups.
    pub const SMALL: BoundingBox = BoundingBox {
        min_x: 0.0,
        min_y: 0.0,
        max_x: 4.0,
        max_y: 4.0,
    };
}

/// Common coordinates for testing.
pub mod coords {
    use super::GeoCoordinate;

    /// Madrid, the default map center.
    pub const MADRID: GeoCoordinate = GeoCoordinate {
        lat: 40.4167,
        lon: -3.70325,
    };

    /// Mid-Atlantic, outside every test extent.
    pub const ATLANTIC: GeoCoordinate = GeoCoordinate {
        lat: 38.0,
        lon: -30.0,
    };
}

/// Write a grid as a JSON document to a temporary file.
pub fn write_grid_file(grid: &RasterGrid) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp grid file");
    let bytes = serde_json::to_vec(grid).expect("serialize grid");
    file.write_all(&bytes).expect("write temp grid file");
    file.flush().expect("flush temp grid file");
    file
}
