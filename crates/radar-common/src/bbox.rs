//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::GeoCoordinate;

/// A geographic bounding box in degrees (x = longitude, y = latitude).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Check if a point is contained within this bbox. Edges are inclusive.
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }

    /// Check if a geographic coordinate falls inside this bbox.
    pub fn contains(&self, coord: GeoCoordinate) -> bool {
        self.contains_point(coord.lon, coord.lat)
    }

    /// South-west and north-east corners as `[[lat, lon], [lat, lon]]`,
    /// the shape slippy map widgets expect for fitting a view.
    pub fn to_lat_lon_corners(&self) -> [[f64; 2]; 2] {
        [[self.min_y, self.min_x], [self.max_y, self.max_x]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_edges_inclusive() {
        let bbox = BoundingBox::new(-10.0, 35.0, 5.0, 44.0);
        assert!(bbox.contains_point(-10.0, 35.0));
        assert!(bbox.contains_point(5.0, 44.0));
        assert!(!bbox.contains_point(5.0001, 40.0));
    }

    #[test]
    fn test_corners_are_lat_first() {
        let bbox = BoundingBox::new(-10.0, 35.0, 5.0, 44.0);
        assert_eq!(bbox.to_lat_lon_corners(), [[35.0, -10.0], [44.0, 5.0]]);
    }
}
