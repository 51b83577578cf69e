//! Tests for RasterGrid decoding and cell lookup.

use radar_common::{BoundingBox, GeoCoordinate, GeoTransform, RadarError, RasterGrid};

// ============================================================================
// JSON document tests
// ============================================================================

#[test]
fn test_from_json_full_document() {
    let json = br#"{
        "width": 2,
        "height": 2,
        "transform": {
            "origin_lon": -10.0,
            "origin_lat": 44.0,
            "pixel_width": 0.5,
            "pixel_height": 0.25
        },
        "no_data": -9999.0,
        "values": [12.0, 45.3, -9999.0, 90.0]
    }"#;

    let grid = RasterGrid::from_json(json).unwrap();
    assert_eq!(grid.width(), 2);
    assert_eq!(grid.height(), 2);
    assert_eq!(grid.no_data(), Some(-9999.0));
    assert_eq!(grid.bbox(), BoundingBox::new(-10.0, 43.5, -9.0, 44.0));
}

#[test]
fn test_from_json_without_no_data() {
    let json = br#"{
        "width": 1,
        "height": 1,
        "transform": {"origin_lon": 0, "origin_lat": 0, "pixel_width": 1, "pixel_height": 1},
        "values": [3.5]
    }"#;

    let grid = RasterGrid::from_json(json).unwrap();
    assert_eq!(grid.no_data(), None);
    assert!(!grid.is_no_data(3.5));
}

#[test]
fn test_from_json_value_count_mismatch() {
    let json = br#"{
        "width": 3,
        "height": 3,
        "transform": {"origin_lon": 0, "origin_lat": 0, "pixel_width": 1, "pixel_height": 1},
        "values": [1, 2, 3]
    }"#;

    let err = RasterGrid::from_json(json).unwrap_err();
    assert!(matches!(err, RadarError::Decode(_)));
    assert!(err.to_string().contains("expected 9 values"));
}

#[test]
fn test_from_json_overflowing_dimensions() {
    let json = br#"{
        "width": 4294967296,
        "height": 4294967296,
        "transform": {"origin_lon": 0, "origin_lat": 0, "pixel_width": 1, "pixel_height": 1},
        "values": []
    }"#;

    let err = RasterGrid::from_json(json).unwrap_err();
    assert!(err.is_load_failure());
    assert!(err.to_string().contains("too large"));
}

#[test]
fn test_new_rejects_dimensions_without_rgba_room() {
    let transform = GeoTransform::new(0.0, 0.0, 1.0, 1.0);
    let err = RasterGrid::new(usize::MAX / 2, 2, transform, None, vec![]).unwrap_err();
    assert!(matches!(err, RadarError::InvalidGrid(_)));
}

#[test]
fn test_from_json_garbage() {
    let err = RasterGrid::from_json(b"II*\0not json").unwrap_err();
    assert!(err.is_load_failure());
}

#[test]
fn test_json_roundtrip_preserves_lookup() {
    let grid = RasterGrid::new(
        2,
        1,
        GeoTransform::new(0.0, 1.0, 1.0, 1.0),
        Some(-1.0),
        vec![5.0, 6.0],
    )
    .unwrap();

    let bytes = serde_json::to_vec(&grid).unwrap();
    let decoded = RasterGrid::from_json(&bytes).unwrap();
    assert_eq!(decoded.value_at(GeoCoordinate::new(0.5, 1.5)), Some(6.0));
}

// ============================================================================
// Lookup tests
// ============================================================================

#[test]
fn test_rows_are_north_to_south() {
    let bbox = BoundingBox::new(0.0, 0.0, 2.0, 2.0);
    let grid = RasterGrid::new(
        2,
        2,
        GeoTransform::from_bbox(&bbox, 2, 2),
        None,
        vec![1.0, 2.0, 3.0, 4.0],
    )
    .unwrap();

    assert_eq!(grid.row(0), &[1.0, 2.0]);
    assert_eq!(grid.value_at(GeoCoordinate::new(1.9, 0.1)), Some(1.0));
    assert_eq!(grid.value_at(GeoCoordinate::new(0.1, 1.9)), Some(4.0));
}

#[test]
fn test_value_at_cell_out_of_range() {
    let grid = RasterGrid::new(1, 1, GeoTransform::new(0.0, 1.0, 1.0, 1.0), None, vec![7.0])
        .unwrap();
    assert_eq!(grid.value_at_cell(0, 0), Some(7.0));
    assert_eq!(grid.value_at_cell(1, 0), None);
    assert_eq!(grid.value_at_cell(0, 1), None);
}
