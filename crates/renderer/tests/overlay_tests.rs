//! Tests for whole-grid overlay rendering.

use renderer::{reflectivity_ramp, render_overlay, Classifier, ClassifierConfig};
use test_utils::{bbox, create_grid_from_values, create_reflectivity_grid, NO_DATA};

fn classifier() -> Classifier {
    Classifier::new(ClassifierConfig {
        ramp: reflectivity_ramp().unwrap(),
    })
}

#[test]
fn test_overlay_dimensions_match_grid() {
    let grid = create_reflectivity_grid(&bbox::IBERIA, 64, 32);
    let image = render_overlay(&grid, &classifier());

    assert_eq!(image.width, 64);
    assert_eq!(image.height, 32);
    assert_eq!(image.pixels.len(), 64 * 32 * 4);
    assert_eq!(image.invalid_samples, 0);
}

#[test]
fn test_overlay_pixels() {
    let grid = create_grid_from_values(&bbox::SMALL, 4, 1, vec![90.0, 12.0, 5.0, NO_DATA]);
    let image = render_overlay(&grid, &classifier());

    assert_eq!(image.pixel(0, 0), Some([240, 240, 240, 255]));
    assert_eq!(image.pixel(1, 0), Some([0, 0, 252, 255]));
    assert_eq!(image.pixel(2, 0), Some([0, 0, 0, 0]));
    assert_eq!(image.pixel(3, 0), Some([0, 0, 0, 0]));
    assert_eq!(image.pixel(4, 0), None);
    assert_eq!(image.painted_pixels(), 2);
}

#[test]
fn test_no_data_row_is_transparent() {
    let grid = create_reflectivity_grid(&bbox::IBERIA, 16, 4);
    let image = render_overlay(&grid, &classifier());

    for x in 0..16 {
        assert_eq!(image.pixel(x, 0).unwrap()[3], 0);
    }
    // Eastern column of a data row is 90 dBZ
    assert_eq!(image.pixel(15, 1), Some([240, 240, 240, 255]));
}

#[test]
fn test_invalid_samples_counted_not_painted() {
    let grid = create_grid_from_values(&bbox::SMALL, 3, 1, vec![f64::NAN, 50.0, f64::NAN]);
    let image = render_overlay(&grid, &classifier());

    assert_eq!(image.invalid_samples, 2);
    assert_eq!(image.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(image.painted_pixels(), 1);
}
