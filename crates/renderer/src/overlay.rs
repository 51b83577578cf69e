//! Classified overlay rendering for a whole raster.

use radar_common::RasterGrid;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, warn};

use crate::ramp::Classifier;

/// RGBA bitmap of a classified raster, one pixel per cell.
#[derive(Debug, Clone)]
pub struct OverlayImage {
    pub width: usize,
    pub height: usize,
    /// Row-major RGBA bytes (4 per pixel).
    pub pixels: Vec<u8>,
    /// Cells that were neither numeric nor the sentinel.
    pub invalid_samples: usize,
}

impl OverlayImage {
    /// RGBA of a single pixel.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y * self.width + x) * 4;
        let p = &self.pixels[offset..offset + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Number of pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> usize {
        self.pixels.chunks_exact(4).filter(|p| p[3] != 0).count()
    }
}

/// Classify every cell of `grid`.
///
/// Rows are processed in parallel. Invalid samples stay transparent and
/// are reported once per render.
pub fn render_overlay(grid: &RasterGrid, classifier: &Classifier) -> OverlayImage {
    let width = grid.width();
    let height = grid.height();
    let mut pixels = vec![0u8; width * height * 4];
    let invalid = AtomicUsize::new(0);
    let to_rgba = classifier.pixel_fn(grid.no_data());

    pixels
        .par_chunks_mut(width * 4)
        .enumerate()
        .for_each(|(row, out)| {
            let mut row_invalid = 0;
            for (value, px) in grid.row(row).iter().zip(out.chunks_exact_mut(4)) {
                match to_rgba(*value) {
                    Some(rgba) => px.copy_from_slice(&rgba),
                    None => row_invalid += 1,
                }
            }
            if row_invalid > 0 {
                invalid.fetch_add(row_invalid, Ordering::Relaxed);
            }
        });

    let invalid_samples = invalid.into_inner();
    if invalid_samples > 0 {
        warn!(
            invalid_samples = invalid_samples,
            width = width,
            height = height,
            "Invalid samples left transparent"
        );
    }

    let image = OverlayImage {
        width,
        height,
        pixels,
        invalid_samples,
    };
    debug!(
        width = width,
        height = height,
        painted = image.painted_pixels(),
        "Rendered overlay"
    );
    image
}
