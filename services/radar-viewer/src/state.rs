//! Application state: configuration, classifier and the loaded overlay.

use anyhow::{Context, Result};
use bytes::Bytes;
use radar_common::{BoundingBox, RadarError, RadarResult, RasterGrid};
use raster_query::{ClickHandler, Sampler, SamplerConfig};
use renderer::{png, render_overlay, Classifier, ClassifierConfig};
use std::sync::Arc;
use tracing::{error, info};

use crate::config::ViewerConfig;
use crate::loader::{load_raster, source_for, JsonGridDecoder};

/// A raster that made it through the whole load pipeline.
#[derive(Debug, Clone)]
pub struct Overlay {
    grid: Arc<RasterGrid>,
    png: Bytes,
    painted_pixels: usize,
}

impl Overlay {
    /// Classify and encode a decoded grid.
    pub fn build(grid: RasterGrid, classifier: &Classifier) -> RadarResult<Self> {
        let image = render_overlay(&grid, classifier);
        let png = png::encode_overlay(&image)?;

        info!(
            width = image.width,
            height = image.height,
            painted = image.painted_pixels(),
            invalid = image.invalid_samples,
            png_bytes = png.len(),
            "Overlay built"
        );

        Ok(Self {
            grid: Arc::new(grid),
            png: Bytes::from(png),
            painted_pixels: image.painted_pixels(),
        })
    }

    pub fn bounds(&self) -> BoundingBox {
        self.grid.bbox()
    }

    /// Encoded PNG; cloning is cheap.
    pub fn png(&self) -> Bytes {
        self.png.clone()
    }

    pub fn painted_pixels(&self) -> usize {
        self.painted_pixels
    }

    pub fn click_handler(&self, label: &str) -> ClickHandler<'_> {
        let sampler = Sampler::new(SamplerConfig {
            raster: Some(self.grid.as_ref()),
        });
        ClickHandler::with_label(sampler, label)
    }
}

/// Whether the overlay could be attached.
#[derive(Debug, Clone)]
pub enum OverlayState {
    Ready(Overlay),
    /// Nothing is retried; the error is reported to the user.
    Failed(RadarError),
}

/// Shared application state.
pub struct AppState {
    pub config: ViewerConfig,
    pub classifier: Classifier,
    pub overlay: OverlayState,
}

impl AppState {
    /// Build state from a finished (or failed) load.
    ///
    /// Load and render failures detach the overlay; a bad ramp is a
    /// configuration error and is returned.
    pub fn new(config: ViewerConfig, loaded: RadarResult<RasterGrid>) -> Result<Self> {
        let classifier = Classifier::new(ClassifierConfig {
            ramp: config.color_ramp()?,
        });
        let overlay = Self::attach(loaded.and_then(|grid| Overlay::build(grid, &classifier)));

        Ok(Self {
            config,
            classifier,
            overlay,
        })
    }

    /// Run the load pipeline for the configured source.
    pub async fn load(config: ViewerConfig) -> Result<Self> {
        let loaded = match source_for(&config.raster.source, config.raster.timeout()) {
            Ok(source) => load_raster(source.as_ref(), &JsonGridDecoder).await,
            Err(e) => Err(e),
        };

        // Classification is CPU bound
        tokio::task::spawn_blocking(move || Self::new(config, loaded))
            .await
            .context("Overlay build task failed")?
    }

    fn attach(built: RadarResult<Overlay>) -> OverlayState {
        match built {
            Ok(overlay) => OverlayState::Ready(overlay),
            Err(e) if e.is_load_failure() => {
                error!(error = %e, "Could not load the map layer; overlay not attached");
                OverlayState::Failed(e)
            }
            Err(e) => {
                error!(error = %e, "Could not build the overlay; overlay not attached");
                OverlayState::Failed(e)
            }
        }
    }

    /// The overlay, or the error that kept it detached.
    pub fn ready(&self) -> Result<&Overlay, &RadarError> {
        match &self.overlay {
            OverlayState::Ready(overlay) => Ok(overlay),
            OverlayState::Failed(e) => Err(e),
        }
    }

    /// Click handler; samples nothing until the overlay is attached.
    pub fn click_handler(&self) -> ClickHandler<'_> {
        match &self.overlay {
            OverlayState::Ready(overlay) => overlay.click_handler(&self.config.popup.label),
            OverlayState::Failed(_) => ClickHandler::with_label(
                Sampler::new(SamplerConfig::default()),
                self.config.popup.label.as_str(),
            ),
        }
    }
}
