//! Viewer configuration loading and types.
//!
//! Loaded from a single YAML file (default `config/radar.yaml`). Every
//! section is optional; missing values fall back to the national radar
//! composite defaults.

use anyhow::{Context, Result};
use radar_common::GeoCoordinate;
use renderer::{ColorRamp, RampConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerConfig {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub raster: RasterConfig,
    #[serde(default)]
    pub popup: PopupConfig,
    #[serde(default)]
    pub server: ServerConfig,
    /// Ordered `(threshold, color)` table, highest threshold first.
    #[serde(default)]
    pub ramp: RampConfig,
}

/// Base map settings handed to the map widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// `[lat, lon]`
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: u8,
    #[serde(default = "default_tile_url")]
    pub tile_url: String,
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl MapConfig {
    pub fn center(&self) -> GeoCoordinate {
        GeoCoordinate::from(self.center)
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
        }
    }
}

fn default_center() -> [f64; 2] {
    [40.4167, -3.70325]
}

fn default_zoom() -> u8 {
    6
}

fn default_tile_url() -> String {
    "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string()
}

fn default_attribution() -> String {
    "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
        .to_string()
}

/// Where the raster comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RasterConfig {
    /// Local path or `http(s)://` URL of the grid document.
    #[serde(default = "default_source")]
    pub source: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl RasterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_source() -> String {
    "data/mosaico_20251013_Rmax.json".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupConfig {
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
        }
    }
}

fn default_label() -> String {
    raster_query::DEFAULT_LABEL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

impl ViewerConfig {
    /// Parse configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse viewer config")
    }

    /// Load configuration from a YAML file.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "Config file does not exist, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read: {:?}", path))?;
        let config = Self::from_yaml(&content).with_context(|| format!("In {:?}", path))?;

        info!(
            path = %path.display(),
            ramp_steps = config.ramp.steps.len(),
            source = %config.raster.source,
            "Loaded viewer config"
        );
        Ok(config)
    }

    /// Validate and build the color ramp.
    pub fn color_ramp(&self) -> Result<ColorRamp> {
        self.ramp.build().context("Invalid ramp in viewer config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_gives_defaults() {
        let config = ViewerConfig::from_yaml("{}").unwrap();
        assert_eq!(config.map.zoom, 6);
        assert_eq!(config.map.center(), GeoCoordinate::new(40.4167, -3.70325));
        assert_eq!(config.popup.label, "Valor");
        assert_eq!(config.color_ramp().unwrap().len(), 13);
    }

    #[test]
    fn test_partial_override() {
        let yaml = r##"
map:
  zoom: 8
raster:
  source: https://example.com/radar.json
ramp:
  - threshold: 40
    color: "#FF0000"
  - threshold: 10
    color: [0, 0, 252]
"##;
        let config = ViewerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.map.zoom, 8);
        assert_eq!(config.map.center, [40.4167, -3.70325]);
        assert_eq!(config.raster.source, "https://example.com/radar.json");
        assert_eq!(config.raster.timeout_secs, 60);
        assert_eq!(config.color_ramp().unwrap().len(), 2);
    }

    #[test]
    fn test_unsorted_ramp_rejected() {
        let yaml = r##"
ramp:
  - threshold: 10
    color: [0, 0, 252]
  - threshold: 40
    color: [255, 0, 0]
"##;
        let config = ViewerConfig::from_yaml(yaml).unwrap();
        assert!(config.color_ramp().is_err());
    }
}
