//! Raster load pipeline: fetch, then decode.
//!
//! Each stage has its own error variant so a failure can be reported with
//! the stage it happened in. Nothing is retried.

use async_trait::async_trait;
use bytes::Bytes;
use radar_common::{RadarError, RadarResult, RasterGrid};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Somewhere raster bytes can be fetched from.
#[async_trait]
pub trait RasterSource: Send + Sync {
    /// Human-readable location for logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> RadarResult<Bytes>;
}

/// Raster on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl RasterSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> RadarResult<Bytes> {
        tokio::fs::read(&self.path)
            .await
            .map(Bytes::from)
            .map_err(|e| RadarError::Fetch(format!("{}: {}", self.path.display(), e)))
    }
}

/// Raster served over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> RadarResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RadarError::Fetch(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl RasterSource for HttpSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> RadarResult<Bytes> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| RadarError::Fetch(format!("{}: {}", self.url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RadarError::Fetch(format!("{}: {}", self.url, status)));
        }

        response
            .bytes()
            .await
            .map_err(|e| RadarError::Fetch(format!("{}: {}", self.url, e)))
    }
}

/// Pick a source for a configured location.
pub fn source_for(location: &str, timeout: Duration) -> RadarResult<Box<dyn RasterSource>> {
    if location.trim().is_empty() {
        return Err(RadarError::Config("raster source is empty".to_string()));
    }
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new(location, timeout)?))
    } else {
        Ok(Box::new(FileSource::new(location)))
    }
}

/// Turns fetched bytes into a grid.
pub trait RasterDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> RadarResult<RasterGrid>;
}

/// Decoder for the JSON grid document.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonGridDecoder;

impl RasterDecoder for JsonGridDecoder {
    fn decode(&self, bytes: &[u8]) -> RadarResult<RasterGrid> {
        RasterGrid::from_json(bytes)
    }
}

/// Fetch and decode a raster.
pub async fn load_raster(
    source: &dyn RasterSource,
    decoder: &dyn RasterDecoder,
) -> RadarResult<RasterGrid> {
    let start = Instant::now();
    let location = source.describe();

    let bytes = source.fetch().await?;
    debug!(source = %location, bytes = bytes.len(), "Fetched raster");

    let grid = decoder.decode(&bytes)?;
    let bbox = grid.bbox();
    info!(
        source = %location,
        width = grid.width(),
        height = grid.height(),
        no_data = ?grid.no_data(),
        min_lon = bbox.min_x,
        min_lat = bbox.min_y,
        max_lon = bbox.max_x,
        max_lat = bbox.max_y,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Raster loaded"
    );

    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StaticSource(&'static [u8]);

    #[async_trait]
    impl RasterSource for StaticSource {
        fn describe(&self) -> String {
            "static".to_string()
        }

        async fn fetch(&self) -> RadarResult<Bytes> {
            Ok(Bytes::from_static(self.0))
        }
    }

    #[tokio::test]
    async fn test_load_from_static_bytes() {
        let source = StaticSource(
            br#"{"width":1,"height":1,
                "transform":{"origin_lon":0,"origin_lat":1,"pixel_width":1,"pixel_height":1},
                "no_data":-9999,"values":[45.3]}"#,
        );
        let grid = load_raster(&source, &JsonGridDecoder).await.unwrap();
        assert_eq!(grid.values(), &[45.3]);
    }

    #[tokio::test]
    async fn test_decode_failure_is_decode_error() {
        let source = StaticSource(b"II*\0");
        let err = load_raster(&source, &JsonGridDecoder).await.unwrap_err();
        assert!(matches!(err, RadarError::Decode(_)));
    }

    #[tokio::test]
    async fn test_oversized_grid_is_decode_error() {
        let source = StaticSource(
            br#"{"width":4294967296,"height":4294967296,
                "transform":{"origin_lon":0,"origin_lat":1,"pixel_width":1,"pixel_height":1},
                "values":[]}"#,
        );
        let err = load_raster(&source, &JsonGridDecoder).await.unwrap_err();
        assert!(matches!(err, RadarError::Decode(_)));
    }

    #[tokio::test]
    async fn test_missing_file_is_fetch_error() {
        let source = FileSource::new("/nonexistent/radar.json");
        let err = load_raster(&source, &JsonGridDecoder).await.unwrap_err();
        assert!(matches!(err, RadarError::Fetch(_)));
    }

    #[test]
    fn test_source_for_url() {
        let timeout = Duration::from_secs(1);
        assert_eq!(
            source_for("https://example.com/r.json", timeout).unwrap().describe(),
            "https://example.com/r.json"
        );
        assert_eq!(source_for("data/r.json", timeout).unwrap().describe(), "data/r.json");
    }

    #[test]
    fn test_source_for_empty_is_config_error() {
        let err = source_for("  ", Duration::from_secs(1)).err().unwrap();
        assert!(matches!(err, RadarError::Config(_)));
        assert!(!err.is_load_failure());
    }
}
