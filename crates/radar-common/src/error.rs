//! Error types for the radar overlay crates.

use thiserror::Error;

/// Result type alias using RadarError.
pub type RadarResult<T> = Result<T, RadarError>;

/// Primary error type for classification, sampling and overlay loading.
#[derive(Debug, Clone, Error)]
pub enum RadarError {
    // === Configuration Errors ===
    #[error("Invalid color ramp: {0}")]
    InvalidRamp(String),

    #[error("Configuration error: {0}")]
    Config(String),

    // === Data Errors ===
    #[error("Invalid raster grid: {0}")]
    InvalidGrid(String),

    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    // === Load Errors ===
    #[error("Failed to fetch raster: {0}")]
    Fetch(String),

    #[error("Failed to decode raster: {0}")]
    Decode(String),

    // === Rendering Errors ===
    #[error("Rendering failed: {0}")]
    Render(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl RadarError {
    /// Whether this error happened while loading the raster.
    ///
    /// Load failures leave the overlay detached but keep the base map usable.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            RadarError::Fetch(_) | RadarError::Decode(_) | RadarError::InvalidGrid(_)
        )
    }

    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            RadarError::InvalidSample(_) => 400,
            RadarError::Fetch(_) | RadarError::Decode(_) | RadarError::InvalidGrid(_) => 503,
            _ => 500,
        }
    }
}

impl From<std::io::Error> for RadarError {
    fn from(err: std::io::Error) -> Self {
        RadarError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for RadarError {
    fn from(err: serde_json::Error) -> Self {
        RadarError::Decode(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_failures() {
        assert!(RadarError::Fetch("404 Not Found".into()).is_load_failure());
        assert!(RadarError::Decode("truncated".into()).is_load_failure());
        assert!(!RadarError::InvalidSample("NaN".into()).is_load_failure());
        assert!(!RadarError::InvalidRamp("empty".into()).is_load_failure());
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(RadarError::InvalidSample("NaN".into()).http_status_code(), 400);
        assert_eq!(RadarError::Fetch("timeout".into()).http_status_code(), 503);
        assert_eq!(RadarError::Render("zlib".into()).http_status_code(), 500);
    }
}
