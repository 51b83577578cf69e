//! HTTP handlers for the map front end.
//!
//! - `GET /health` - Health check
//! - `GET /map-config` - Base map settings, overlay bounds and legend
//! - `GET /overlay.png` - Classified overlay image
//! - `GET /feature-info` - Popup content for a clicked coordinate

use axum::{
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use radar_common::{GeoCoordinate, RadarError};
use raster_query::InfoFormat;
use renderer::LegendEntry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

/// GET /health - Basic health check
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Everything the map widget needs to set itself up.
#[derive(Debug, Serialize)]
pub struct MapConfigResponse {
    /// `[lat, lon]`
    pub center: [f64; 2],
    pub zoom: u8,
    pub tile_url: String,
    pub attribution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlay: Option<OverlayInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub load_error: Option<String>,
    pub legend: Vec<LegendEntry>,
}

#[derive(Debug, Serialize)]
pub struct OverlayInfo {
    pub url: String,
    /// `[[south, west], [north, east]]`
    pub bounds: [[f64; 2]; 2],
    pub opacity: f64,
}

/// GET /map-config
pub async fn map_config_handler(Extension(state): Extension<Arc<AppState>>) -> Json<MapConfigResponse> {
    let map = &state.config.map;
    let (overlay, load_error) = match state.ready() {
        Ok(overlay) => (
            Some(OverlayInfo {
                url: "/overlay.png".to_string(),
                bounds: overlay.bounds().to_lat_lon_corners(),
                opacity: 1.0,
            }),
            None,
        ),
        Err(e) => (None, Some(e.to_string())),
    };

    Json(MapConfigResponse {
        center: map.center,
        zoom: map.zoom,
        tile_url: map.tile_url.clone(),
        attribution: map.attribution.clone(),
        overlay,
        load_error,
        legend: state.classifier.ramp().legend(),
    })
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Error body for a detached overlay, status taken from the error kind.
fn unavailable(err: &RadarError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        Json(ErrorResponse {
            error: format!("Map layer could not be loaded: {}", err),
        }),
    )
        .into_response()
}

/// GET /overlay.png
pub async fn overlay_handler(Extension(state): Extension<Arc<AppState>>) -> Response {
    match state.ready() {
        Ok(overlay) => (
            [
                (header::CONTENT_TYPE, "image/png"),
                (header::CACHE_CONTROL, "max-age=300"),
            ],
            overlay.png(),
        )
            .into_response(),
        Err(e) => unavailable(e),
    }
}

/// Query parameters for /feature-info.
#[derive(Debug, Deserialize)]
pub struct FeatureInfoQuery {
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub format: Option<InfoFormat>,
}

/// GET /feature-info?lat=..&lon=..[&format=json|html|text]
///
/// 204 when there is nothing to show at the coordinate.
pub async fn feature_info_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<FeatureInfoQuery>,
) -> Response {
    if let Err(e) = state.ready() {
        return unavailable(e);
    }

    let coord = GeoCoordinate::new(params.lat, params.lon);
    let format = params.format.unwrap_or_default();

    let Some(info) = state.click_handler().feature_info(coord) else {
        debug!(lat = coord.lat, lon = coord.lon, "No value at click");
        return StatusCode::NO_CONTENT.into_response();
    };

    match info.render(format) {
        Ok(body) => ([(header::CONTENT_TYPE, format.to_mime())], body).into_response(),
        Err(e) => {
            warn!(error = %e, "Failed to serialize feature info");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
