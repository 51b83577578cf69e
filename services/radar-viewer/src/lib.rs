//! Radar overlay viewer service.
//!
//! Loads a reflectivity raster, classifies it with the configured color
//! ramp and serves the overlay plus point queries to a slippy map front end.

pub mod config;
pub mod handlers;
pub mod loader;
pub mod state;

use axum::{extract::Extension, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use state::AppState;

/// Build the HTTP router over shared state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health_handler))
        .route("/map-config", get(handlers::map_config_handler))
        .route("/overlay.png", get(handlers::overlay_handler))
        .route("/feature-info", get(handlers::feature_info_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
