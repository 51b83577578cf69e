//! Click handling for value popups.
//!
//! Composes the sampler with no-data suppression and fixed two-decimal
//! formatting. Anything that should not be shown (outside the raster, the
//! no-data sentinel, a NaN cell) yields no popup at all.

use radar_common::grid::matches_no_data;
use radar_common::GeoCoordinate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sampler::{Sampled, Sampler};

/// Popup label used when none is configured.
pub const DEFAULT_LABEL: &str = "Valor";

/// Supported popup response formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum InfoFormat {
    /// application/json - Machine-readable JSON
    Json,
    /// text/html - Popup markup
    #[default]
    Html,
    /// text/plain - Bare popup text
    Text,
}

impl InfoFormat {
    /// Get MIME type string
    pub fn to_mime(&self) -> &'static str {
        match self {
            InfoFormat::Json => "application/json",
            InfoFormat::Html => "text/html; charset=utf-8",
            InfoFormat::Text => "text/plain; charset=utf-8",
        }
    }
}

/// Value found under a click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub location: GeoCoordinate,
    /// Raw sampled value
    pub value: f64,
    /// Value rounded for display
    pub formatted: String,
    pub label: String,
}

impl FeatureInfo {
    /// Plain popup text, e.g. `Valor: 45.30`.
    pub fn to_text(&self) -> String {
        format!("{}: {}", self.label, self.formatted)
    }

    /// Popup markup, e.g. `<b>Valor:</b> 45.30`.
    pub fn to_html(&self) -> String {
        format!("<b>{}:</b> {}", escape_html(&self.label), self.formatted)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Render in the requested format.
    pub fn render(&self, format: InfoFormat) -> Result<String, serde_json::Error> {
        match format {
            InfoFormat::Json => self.to_json(),
            InfoFormat::Html => Ok(self.to_html()),
            InfoFormat::Text => Ok(self.to_text()),
        }
    }
}

/// Format a sampled value with two decimals.
pub fn format_value(value: f64) -> String {
    format!("{:.2}", value)
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Turns map clicks into popup content.
#[derive(Debug, Clone)]
pub struct ClickHandler<'a> {
    sampler: Sampler<'a>,
    label: String,
}

impl<'a> ClickHandler<'a> {
    pub fn new(sampler: Sampler<'a>) -> Self {
        Self::with_label(sampler, DEFAULT_LABEL)
    }

    pub fn with_label(sampler: Sampler<'a>, label: impl Into<String>) -> Self {
        Self {
            sampler,
            label: label.into(),
        }
    }

    /// Popup data for a click, or `None` when nothing should be shown.
    pub fn feature_info(&self, coord: GeoCoordinate) -> Option<FeatureInfo> {
        let value = match self.sampler.sample(coord) {
            Sampled::Value(v) => v,
            Sampled::NoValue => {
                debug!(lat = coord.lat, lon = coord.lon, "Click outside raster");
                return None;
            }
        };

        if value.is_nan() || matches_no_data(value, self.sampler.no_data()) {
            debug!(lat = coord.lat, lon = coord.lon, value = value, "Click on no-data cell");
            return None;
        }

        Some(FeatureInfo {
            location: coord,
            value,
            formatted: format_value(value),
            label: self.label.clone(),
        })
    }

    /// Popup text for a click.
    pub fn on_click(&self, coord: GeoCoordinate) -> Option<String> {
        self.feature_info(coord).map(|info| info.to_text())
    }
}
