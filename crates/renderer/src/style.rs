//! Ramp configuration as it appears in configuration files.

use radar_common::{RadarError, RadarResult};
use serde::{Deserialize, Serialize};

use crate::ramp::{Color, ColorRamp, ColorRampEntry};

/// Color as written in configuration: `[r, g, b]` or `"#RRGGBB"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorSpec {
    Array([u8; 3]),
    Hex(String),
}

impl ColorSpec {
    pub fn to_color(&self) -> RadarResult<Color> {
        match self {
            ColorSpec::Array([r, g, b]) => Ok(Color::rgb(*r, *g, *b)),
            ColorSpec::Hex(s) => hex_to_rgb(s)
                .map(|(r, g, b)| Color::rgb(r, g, b))
                .ok_or_else(|| RadarError::InvalidRamp(format!("invalid hex color '{}'", s))),
        }
    }
}

/// One `(threshold, color)` row of a configured ramp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RampStep {
    pub threshold: f64,
    pub color: ColorSpec,
}

/// Ordered ramp table, highest threshold first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RampConfig {
    pub steps: Vec<RampStep>,
}

impl RampConfig {
    /// Validate and convert into a [`ColorRamp`].
    pub fn build(&self) -> RadarResult<ColorRamp> {
        let entries = self
            .steps
            .iter()
            .map(|step| Ok(ColorRampEntry::new(step.threshold, step.color.to_color()?)))
            .collect::<RadarResult<Vec<_>>>()?;
        ColorRamp::new(entries)
    }
}

impl Default for RampConfig {
    fn default() -> Self {
        let steps = REFLECTIVITY_STEPS
            .iter()
            .map(|&(threshold, color)| RampStep {
                threshold,
                color: ColorSpec::Array(color),
            })
            .collect();
        Self { steps }
    }
}

/// Reflectivity (dBZ) steps used by the national radar composite.
const REFLECTIVITY_STEPS: [(f64, [u8; 3]); 13] = [
    (84.0, [240, 240, 240]),
    (78.0, [128, 0, 128]),
    (72.0, [200, 0, 90]),
    (66.0, [255, 0, 0]),
    (60.0, [255, 127, 0]),
    (54.0, [255, 187, 0]),
    (48.0, [255, 255, 0]),
    (42.0, [0, 255, 0]),
    (36.0, [0, 192, 0]),
    (30.0, [67, 131, 35]),
    (24.0, [0, 252, 252]),
    (18.0, [0, 148, 252]),
    (12.0, [0, 0, 252]),
];

/// The default reflectivity ramp.
pub fn reflectivity_ramp() -> RadarResult<ColorRamp> {
    RampConfig::default().build()
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#FF0000"), Some((255, 0, 0)));
        assert_eq!(hex_to_rgb("0094FC"), Some((0, 148, 252)));
        assert_eq!(hex_to_rgb("#GGGGGG"), None);
        assert_eq!(hex_to_rgb("#FFF"), None);
    }

    #[test]
    fn test_reflectivity_ramp_from_default_table() {
        let ramp = reflectivity_ramp().unwrap();
        assert_eq!(ramp.len(), 13);
        assert_eq!(ramp.entries()[0].threshold, 84.0);
        assert_eq!(ramp.lowest_threshold(), 12.0);
        assert_eq!(ramp, RampConfig::default().build().unwrap());
    }

    #[test]
    fn test_mixed_color_specs() {
        let json = r##"[
            {"threshold": 50, "color": "#FFFF00"},
            {"threshold": 10, "color": [0, 0, 252]}
        ]"##;
        let config: RampConfig = serde_json::from_str(json).unwrap();
        let ramp = config.build().unwrap();
        assert_eq!(ramp.entries()[0].color, Color::rgb(255, 255, 0));
        assert_eq!(ramp.entries()[1].color, Color::rgb(0, 0, 252));
    }

    #[test]
    fn test_bad_hex_is_ramp_error() {
        let config = RampConfig {
            steps: vec![RampStep {
                threshold: 1.0,
                color: ColorSpec::Hex("blue".to_string()),
            }],
        };
        assert!(matches!(config.build(), Err(RadarError::InvalidRamp(_))));
    }
}
