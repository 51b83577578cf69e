//! Stepped color ramp classification.
//!
//! A [`ColorRamp`] is a piecewise-constant mapping from a scalar value to a
//! color. Entries are stored by strictly decreasing threshold and each entry
//! covers `[threshold, previous_threshold)`; the first entry is unbounded
//! above. Values below the last threshold fall off the ramp and are not
//! painted.

use radar_common::grid::matches_no_data;
use radar_common::{RadarError, RadarResult};
use serde::Serialize;

/// Color value in RGBA format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn transparent() -> Self {
        Self { r: 0, g: 0, b: 0, a: 0 }
    }

    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// One step of the ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorRampEntry {
    /// Inclusive lower bound of the bucket.
    pub threshold: f64,
    pub color: Color,
}

impl ColorRampEntry {
    pub fn new(threshold: f64, color: Color) -> Self {
        Self { threshold, color }
    }
}

/// Why a value was not painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransparentReason {
    /// The value is the raster's no-data sentinel.
    NoData,
    /// The value is below the lowest threshold.
    BelowRamp,
}

/// Result of classifying one value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classified {
    /// Painted with the color of ramp entry `bucket`.
    Color { bucket: usize, color: Color },
    Transparent(TransparentReason),
}

impl Classified {
    pub fn color(&self) -> Option<Color> {
        match self {
            Classified::Color { color, .. } => Some(*color),
            Classified::Transparent(_) => None,
        }
    }

    /// Index of the chosen ramp entry. Lower index means higher values.
    pub fn bucket(&self) -> Option<usize> {
        match self {
            Classified::Color { bucket, .. } => Some(*bucket),
            Classified::Transparent(_) => None,
        }
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Classified::Transparent(_))
    }

    /// RGBA bytes; transparent results are `[0, 0, 0, 0]`.
    pub fn to_rgba(&self) -> [u8; 4] {
        self.color().unwrap_or_else(Color::transparent).to_rgba()
    }
}

/// Legend row for one ramp entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub label: String,
    pub min: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub color: Color,
}

/// Ordered, validated color ramp.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorRamp {
    entries: Vec<ColorRampEntry>,
}

impl ColorRamp {
    /// Build a ramp from entries ordered by descending threshold.
    ///
    /// Rejects an empty table, non-finite thresholds and any pair of
    /// neighbours that is not strictly decreasing.
    pub fn new(entries: Vec<ColorRampEntry>) -> RadarResult<Self> {
        if entries.is_empty() {
            return Err(RadarError::InvalidRamp(
                "ramp must have at least one entry".to_string(),
            ));
        }

        for (i, entry) in entries.iter().enumerate() {
            if !entry.threshold.is_finite() {
                return Err(RadarError::InvalidRamp(format!(
                    "threshold at position {} is not finite: {}",
                    i, entry.threshold
                )));
            }
        }

        for pair in entries.windows(2) {
            if pair[1].threshold >= pair[0].threshold {
                return Err(RadarError::InvalidRamp(format!(
                    "thresholds must be strictly decreasing, found {} after {}",
                    pair[1].threshold, pair[0].threshold
                )));
            }
        }

        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ColorRampEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Threshold of the bottom bucket.
    pub fn lowest_threshold(&self) -> f64 {
        // Non-empty by construction
        self.entries[self.entries.len() - 1].threshold
    }

    /// Classify a value against this ramp.
    ///
    /// The no-data check runs first. NaN that is not the sentinel is an
    /// invalid sample and is never painted.
    pub fn classify(&self, value: f64, no_data: Option<f64>) -> RadarResult<Classified> {
        if matches_no_data(value, no_data) {
            return Ok(Classified::Transparent(TransparentReason::NoData));
        }

        if value.is_nan() {
            return Err(RadarError::InvalidSample(
                "value is NaN and not the no-data sentinel".to_string(),
            ));
        }

        let hit = self
            .entries
            .iter()
            .enumerate()
            .find(|(_, entry)| value >= entry.threshold);

        Ok(match hit {
            Some((bucket, entry)) => Classified::Color {
                bucket,
                color: entry.color,
            },
            None => Classified::Transparent(TransparentReason::BelowRamp),
        })
    }

    /// Classify a sample that may be missing.
    ///
    /// A missing sample is only acceptable when the raster flags it; here
    /// there is nothing to compare, so it is rejected.
    pub fn classify_sample(
        &self,
        sample: Option<f64>,
        no_data: Option<f64>,
    ) -> RadarResult<Classified> {
        match sample {
            Some(value) => self.classify(value, no_data),
            None => Err(RadarError::InvalidSample(
                "sample is absent and not flagged as no-data".to_string(),
            )),
        }
    }

    /// One legend row per entry, top bucket first.
    pub fn legend(&self) -> Vec<LegendEntry> {
        let mut upper = None;
        self.entries
            .iter()
            .map(|entry| {
                let row = LegendEntry {
                    label: format!(">= {}", entry.threshold),
                    min: entry.threshold,
                    max: upper,
                    color: entry.color,
                };
                upper = Some(entry.threshold);
                row
            })
            .collect()
    }
}

/// Classify `value` against `ramp`, honouring the no-data sentinel.
pub fn classify(value: f64, no_data: Option<f64>, ramp: &ColorRamp) -> RadarResult<Classified> {
    ramp.classify(value, no_data)
}

/// Inputs for building a [`Classifier`].
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    pub ramp: ColorRamp,
}

/// Per-pixel classifier handed to the overlay renderer.
#[derive(Debug, Clone)]
pub struct Classifier {
    ramp: ColorRamp,
}

impl Classifier {
    pub fn new(config: ClassifierConfig) -> Self {
        Self { ramp: config.ramp }
    }

    pub fn ramp(&self) -> &ColorRamp {
        &self.ramp
    }

    pub fn classify(&self, value: f64, no_data: Option<f64>) -> RadarResult<Classified> {
        self.ramp.classify(value, no_data)
    }

    /// Pixel callback for a raster with the given sentinel.
    ///
    /// Invalid samples map to `None` so the caller can count and skip them.
    pub fn pixel_fn(&self, no_data: Option<f64>) -> impl Fn(f64) -> Option<[u8; 4]> + Sync + '_ {
        move |value| self.ramp.classify(value, no_data).ok().map(|c| c.to_rgba())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_step() -> ColorRamp {
        ColorRamp::new(vec![
            ColorRampEntry::new(30.0, Color::rgb(255, 0, 0)),
            ColorRampEntry::new(20.0, Color::rgb(0, 255, 0)),
            ColorRampEntry::new(10.0, Color::rgb(0, 0, 255)),
        ])
        .unwrap()
    }

    #[test]
    fn test_buckets() {
        let ramp = three_step();
        assert_eq!(ramp.classify(35.0, None).unwrap().bucket(), Some(0));
        assert_eq!(ramp.classify(29.999, None).unwrap().bucket(), Some(1));
        assert_eq!(ramp.classify(10.0, None).unwrap().bucket(), Some(2));
        assert_eq!(
            ramp.classify(9.0, None).unwrap(),
            Classified::Transparent(TransparentReason::BelowRamp)
        );
    }

    #[test]
    fn test_no_data_checked_before_ramp() {
        let ramp = three_step();
        // Sentinel inside the ramp range still wins
        assert_eq!(
            ramp.classify(20.0, Some(20.0)).unwrap(),
            Classified::Transparent(TransparentReason::NoData)
        );
    }

    #[test]
    fn test_rejects_unsorted() {
        let err = ColorRamp::new(vec![
            ColorRampEntry::new(10.0, Color::rgb(0, 0, 0)),
            ColorRampEntry::new(20.0, Color::rgb(0, 0, 0)),
        ])
        .unwrap_err();
        assert!(matches!(err, RadarError::InvalidRamp(_)));
    }

    #[test]
    fn test_legend_bounds() {
        let legend = three_step().legend();
        assert_eq!(legend.len(), 3);
        assert_eq!(legend[0].max, None);
        assert_eq!(legend[1].max, Some(30.0));
        assert_eq!(legend[2].label, ">= 10");
    }
}
