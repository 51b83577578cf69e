//! Color classification and overlay rendering for radar rasters.
//!
//! - [`ramp`]: stepped color ramp and the per-value classifier
//! - [`style`]: ramp tables as written in configuration
//! - [`overlay`]: classify a whole grid into an RGBA bitmap
//! - [`png`]: indexed/RGBA PNG encoding

pub mod overlay;
pub mod png;
pub mod ramp;
pub mod style;

pub use overlay::{render_overlay, OverlayImage};
pub use ramp::{
    classify, Classified, Classifier, ClassifierConfig, Color, ColorRamp, ColorRampEntry,
    LegendEntry, TransparentReason,
};
pub use style::{reflectivity_ramp, RampConfig};
