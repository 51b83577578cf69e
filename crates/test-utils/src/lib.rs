//! Shared test utilities for the radar overlay workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic reflectivity grid generators
//! - Common test fixtures (extents, sentinels, coordinates)
//! - Temporary grid documents on disk
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
