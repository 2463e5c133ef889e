//! Catalog and model loading.
//!
//! The catalog seed is loaded once at startup and turned into the view state
//! controller. Models are loaded on demand into a single slot that follows the
//! active artifact.

/// Seed asset loading and controller installation.
pub mod catalog_loader;

/// Single-slot model loading, superseding and auto-fit.
pub mod model_loader;

/// Loading progress tracking resource for state transitions.
pub mod progress;
