//! Spatial data structures for force-map grids
//!
//! This module contains spatial-related functionality including:
//! - Curve placement on the map grid
//! - Raster-derived selection masks
//! - Connected-component labeling of masks

/// Connected-component labeling
pub mod components;
/// Curve coordinate resolution and validation
pub mod grid;
/// Raster to boolean mask conversion
pub mod mask;

pub use components::{ComponentLabels, label_components};
pub use grid::{GridCell, GridPlacement};
pub use mask::{Mask, Raster, SampleDepth, to_boolean_mask};
