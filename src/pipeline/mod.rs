//! Batch stages that turn force maps and masks into analysis results
//!
//! - Discovery of map files and mask rasters
//! - Curve selection by mask and connected component
//! - Per-map analyses (setpoint image, hold curves, phase averages, steepness)

/// Map and mask file discovery
pub mod discovery;
/// Mask-based curve selection
pub mod selection;
/// Per-map analyses
pub mod tasks;

pub use discovery::{collect_maps, find_mask};
pub use selection::MapSelection;
pub use tasks::{GroupPhase, Units};
