//! Spatially resolved analysis of atomic force microscopy force maps
//!
//! Curves acquired on a grid are placed on that grid, selected with annotation masks,
//! split into approach/hold/retract phases, aligned onto shared axes and reduced to
//! ensemble statistics and scalar features per region or experimental group.

#![forbid(unsafe_code)]

/// Phase extraction, alignment, ensemble statistics and scalar features
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Mathematical utilities for interpolation, regression and statistics
pub mod math;
/// Curve, map and metadata types
pub mod model;
/// Batch stages combining selection, alignment and export
pub mod pipeline;
/// Grid placement, masks and connected components
pub mod spatial;

pub use io::error::{AnalysisError, Result};
