//! Input/output operations and error handling
//!
//! Providers turn files into force maps, exporters write tables and images, and
//! the command-line layer drives batches of maps through the pipeline.

/// Command-line interface and batch runner
pub mod cli;
/// Default constants and analysis configuration
pub mod configuration;
/// Error types
pub mod error;
/// CSV table export
pub mod export;
/// Raster loading and PNG export
pub mod image;
/// Batch progress display
pub mod progress;
/// Force-map providers
pub mod provider;
