//! Error types and context management for force-map analysis

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for all analysis operations
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Failed to read or parse a force-map file
    #[error("Failed to load force map '{}': {source}", .path.display())]
    MapLoad {
        /// Path to the map file
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },

    /// Failed to load a mask raster from filesystem
    #[error("Failed to load image '{}': {source}", .path.display())]
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    #[error("Failed to export image to '{}': {source}", .path.display())]
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// Failed to write a CSV table
    #[error("Failed to write CSV '{}': {source}", .path.display())]
    CsvExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// General file system operation failure
    #[error("File system error during {operation} on '{}': {source}", .path.display())]
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A required metadata field is absent or not numeric
    #[error("Missing metadata field '{field}'")]
    MissingMetadata {
        /// Metadata key that was looked up
        field: &'static str,
    },

    /// Mask raster does not match the grid of the map it is applied to
    ///
    /// Shapes are given as (rows, cols), i.e. (ny, nx)
    #[error("Mask shape {mask:?} != grid shape {grid:?}")]
    MaskShapeMismatch {
        /// Shape of the mask
        mask: (usize, usize),
        /// Shape declared by the map metadata
        grid: (usize, usize),
    },

    /// No mask raster could be found for a map
    #[error("Mask not found for '{base}' in '{}'", .directory.display())]
    MaskNotFound {
        /// Map base name used for the lookup
        base: String,
        /// Directory that was searched
        directory: PathBuf,
    },

    /// Source data doesn't meet analysis requirements
    #[error("Invalid source data: {reason}")]
    InvalidSourceData {
        /// Description of what's wrong with the source data
        reason: String,
    },

    /// Parameter validation failed
    #[error("Invalid parameter '{parameter}' = '{value}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },
}

/// Convenience type alias for analysis results
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AnalysisError {
    AnalysisError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error bound to a path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> AnalysisError {
    AnalysisError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
