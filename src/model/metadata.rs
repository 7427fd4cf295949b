//! Typed access to the loosely structured metadata attached to maps and curves

use crate::io::error::{AnalysisError, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Metadata key holding the number of grid columns
pub const GRID_SHAPE_X: &str = "grid shape x";
/// Metadata key holding the number of grid rows
pub const GRID_SHAPE_Y: &str = "grid shape y";
/// Metadata key holding a curve's explicit grid column
pub const GRID_INDEX_X: &str = "grid index x";
/// Metadata key holding a curve's explicit grid row
pub const GRID_INDEX_Y: &str = "grid index y";
/// Metadata key holding the cantilever spring constant (N/m)
pub const SPRING_CONSTANT: &str = "spring constant";
/// Metadata key holding the optical lever sensitivity (m/V)
pub const SENSITIVITY: &str = "sensitivity";
/// Metadata key holding the acquisition mode
pub const IMAGING_MODE: &str = "imaging mode";

/// Grid dimensions of a force map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridShape {
    /// Number of columns
    pub nx: usize,
    /// Number of rows
    pub ny: usize,
}

impl GridShape {
    /// Create a grid shape from column and row counts
    pub const fn new(nx: usize, ny: usize) -> Self {
        Self { nx, ny }
    }

    /// Shape in array order (rows, cols)
    pub const fn dim(&self) -> (usize, usize) {
        (self.ny, self.nx)
    }

    /// Total number of cells
    pub const fn cell_count(&self) -> usize {
        self.nx * self.ny
    }
}

/// Key/value metadata with typed lookups
///
/// Numbers may be stored as JSON numbers or numeric strings. Required lookups fail
/// with [`AnalysisError::MissingMetadata`] naming the key.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Metadata {
    entries: BTreeMap<String, Value>,
}

impl Metadata {
    /// Build metadata from key/value pairs
    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self {
            entries: pairs.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Whether no entries are present
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Optional floating-point field
    pub fn f64(&self, key: &str) -> Option<f64> {
        match self.entries.get(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Optional integer field; fractional values are truncated
    pub fn i64(&self, key: &str) -> Option<i64> {
        match self.entries.get(key)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|v| v.is_finite()).map(|v| v as i64)),
            Value::String(s) => {
                let trimmed = s.trim();
                trimmed.parse().ok().or_else(|| {
                    trimmed
                        .parse::<f64>()
                        .ok()
                        .filter(|v| v.is_finite())
                        .map(|v| v as i64)
                })
            }
            _ => None,
        }
    }

    /// Optional text field
    pub fn text(&self, key: &str) -> Option<String> {
        match self.entries.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    /// Required non-negative integer field
    ///
    /// # Errors
    ///
    /// Returns `MissingMetadata` when the key is absent, non-numeric or negative
    pub fn require_usize(&self, key: &'static str) -> Result<usize> {
        self.i64(key)
            .and_then(|v| usize::try_from(v).ok())
            .ok_or(AnalysisError::MissingMetadata { field: key })
    }

    /// Declared grid shape
    ///
    /// # Errors
    ///
    /// Returns `MissingMetadata` naming whichever of the two shape keys is missing
    pub fn grid_shape(&self) -> Result<GridShape> {
        let nx = self.require_usize(GRID_SHAPE_X)?;
        let ny = self.require_usize(GRID_SHAPE_Y)?;
        Ok(GridShape::new(nx, ny))
    }

    /// Explicit grid cell, present only when both indices are given
    pub fn grid_index(&self) -> Option<(i64, i64)> {
        Some((self.i64(GRID_INDEX_X)?, self.i64(GRID_INDEX_Y)?))
    }

    /// Cantilever spring constant in N/m
    pub fn spring_constant(&self) -> Option<f64> {
        self.f64(SPRING_CONSTANT)
    }

    /// Optical lever sensitivity in m/V
    pub fn sensitivity(&self) -> Option<f64> {
        self.f64(SENSITIVITY)
    }
}
