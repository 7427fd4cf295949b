//! Curve-collection providers that turn files into force maps
//!
//! The shipped provider reads JSON exports with one object per map:
//!
//! ```json
//! {
//!   "metadata": { "grid shape x": 3, "grid shape y": 2, "spring constant": 0.1 },
//!   "curves": [
//!     {
//!       "metadata": { "grid index x": 0, "grid index y": 0 },
//!       "time": [0.0, 0.001],
//!       "force": [0.0, 1e-9],
//!       "height (measured)": [1e-6, 0.9e-6],
//!       "height (piezo)": [1e-6, 0.95e-6],
//!       "segment": [0, 0]
//!     }
//!   ]
//! }
//! ```
//!
//! `null` samples are read as NaN.

use crate::io::error::{AnalysisError, Result, file_system_error};
use crate::model::{Curve, ForceMap, Metadata};
use serde::Deserialize;
use std::path::Path;

/// Source of force maps
pub trait CurveProvider {
    /// Load the map stored at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a valid map
    fn load(&self, path: &Path) -> Result<ForceMap>;
}

/// Provider for JSON force-map exports
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCurveProvider;

#[derive(Debug, Deserialize)]
struct RawMap {
    #[serde(default)]
    metadata: Metadata,
    curves: Vec<RawCurve>,
}

#[derive(Debug, Deserialize)]
struct RawCurve {
    #[serde(default)]
    metadata: Metadata,
    time: Vec<Option<f64>>,
    force: Vec<Option<f64>>,
    #[serde(rename = "height (measured)")]
    height_measured: Vec<Option<f64>>,
    #[serde(rename = "height (piezo)")]
    height_piezo: Vec<Option<f64>>,
    segment: Vec<i64>,
}

fn nan_for_null(column: Vec<Option<f64>>) -> Vec<f64> {
    column.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

impl JsonCurveProvider {
    /// Parse a map from JSON text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid map or a curve has ragged columns
    pub fn parse(name: &str, path: &Path, text: &str) -> Result<ForceMap> {
        let raw: RawMap = serde_json::from_str(text).map_err(|e| AnalysisError::MapLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::build(name, raw)
    }

    fn build(name: &str, raw: RawMap) -> Result<ForceMap> {
        let curves = raw
            .curves
            .into_iter()
            .enumerate()
            .map(|(index, curve)| {
                Curve::new(
                    nan_for_null(curve.time),
                    nan_for_null(curve.force),
                    nan_for_null(curve.height_measured),
                    nan_for_null(curve.height_piezo),
                    curve.segment,
                    curve.metadata,
                )
                .map_err(|err| AnalysisError::InvalidSourceData {
                    reason: format!("curve {index}: {err}"),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ForceMap::new(name.to_string(), raw.metadata, curves))
    }
}

impl CurveProvider for JsonCurveProvider {
    fn load(&self, path: &Path) -> Result<ForceMap> {
        let text =
            std::fs::read_to_string(path).map_err(|e| file_system_error(path, "read map", e))?;
        Self::parse(&map_name(path), path, &text)
    }
}

/// Map name derived from a file path (the file stem)
pub fn map_name(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}
