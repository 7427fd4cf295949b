//! CSV tables for ensemble curves, scalar features and single-curve exports

use crate::analysis::ensemble::EnsembleStatistic;
use crate::io::error::{AnalysisError, Result, file_system_error};
use serde::Serialize;
use std::path::Path;

fn csv_error(path: &Path, source: csv::Error) -> AnalysisError {
    AnalysisError::CsvExport {
        path: path.to_path_buf(),
        source,
    }
}

fn create_writer(path: &Path) -> Result<csv::Writer<std::fs::File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }
    csv::Writer::from_path(path).map_err(|e| csv_error(path, e))
}

/// Write serializable records with a header derived from their fields
///
/// # Errors
///
/// Returns `CsvExport` if the file cannot be created or a record fails to serialize
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = create_writer(path)?;
    for record in records {
        writer.serialize(record).map_err(|e| csv_error(path, e))?;
    }
    writer
        .flush()
        .map_err(|e| file_system_error(path, "flush CSV", e))
}

/// Identifying columns repeated on every row of an ensemble table
pub type KeyColumns<'a> = [(&'a str, String)];

/// Write an ensemble statistic, one row per axis sample
///
/// Columns are the key columns, the axis column, `<value>_mean`, `<value>_std`,
/// `count` (finite contributions at that sample) and `n_curves`. Mean and std are
/// multiplied by `scale`.
///
/// # Errors
///
/// Returns `CsvExport` if the file cannot be written
pub fn write_ensemble(
    path: &Path,
    keys: &KeyColumns<'_>,
    value_name: &str,
    scale: f64,
    stat: &EnsembleStatistic,
) -> Result<()> {
    let mut writer = create_writer(path)?;

    let mean_name = format!("{value_name}_mean");
    let std_name = format!("{value_name}_std");
    let mut header: Vec<&str> = keys.iter().map(|(name, _)| *name).collect();
    header.extend([
        stat.axis.kind.column_name(),
        mean_name.as_str(),
        std_name.as_str(),
        "count",
        "n_curves",
    ]);
    writer
        .write_record(&header)
        .map_err(|e| csv_error(path, e))?;

    let rows = stat
        .axis
        .points
        .iter()
        .zip(&stat.mean)
        .zip(&stat.std)
        .zip(&stat.count);
    for (((axis, mean), std), count) in rows {
        let mut record: Vec<String> = keys.iter().map(|(_, value)| value.clone()).collect();
        record.extend([
            axis.to_string(),
            (mean * scale).to_string(),
            (std * scale).to_string(),
            count.to_string(),
            stat.series_count.to_string(),
        ]);
        writer
            .write_record(&record)
            .map_err(|e| csv_error(path, e))?;
    }

    writer
        .flush()
        .map_err(|e| file_system_error(path, "flush CSV", e))
}

/// Hold steepness of one curve
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlopeRecord {
    /// Map name
    pub file: String,
    /// Experimental group label
    pub group: String,
    /// Curve index within the map
    pub curve: usize,
    /// Slope in metres per second
    pub slope_m_per_s: f64,
    /// Slope in micrometres per second
    pub slope_um_per_s: f64,
}

/// Distribution summary of slopes in one group (micrometres per second)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlopeSummaryRecord {
    /// Experimental group label
    pub group: String,
    /// Number of curves
    pub n: usize,
    /// Mean slope
    pub mean_um_per_s: f64,
    /// Population standard deviation
    pub std_um_per_s: f64,
    /// First quartile
    pub q1_um_per_s: f64,
    /// Median
    pub median_um_per_s: f64,
    /// Third quartile
    pub q3_um_per_s: f64,
}

/// Setpoint height of one grid cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetpointRecord {
    /// Grid column
    pub x: usize,
    /// Grid row
    pub y: usize,
    /// Measured height at the end of approach, metres
    pub setpoint_height_m: f64,
}

/// Columns of a single exported curve
#[derive(Debug, Clone, PartialEq)]
pub struct CurveTable {
    /// Force column header, e.g. `force_N`
    pub force_name: &'static str,
    /// Indentation column header, e.g. `indentation_m`
    pub indentation_name: &'static str,
    /// Sample times in seconds
    pub time: Vec<f64>,
    /// Scaled force
    pub force: Vec<f64>,
    /// Scaled indentation
    pub indentation: Vec<f64>,
    /// Segment label per sample
    pub segment: Vec<i64>,
}

/// Write one curve as `time_s, <force>, <indentation>, segment`
///
/// # Errors
///
/// Returns `CsvExport` if the file cannot be written
pub fn write_curve(path: &Path, table: &CurveTable) -> Result<()> {
    let mut writer = create_writer(path)?;
    writer
        .write_record(["time_s", table.force_name, table.indentation_name, "segment"])
        .map_err(|e| csv_error(path, e))?;

    let rows = table
        .time
        .iter()
        .zip(&table.force)
        .zip(&table.indentation)
        .zip(&table.segment);
    for (((time, force), indentation), segment) in rows {
        writer
            .write_record([
                time.to_string(),
                force.to_string(),
                indentation.to_string(),
                segment.to_string(),
            ])
            .map_err(|e| csv_error(path, e))?;
    }

    writer
        .flush()
        .map_err(|e| file_system_error(path, "flush CSV", e))
}
