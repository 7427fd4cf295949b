//! Per-map analyses built from the selection, alignment and aggregation stages

use crate::analysis::features::{hold_steepness, setpoint_height};
use crate::analysis::{Alignment, EnsembleAggregator, EnsembleStatistic, PhaseWindow, WindowSamples};
use crate::io::configuration::{AnalysisConfig, METRES_TO_MICROMETRES};
use crate::io::error::{Result, invalid_parameter};
use crate::io::export::{CurveTable, SetpointRecord, SlopeRecord, SlopeSummaryRecord};
use crate::math::statistics::summarize;
use crate::model::metadata::IMAGING_MODE;
use crate::model::{Channel, Curve, ForceMap, Phase};
use crate::pipeline::selection::MapSelection;
use crate::spatial::GridPlacement;
use ndarray::Array2;
use std::collections::BTreeMap;

/// Ensemble key for phase averages: experimental group and phase
pub type GroupPhase = (String, Phase);

/// Unit system for exported curves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Units {
    /// Newtons and metres
    #[default]
    Si,
    /// Nanonewtons and nanometres
    NmNn,
}

impl Units {
    const fn scale(self) -> f64 {
        match self {
            Self::Si => 1.0,
            Self::NmNn => 1e9,
        }
    }

    /// Force and indentation column names
    pub const fn column_names(self) -> (&'static str, &'static str) {
        match self {
            Self::Si => ("force_N", "indentation_m"),
            Self::NmNn => ("force_nN", "indentation_nm"),
        }
    }
}

/// Setpoint height of every placed curve as a `(ny, nx)` image, NaN where no value exists
pub fn setpoint_image(map: &ForceMap, placement: &GridPlacement) -> Array2<f64> {
    let mut image = Array2::from_elem(placement.shape().dim(), f64::NAN);
    for (index, cell) in placement.placed() {
        let height = map.curve(index).and_then(setpoint_height);
        if let (Some(height), Some(slot)) = (height, image.get_mut(cell.index())) {
            *slot = height;
        }
    }
    image
}

/// One record per grid cell of a setpoint image, row by row
pub fn setpoint_records(image: &Array2<f64>) -> Vec<SetpointRecord> {
    image
        .indexed_iter()
        .map(|((y, x), &height)| SetpointRecord {
            x,
            y,
            setpoint_height_m: height,
        })
        .collect()
}

fn phase_samples(curve: &Curve, phase: Phase, min_samples: usize, values: &[f64]) -> Option<WindowSamples> {
    PhaseWindow::from_curve(curve, phase, min_samples)
        .map(|window| WindowSamples::from_window(&window, curve.time(), values))
}

/// Hold-phase height of every component, aligned on absolute time
///
/// Each component is its own ensemble with its own time axis. Components whose
/// curves share no positive time span are left out.
pub fn hold_component_curves(
    map: &ForceMap,
    selection: &MapSelection,
    config: &AnalysisConfig,
) -> Vec<(u32, EnsembleStatistic)> {
    let alignment = Alignment::AbsoluteTime {
        points: config.time_points,
    };
    let mut aggregator = EnsembleAggregator::new();

    for id in selection.components().ids() {
        let members = selection.component_members(id);
        let windows: Vec<WindowSamples> = members
            .iter()
            .filter_map(|&index| map.curve(index))
            .filter_map(|curve| {
                phase_samples(curve, Phase::Hold, config.minimums.resample, curve.height_measured())
            })
            .collect();

        let Some(ensemble) = alignment.align(&windows) else {
            log::debug!(
                "{} component {id}: no common hold span over {} curves",
                map.name(),
                members.len()
            );
            continue;
        };
        let accepted = aggregator.extend(id, &ensemble);
        log::debug!(
            "{} component {id}: {accepted} of {} curves aligned ({} lack a hold phase, {} discarded)",
            map.name(),
            members.len(),
            members.len() - windows.len(),
            ensemble.discarded()
        );
    }

    aggregator
        .finish()
        .into_iter()
        .map(|(&id, stat)| (id, stat))
        .collect()
}

/// Add the masked curves of one map to per-group, per-phase progress ensembles
///
/// Returns the number of series accepted across all phases.
pub fn collect_phase_average(
    map: &ForceMap,
    selection: &MapSelection,
    config: &AnalysisConfig,
    channel: Channel,
    aggregator: &mut EnsembleAggregator<GroupPhase>,
) -> usize {
    let group = map.group_label(&config.group_tokens);
    let selected = selection.selected();
    let columns: Vec<(&Curve, Vec<f64>)> = selected
        .iter()
        .filter_map(|&index| Some((map.curve(index)?, map.channel(index, channel)?)))
        .collect();

    let mut accepted = 0;
    for phase in Phase::ALL {
        let windows: Vec<WindowSamples> = columns
            .iter()
            .filter_map(|(curve, values)| {
                phase_samples(curve, phase, config.minimums.resample, values)
            })
            .collect();
        let alignment = Alignment::IndexNormalized {
            length: config.resample_lengths.for_phase(phase),
        };
        if let Some(ensemble) = alignment.align(&windows) {
            log::debug!(
                "{} {phase}: {} of {} masked curves resampled ({} lack the phase, {} discarded)",
                map.name(),
                ensemble.aligned().count(),
                selected.len(),
                selected.len() - windows.len(),
                ensemble.discarded()
            );
            accepted += aggregator.extend((group.clone(), phase), &ensemble);
        }
    }
    accepted
}

/// Hold steepness of every masked curve
pub fn steepness_records(
    map: &ForceMap,
    selection: &MapSelection,
    config: &AnalysisConfig,
) -> Vec<SlopeRecord> {
    let group = map.group_label(&config.group_tokens);
    let selected = selection.selected();
    let records: Vec<SlopeRecord> = selected
        .iter()
        .filter_map(|&index| {
            let slope = hold_steepness(map.curve(index)?, &config.minimums)?;
            Some(SlopeRecord {
                file: map.name().to_string(),
                group: group.clone(),
                curve: index,
                slope_m_per_s: slope,
                slope_um_per_s: slope * METRES_TO_MICROMETRES,
            })
        })
        .collect();

    log::debug!(
        "{}: {} of {} masked curves have a hold slope",
        map.name(),
        records.len(),
        selected.len()
    );
    records
}

/// Distribution summary of slopes per group, in group order
pub fn summarize_slopes(records: &[SlopeRecord]) -> Vec<SlopeSummaryRecord> {
    let mut groups: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.group.as_str())
            .or_default()
            .push(record.slope_um_per_s);
    }

    groups
        .into_iter()
        .filter_map(|(group, slopes)| {
            let summary = summarize(&slopes)?;
            Some(SlopeSummaryRecord {
                group: group.to_string(),
                n: summary.count,
                mean_um_per_s: summary.mean,
                std_um_per_s: summary.std,
                q1_um_per_s: summary.q1,
                median_um_per_s: summary.median,
                q3_um_per_s: summary.q3,
            })
        })
        .collect()
}

/// Time, force, indentation and segment of one curve in the requested units
///
/// # Errors
///
/// Returns an error if the map has no curve at `index`
pub fn curve_table(map: &ForceMap, index: usize, units: Units) -> Result<CurveTable> {
    let curve = map
        .curve(index)
        .ok_or_else(|| invalid_parameter("idx", &index, &format!("map has {} curves", map.len())))?;

    let scale = units.scale();
    let (force_name, indentation_name) = units.column_names();
    Ok(CurveTable {
        force_name,
        indentation_name,
        time: curve.time().to_vec(),
        force: curve.force().iter().map(|f| f * scale).collect(),
        indentation: curve.indentation().iter().map(|d| d * scale).collect(),
        segment: curve.segment().to_vec(),
    })
}

/// One-line description of a curve's acquisition settings
///
/// Settings missing from the curve fall back to the map; absent values read `n/a`.
pub fn curve_summary(map: &ForceMap, index: usize) -> Option<String> {
    let curve = map.curve(index)?;
    let fallback = map.experiment_metadata();
    let number = |value: Option<f64>| value.map_or_else(|| "n/a".to_string(), |v| v.to_string());

    let mode = curve
        .metadata()
        .text(IMAGING_MODE)
        .or_else(|| fallback.text(IMAGING_MODE))
        .unwrap_or_else(|| "n/a".to_string());
    let sensitivity = curve
        .metadata()
        .sensitivity()
        .or_else(|| fallback.sensitivity());

    Some(format!(
        "{} curve {index}: {} samples, mode {mode}, spring constant {} N/m, sensitivity {} m/V",
        map.name(),
        curve.len(),
        number(map.spring_constant(curve)),
        number(sensitivity)
    ))
}
