//! Ensemble mean/std/count of aligned series, grouped by a caller-chosen key

use crate::analysis::resampling::{AlignedEnsemble, SharedAxis};
use crate::math::statistics::finite_mean_std;
use ndarray::Array2;
use std::collections::BTreeMap;

/// Per-axis-sample statistics over an ensemble of aligned series
#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleStatistic {
    /// Axis the statistics are sampled on
    pub axis: SharedAxis,
    /// Mean of the finite values at each axis sample
    pub mean: Vec<f64>,
    /// Population standard deviation of the finite values at each axis sample
    pub std: Vec<f64>,
    /// Number of series with a finite value at each axis sample
    pub count: Vec<usize>,
    /// Number of series stacked into the ensemble
    pub series_count: usize,
}

/// Stack equal-length series and reduce every column ignoring NaNs
///
/// Series whose length differs from the axis are left out. A series missing a
/// value at one axis sample still contributes at every other sample. Returns
/// `None` when no series remains.
pub fn aggregate<S: AsRef<[f64]>>(axis: &SharedAxis, series: &[S]) -> Option<EnsembleStatistic> {
    let width = axis.len();
    let rows: Vec<&[f64]> = series
        .iter()
        .map(<S as AsRef<[f64]>>::as_ref)
        .filter(|s| s.len() == width)
        .collect();
    if rows.is_empty() || width == 0 {
        return None;
    }

    let flat: Vec<f64> = rows.iter().flat_map(|s| s.iter().copied()).collect();
    let matrix = Array2::from_shape_vec((rows.len(), width), flat).ok()?;

    let mut mean = Vec::with_capacity(width);
    let mut std = Vec::with_capacity(width);
    let mut count = Vec::with_capacity(width);
    for column in matrix.columns() {
        let (m, s, n) = finite_mean_std(column.iter());
        mean.push(m);
        std.push(s);
        count.push(n);
    }

    Some(EnsembleStatistic {
        axis: axis.clone(),
        mean,
        std,
        count,
        series_count: rows.len(),
    })
}

/// Aggregate every aligned series of an ensemble
pub fn aggregate_ensemble(ensemble: &AlignedEnsemble) -> Option<EnsembleStatistic> {
    let series: Vec<&[f64]> = ensemble.aligned().collect();
    aggregate(&ensemble.axis, &series)
}

#[derive(Debug, Clone)]
struct GroupSeries {
    axis: SharedAxis,
    series: Vec<Vec<f64>>,
}

/// Append-only accumulator of aligned series per group key
///
/// Groups never merge: every key owns its series and its axis. Series arrive in
/// the order they are pushed, which keeps results reproducible.
#[derive(Debug, Clone)]
pub struct EnsembleAggregator<K: Ord> {
    groups: BTreeMap<K, GroupSeries>,
}

impl<K: Ord> Default for EnsembleAggregator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> EnsembleAggregator<K> {
    /// Create an empty aggregator
    pub const fn new() -> Self {
        Self {
            groups: BTreeMap::new(),
        }
    }

    /// Append one series to a group
    ///
    /// The first series fixes the group's axis. Returns `false` and drops the
    /// series when its axis disagrees with the group's.
    pub fn push(&mut self, key: K, axis: &SharedAxis, series: Vec<f64>) -> bool {
        if series.len() != axis.len() {
            return false;
        }
        let group = self.groups.entry(key).or_insert_with(|| GroupSeries {
            axis: axis.clone(),
            series: Vec::new(),
        });
        if group.axis != *axis {
            return false;
        }
        group.series.push(series);
        true
    }

    /// Append every aligned series of an ensemble to a group
    ///
    /// Returns how many series were accepted.
    pub fn extend(&mut self, key: K, ensemble: &AlignedEnsemble) -> usize
    where
        K: Clone,
    {
        let mut accepted = 0;
        for series in ensemble.aligned() {
            if self.push(key.clone(), &ensemble.axis, series.to_vec()) {
                accepted += 1;
            }
        }
        accepted
    }

    /// Number of series collected for a group
    pub fn series_count(&self, key: &K) -> usize {
        self.groups.get(key).map_or(0, |group| group.series.len())
    }

    /// Whether no series has been collected
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Reduce every group to its ensemble statistic, in key order
    pub fn finish(&self) -> Vec<(&K, EnsembleStatistic)> {
        self.groups
            .iter()
            .filter_map(|(key, group)| aggregate(&group.axis, &group.series).map(|stat| (key, stat)))
            .collect()
    }
}
