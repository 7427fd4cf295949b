//! Splitting a curve into its acquisition phases
//!
//! Segment labels are trusted as recorded: a phase is every sample carrying its
//! label, in order, without checking that the samples are contiguous.

use crate::model::{Curve, Phase};
use std::ops::RangeInclusive;

/// All sample positions whose label equals the target phase, in order
pub fn extract(labels: &[i64], phase: Phase) -> Vec<usize> {
    let target = phase.label();
    labels
        .iter()
        .enumerate()
        .filter_map(|(i, &label)| (label == target).then_some(i))
        .collect()
}

/// Sample positions of one phase within one curve
///
/// Always holds at least one position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseWindow {
    phase: Phase,
    positions: Vec<usize>,
}

impl PhaseWindow {
    /// Extract a phase, treating it as absent below `min_samples`
    pub fn extract(labels: &[i64], phase: Phase, min_samples: usize) -> Option<Self> {
        let positions = extract(labels, phase);
        (!positions.is_empty() && positions.len() >= min_samples)
            .then_some(Self { phase, positions })
    }

    /// Extract a phase from a curve's segment column
    pub fn from_curve(curve: &Curve, phase: Phase, min_samples: usize) -> Option<Self> {
        Self::extract(curve.segment(), phase, min_samples)
    }

    /// Phase this window belongs to
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// Sample positions in the source curve
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Number of samples in the window
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always false; empty phases are reported as absent instead
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// First sample position
    pub fn start(&self) -> usize {
        self.positions.first().copied().unwrap_or_default()
    }

    /// Last sample position
    pub fn end(&self) -> usize {
        self.positions.last().copied().unwrap_or_default()
    }

    /// Raw sample range from the window midpoint to its end
    ///
    /// The midpoint is `start + (end - start) / 2`; samples between are taken
    /// regardless of their label.
    pub fn second_half(&self) -> RangeInclusive<usize> {
        let (start, end) = (self.start(), self.end());
        (start + (end - start) / 2)..=end
    }

    /// Values of a column at the window positions; missing samples become NaN
    pub fn gather(&self, column: &[f64]) -> Vec<f64> {
        self.positions
            .iter()
            .map(|&i| column.get(i).copied().unwrap_or(f64::NAN))
            .collect()
    }
}
