//! Alignment of variable-length phase windows onto a shared axis
//!
//! Two strategies are available:
//! - Index-normalized: each window is stretched onto a progress axis [0, 1] of
//!   fixed length, independently of the other windows.
//! - Absolute-time: windows are shifted to start at t = 0 and sampled on a common
//!   time axis that ends where the shortest window ends, so no window is ever
//!   extrapolated.
//!
//! A window that cannot be aligned is dropped from its ensemble; it never fails
//! the ensemble as a whole.

use crate::analysis::segments::PhaseWindow;
use crate::math::interpolation::{Linear, fill_nan, linspace};

/// Samples of one phase window needed for alignment
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSamples {
    /// Sample positions in the source curve
    pub positions: Vec<usize>,
    /// Sample times in seconds
    pub time: Vec<f64>,
    /// Sample values of the analysed channel
    pub values: Vec<f64>,
}

impl WindowSamples {
    /// Gather the time and value columns of a curve at the window positions
    pub fn from_window(window: &PhaseWindow, time: &[f64], values: &[f64]) -> Self {
        Self {
            positions: window.positions().to_vec(),
            time: window.gather(time),
            values: window.gather(values),
        }
    }
}

/// Meaning of the shared axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    /// Normalized phase progress in [0, 1]
    Progress,
    /// Seconds since the start of the phase
    Time,
}

impl AxisKind {
    /// Column name for this axis in output tables
    pub const fn column_name(self) -> &'static str {
        match self {
            Self::Progress => "progress",
            Self::Time => "time_s",
        }
    }
}

/// Axis shared by every series of an ensemble
#[derive(Debug, Clone, PartialEq)]
pub struct SharedAxis {
    /// Axis meaning
    pub kind: AxisKind,
    /// Axis sample positions
    pub points: Vec<f64>,
}

impl SharedAxis {
    /// Number of axis samples
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the axis has no samples
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Windows aligned onto one shared axis
///
/// `series` is parallel to the input windows; `None` marks a dropped window.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedEnsemble {
    /// Axis every aligned series is sampled on
    pub axis: SharedAxis,
    /// Aligned values per input window
    pub series: Vec<Option<Vec<f64>>>,
}

impl AlignedEnsemble {
    /// Successfully aligned series in input order
    pub fn aligned(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.series.iter().filter_map(|s| s.as_deref())
    }

    /// Number of windows dropped during alignment
    pub fn discarded(&self) -> usize {
        self.series.iter().filter(|s| s.is_none()).count()
    }
}

/// Alignment strategy with its axis length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    /// Stretch each window onto a progress axis of `length` samples
    IndexNormalized {
        /// Output samples per window
        length: usize,
    },
    /// Sample every window on a common time axis of `points` samples
    AbsoluteTime {
        /// Output samples per window
        points: usize,
    },
}

impl Alignment {
    /// Align an ensemble of windows
    ///
    /// Returns `None` only for the absolute-time strategy when no common time span
    /// exists (no usable window, or the shortest window has zero duration).
    pub fn align(&self, windows: &[WindowSamples]) -> Option<AlignedEnsemble> {
        match *self {
            Self::IndexNormalized { length } => Some(AlignedEnsemble {
                axis: SharedAxis {
                    kind: AxisKind::Progress,
                    points: linspace(0.0, 1.0, length),
                },
                series: windows
                    .iter()
                    .map(|w| resample_normalized(&w.values, &w.positions, length))
                    .collect(),
            }),
            Self::AbsoluteTime { points } => align_time(windows, points),
        }
    }
}

/// Stretch one window onto an evenly spaced progress axis
///
/// Positions map to `(pos - pos[0]) / (pos[-1] - pos[0])`. NaN values are first
/// filled from their finite neighbours. Returns `None` if the inputs disagree in
/// length, the window spans a single position, or no value is finite.
pub fn resample_normalized(values: &[f64], positions: &[usize], length: usize) -> Option<Vec<f64>> {
    if values.len() != positions.len() || values.len() < 2 || length == 0 {
        return None;
    }
    let first = *positions.first()? as f64;
    let span = *positions.last()? as f64 - first;
    if span <= 0.0 {
        return None;
    }

    let filled = fill_nan(values)?;
    let progress: Vec<f64> = positions.iter().map(|&p| (p as f64 - first) / span).collect();
    let interpolant = Linear::new(&progress, &filled).ok()?;
    interpolant
        .evaluate_all(&linspace(0.0, 1.0, length))
        .ok()
}

/// Resample evenly spaced values to a new length
pub fn resample_values(values: &[f64], length: usize) -> Option<Vec<f64>> {
    let positions: Vec<usize> = (0..values.len()).collect();
    resample_normalized(values, &positions, length)
}

/// Finite `(time, value)` pairs of a window with time shifted to start at zero
fn shifted_finite(window: &WindowSamples) -> Option<(Vec<f64>, Vec<f64>)> {
    if window.time.len() != window.values.len() {
        return None;
    }
    let t0 = window.time.iter().copied().find(|t| t.is_finite())?;
    let (time, values): (Vec<f64>, Vec<f64>) = window
        .time
        .iter()
        .zip(&window.values)
        .filter(|(t, v)| t.is_finite() && v.is_finite())
        .map(|(&t, &v)| (t - t0, v))
        .unzip();
    (time.len() >= 2).then_some((time, values))
}

/// Common upper time bound of an ensemble
///
/// The minimum over usable windows of their largest shifted time. Windows with
/// fewer than two finite samples do not take part.
pub fn common_time_bound(windows: &[WindowSamples]) -> Option<f64> {
    windows
        .iter()
        .filter_map(shifted_finite)
        .map(|(time, _)| time.iter().copied().fold(f64::NEG_INFINITY, f64::max))
        .min_by(f64::total_cmp)
}

fn align_time(windows: &[WindowSamples], points: usize) -> Option<AlignedEnsemble> {
    let bound = common_time_bound(windows)?;
    if !bound.is_finite() || bound <= 0.0 || points == 0 {
        return None;
    }

    let axis = linspace(0.0, bound, points);
    let series = windows
        .iter()
        .map(|window| {
            let (time, values) = shifted_finite(window)?;
            Linear::new(&time, &values).ok()?.evaluate_all(&axis).ok()
        })
        .collect();

    Some(AlignedEnsemble {
        axis: SharedAxis {
            kind: AxisKind::Time,
            points: axis,
        },
        series,
    })
}
