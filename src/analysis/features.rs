//! Per-curve scalar features used for distributional comparison

use crate::analysis::segments::PhaseWindow;
use crate::io::configuration::SampleMinimums;
use crate::math::regression::fit_line;
use crate::model::{Curve, Phase};

/// Slope of `value` against `time` over the second half of a phase window
///
/// The fitted range runs from `start + (end - start) / 2` to `end` over raw sample
/// positions. Non-finite pairs are dropped; at least `min_points` must remain.
/// Time is shifted to start at zero before the least-squares fit, so the slope is
/// in value units per second.
pub fn slope(time: &[f64], value: &[f64], window: &PhaseWindow, min_points: usize) -> Option<f64> {
    let (t, v): (Vec<f64>, Vec<f64>) = window
        .second_half()
        .filter_map(|i| Some((*time.get(i)?, *value.get(i)?)))
        .filter(|(t, v)| t.is_finite() && v.is_finite())
        .unzip();

    if t.len() < min_points.max(2) {
        return None;
    }

    let t0 = *t.first()?;
    let shifted: Vec<f64> = t.iter().map(|ti| ti - t0).collect();
    fit_line(&shifted, &v).map(|fit| fit.slope)
}

/// Hold steepness: measured-height slope over the second half of the hold phase (m/s)
pub fn hold_steepness(curve: &Curve, minimums: &SampleMinimums) -> Option<f64> {
    let window = PhaseWindow::from_curve(curve, Phase::Hold, minimums.fit_window)?;
    slope(
        curve.time(),
        curve.height_measured(),
        &window,
        minimums.fit_points,
    )
    .filter(|s| s.is_finite())
}

/// Setpoint height: measured height at the last approach sample
pub fn setpoint_height(curve: &Curve) -> Option<f64> {
    let window = PhaseWindow::from_curve(curve, Phase::Approach, 1)?;
    curve.height_measured().get(window.end()).copied()
}
