//! Ordinary least-squares line fitting

/// Fitted line `y = slope * x + intercept`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Slope coefficient
    pub slope: f64,
    /// Intercept at `x = 0`
    pub intercept: f64,
}

/// Least-squares line through paired samples
///
/// Returns `None` for mismatched lengths, fewer than two points, non-finite input
/// or a rank-deficient design (all `x` equal).
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    if x.iter().chain(y).any(|v| !v.is_finite()) {
        return None;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (sxx, sxy) = x
        .iter()
        .zip(y)
        .fold((0.0_f64, 0.0_f64), |(sxx, sxy), (&xi, &yi)| {
            let dx = xi - mean_x;
            (dx.mul_add(dx, sxx), dx.mul_add(yi - mean_y, sxy))
        });

    // x spread below relative machine precision counts as rank-deficient
    let scale = x.iter().fold(0.0_f64, |acc, v| acc.max(v.abs())).max(1.0);
    if sxx <= f64::EPSILON * scale * scale * n {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = slope.mul_add(-mean_x, mean_y);
    (slope.is_finite() && intercept.is_finite()).then_some(LineFit { slope, intercept })
}
