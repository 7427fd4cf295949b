//! NaN-aware descriptive statistics

/// Mean, population standard deviation and count of the finite values
///
/// Returns `(NaN, NaN, 0)` when no value is finite.
pub fn finite_mean_std<'a>(values: impl IntoIterator<Item = &'a f64>) -> (f64, f64, usize) {
    // Welford accumulation
    let mut count = 0_usize;
    let mut mean = 0.0_f64;
    let mut m2 = 0.0_f64;

    for &value in values {
        if !value.is_finite() {
            continue;
        }
        count += 1;
        let delta = value - mean;
        mean += delta / count as f64;
        m2 = delta.mul_add(value - mean, m2);
    }

    if count == 0 {
        return (f64::NAN, f64::NAN, 0);
    }
    (mean, (m2 / count as f64).sqrt(), count)
}

/// Quantile of the finite values with linear interpolation between order statistics
///
/// `q` is clamped to [0, 1]. Returns `None` when no value is finite.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(f64::total_cmp);

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let low = *sorted.get(lower)?;
    let high = *sorted.get(upper)?;
    Some((position - lower as f64).mul_add(high - low, low))
}

/// Five-number style summary of a sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of finite values
    pub count: usize,
    /// Mean of the finite values
    pub mean: f64,
    /// Population standard deviation of the finite values
    pub std: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
}

/// Summarize the finite values of a sample, `None` when there are none
pub fn summarize(values: &[f64]) -> Option<Summary> {
    let (mean, std, count) = finite_mean_std(values);
    if count == 0 {
        return None;
    }
    Some(Summary {
        count,
        mean,
        std,
        q1: quantile(values, 0.25)?,
        median: quantile(values, 0.5)?,
        q3: quantile(values, 0.75)?,
    })
}
