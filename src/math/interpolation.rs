//! Piecewise-linear interpolation on sorted sample points
//!
//! Evaluation outside the sampled range clamps to the nearest endpoint value, so
//! callers that must not extrapolate have to bound their query axis themselves.

use std::error::Error;
use std::fmt;

/// Error type for interpolation operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationError {
    message: String,
}

impl fmt::Display for InterpolationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Interpolation error: {}", self.message)
    }
}

impl Error for InterpolationError {}

impl InterpolationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Linear interpolant through `(x, y)` points with non-decreasing `x`
#[derive(Debug, Clone)]
pub struct Linear<'a> {
    x_values: &'a [f64],
    y_values: &'a [f64],
}

impl<'a> Linear<'a> {
    /// Create an interpolant over borrowed sample points
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `x_values` and `y_values` have different lengths
    /// - No data points are provided
    pub fn new(x_values: &'a [f64], y_values: &'a [f64]) -> Result<Self, InterpolationError> {
        if x_values.len() != y_values.len() {
            return Err(InterpolationError::new(
                "x_values and y_values must have the same length",
            ));
        }
        if x_values.is_empty() {
            return Err(InterpolationError::new("No data points available"));
        }
        Ok(Self { x_values, y_values })
    }

    /// Evaluate at `x`, clamping outside the sampled range
    ///
    /// # Errors
    ///
    /// Returns an error if internal index access fails
    pub fn evaluate(&self, x: f64) -> Result<f64, InterpolationError> {
        if x.is_nan() {
            return Ok(f64::NAN);
        }
        let first_x = *self
            .x_values
            .first()
            .ok_or_else(|| InterpolationError::new("No x values"))?;
        let last_x = *self
            .x_values
            .last()
            .ok_or_else(|| InterpolationError::new("No x values"))?;

        if x <= first_x {
            return self
                .y_values
                .first()
                .copied()
                .ok_or_else(|| InterpolationError::new("No y values"));
        }
        if x >= last_x {
            return self
                .y_values
                .last()
                .copied()
                .ok_or_else(|| InterpolationError::new("No y values"));
        }

        // First sample strictly greater than x; both neighbours exist after the clamps above
        let hi = self.x_values.partition_point(|&xp| xp <= x);
        let lo = hi - 1;
        let value = |values: &[f64], index: usize| {
            values
                .get(index)
                .copied()
                .ok_or_else(|| InterpolationError::new("Invalid index"))
        };
        let (x_lo, x_hi) = (value(self.x_values, lo)?, value(self.x_values, hi)?);
        let (y_lo, y_hi) = (value(self.y_values, lo)?, value(self.y_values, hi)?);

        let h = x_hi - x_lo;
        if h <= 0.0 {
            return Ok(y_hi);
        }
        let b = (x - x_lo) / h;
        Ok(b.mul_add(y_hi - y_lo, y_lo))
    }

    /// Evaluate at every query point
    ///
    /// # Errors
    ///
    /// Propagates the first evaluation error
    pub fn evaluate_all(&self, queries: &[f64]) -> Result<Vec<f64>, InterpolationError> {
        queries.iter().map(|&x| self.evaluate(x)).collect()
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        (i as f64).mul_add(step, start)
                    }
                })
                .collect()
        }
    }
}

/// Replace NaN samples by interpolating between the finite samples around them
///
/// Positions are the sample indices; leading and trailing gaps take the nearest
/// finite value. Returns `None` when no sample is finite.
pub fn fill_nan(values: &[f64]) -> Option<Vec<f64>> {
    let (known_x, known_y): (Vec<f64>, Vec<f64>) = values
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (i as f64, v))
        .unzip();

    if known_x.len() == values.len() {
        return Some(values.to_vec());
    }

    let interpolant = Linear::new(&known_x, &known_y).ok()?;
    values
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            if v.is_finite() {
                Some(v)
            } else {
                interpolant.evaluate(i as f64).ok()
            }
        })
        .collect()
}
