//! Tests for linear interpolation, even spacing and NaN filling

#[cfg(test)]
mod tests {
    use forcemap::math::interpolation::{Linear, fill_nan, linspace};

    // Tests interpolation passes through samples and clamps outside the range
    // Verified by extrapolating along the end segments
    #[test]
    fn test_linear_interpolation_and_clamping() {
        let x = [0.0, 1.0, 3.0];
        let y = [0.0, 10.0, 30.0];
        let linear = Linear::new(&x, &y).expect("valid samples");

        assert!((linear.evaluate(0.5).expect("inside") - 5.0).abs() < 1e-12);
        assert!((linear.evaluate(2.0).expect("inside") - 20.0).abs() < 1e-12);
        assert!((linear.evaluate(1.0).expect("sample") - 10.0).abs() < 1e-12);
        assert!((linear.evaluate(-4.0).expect("below") - 0.0).abs() < f64::EPSILON);
        assert!((linear.evaluate(9.0).expect("above") - 30.0).abs() < f64::EPSILON);
        assert!(linear.evaluate(f64::NAN).expect("nan query").is_nan());
    }

    // Tests invalid sample sets are rejected
    // Verified by accepting mismatched lengths
    #[test]
    fn test_invalid_samples() {
        assert!(Linear::new(&[0.0, 1.0], &[0.0]).is_err());
        assert!(Linear::new(&[], &[]).is_err());
    }

    // Tests a single sample is a constant function
    // Verified by indexing past the single sample
    #[test]
    fn test_single_sample() {
        let linear = Linear::new(&[2.0], &[7.0]).expect("one sample");
        let values = linear.evaluate_all(&[0.0, 2.0, 5.0]).expect("evaluations");
        assert_eq!(values, vec![7.0, 7.0, 7.0]);
    }

    // Tests linspace endpoints are exact
    // Verified by accumulating the step for the last point
    #[test]
    fn test_linspace() {
        let points = linspace(0.0, 0.3, 4);
        assert_eq!(points.len(), 4);
        assert!((points[0] - 0.0).abs() < f64::EPSILON);
        assert!((points[3] - 0.3).abs() < f64::EPSILON);
        assert!(linspace(1.0, 2.0, 0).is_empty());
        assert_eq!(linspace(1.0, 2.0, 1), vec![1.0]);
    }

    // Tests NaN gaps are filled by index and edges take the nearest value
    // Verified by zero-filling gaps
    #[test]
    fn test_fill_nan() {
        let filled = fill_nan(&[f64::NAN, 1.0, f64::NAN, 3.0, f64::NAN]).expect("finite samples exist");
        assert_eq!(filled, vec![1.0, 1.0, 2.0, 3.0, 3.0]);
        assert!(fill_nan(&[f64::NAN, f64::NAN]).is_none());
    }
}
