//! Tests for NaN-ignoring ensemble statistics and grouped aggregation

#[cfg(test)]
mod tests {
    use forcemap::analysis::ensemble::aggregate_ensemble;
    use forcemap::analysis::{
        AlignedEnsemble, AxisKind, EnsembleAggregator, SharedAxis, aggregate,
    };

    fn progress_axis(points: Vec<f64>) -> SharedAxis {
        SharedAxis {
            kind: AxisKind::Progress,
            points,
        }
    }

    // Tests each column ignores NaNs independently
    // Verified by dropping any series with a NaN
    #[test]
    fn test_nan_ignoring_columns() {
        let axis = progress_axis(vec![0.0, 0.5, 1.0]);
        let series = [vec![1.0, 2.0, f64::NAN], vec![3.0, f64::NAN, 5.0]];
        let stat = aggregate(&axis, &series).expect("two series");

        assert_eq!(stat.mean, vec![2.0, 2.0, 5.0]);
        assert_eq!(stat.count, vec![2, 1, 1]);
        assert_eq!(stat.std, vec![1.0, 0.0, 0.0]);
        assert_eq!(stat.series_count, 2);
    }

    // Tests a column with no finite value reports NaN and a zero count
    // Verified by reporting zero mean for empty columns
    #[test]
    fn test_empty_column() {
        let axis = progress_axis(vec![0.0, 1.0]);
        let stat = aggregate(&axis, &[vec![1.0, f64::NAN]]).expect("one series");

        assert!(stat.mean[1].is_nan());
        assert!(stat.std[1].is_nan());
        assert_eq!(stat.count, vec![1, 0]);
    }

    // Tests series not matching the axis length are left out
    // Verified by truncating long series
    #[test]
    fn test_length_mismatch_excluded() {
        let axis = progress_axis(vec![0.0, 1.0]);
        let series = [vec![1.0, 2.0, 3.0], vec![4.0, 6.0]];
        let stat = aggregate(&axis, &series).expect("one matching series");

        assert_eq!(stat.series_count, 1);
        assert_eq!(stat.mean, vec![4.0, 6.0]);
        assert!(aggregate(&axis, &[vec![1.0]]).is_none());
    }

    // Tests dropped windows do not contribute to the ensemble
    // Verified by counting dropped windows as series
    #[test]
    fn test_aggregate_ensemble_skips_dropped() {
        let ensemble = AlignedEnsemble {
            axis: progress_axis(vec![0.0, 1.0]),
            series: vec![Some(vec![1.0, 1.0]), None, Some(vec![3.0, 5.0])],
        };
        let stat = aggregate_ensemble(&ensemble).expect("aligned series");

        assert_eq!(stat.series_count, 2);
        assert_eq!(stat.mean, vec![2.0, 3.0]);
    }

    // Tests groups keep separate series and reject a foreign axis
    // Verified by merging groups with equal keys across axes
    #[test]
    fn test_grouped_aggregation() {
        let axis = progress_axis(vec![0.0, 1.0]);
        let other = progress_axis(vec![0.0, 2.0]);
        let mut aggregator = EnsembleAggregator::new();

        assert!(aggregator.push("b", &axis, vec![1.0, 2.0]));
        assert!(aggregator.push("a", &axis, vec![5.0, 5.0]));
        assert!(aggregator.push("b", &axis, vec![3.0, 4.0]));
        assert!(!aggregator.push("b", &other, vec![0.0, 0.0]));
        assert!(!aggregator.push("a", &axis, vec![0.0]));

        assert_eq!(aggregator.series_count(&"b"), 2);

        let results = aggregator.finish();
        assert_eq!(results.len(), 2);
        assert_eq!(*results[0].0, "a");
        assert_eq!(*results[1].0, "b");
        assert_eq!(results[1].1.mean, vec![2.0, 3.0]);
    }

    // Tests extending from an ensemble counts accepted series
    // Verified by counting dropped windows
    #[test]
    fn test_extend_counts_accepted() {
        let ensemble = AlignedEnsemble {
            axis: progress_axis(vec![0.0, 1.0]),
            series: vec![Some(vec![1.0, 1.0]), None],
        };
        let mut aggregator = EnsembleAggregator::default();

        assert!(aggregator.is_empty());
        assert_eq!(aggregator.extend(7_u32, &ensemble), 1);
        assert_eq!(aggregator.series_count(&7), 1);
    }
}
