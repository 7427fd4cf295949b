//! Tests for default constants, configuration files and validation

#[cfg(test)]
mod tests {
    use forcemap::AnalysisError;
    use forcemap::io::configuration::{
        APPROACH_RESAMPLE_LENGTH, AnalysisConfig, GridFallback, HOLD_RESAMPLE_LENGTH,
        MASK_RED_MIN, MIN_FIT_POINTS, MIN_FIT_WINDOW_SAMPLES, RETRACT_RESAMPLE_LENGTH,
        TIME_AXIS_POINTS,
    };
    use forcemap::model::Phase;
    use std::io::Write;

    // Tests default constants match the analysis conventions
    // Verified by changing constant values
    #[test]
    fn test_default_constants() {
        assert_eq!(APPROACH_RESAMPLE_LENGTH, 200);
        assert_eq!(HOLD_RESAMPLE_LENGTH, 60);
        assert_eq!(RETRACT_RESAMPLE_LENGTH, 200);
        assert_eq!(TIME_AXIS_POINTS, 200);
        assert_eq!(MIN_FIT_WINDOW_SAMPLES, 4);
        assert_eq!(MIN_FIT_POINTS, 3);
        assert!((MASK_RED_MIN - 0.7).abs() < f64::EPSILON);
    }

    // Tests the default configuration is valid and uses the constants
    // Verified by deriving Default with zero time points
    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.time_points, TIME_AXIS_POINTS);
        assert_eq!(config.grid_fallback, GridFallback::RowMajor);
        assert_eq!(config.resample_lengths.for_phase(Phase::Hold), HOLD_RESAMPLE_LENGTH);
    }

    // Tests validation rejects unusable values as configuration errors
    // Verified by skipping the threshold range check
    #[test]
    fn test_validation_rejects_bad_values() {
        let mut short_axis = AnalysisConfig::default();
        short_axis.resample_lengths.hold = 1;
        let error = short_axis.validate().expect_err("hold axis too short");
        assert!(matches!(error, AnalysisError::InvalidParameter { .. }));
        assert!(error.to_string().contains("resample_lengths.hold"));

        let mut threshold = AnalysisConfig::default();
        threshold.mask_thresholds.red_min = 1.5;
        assert!(threshold.validate().is_err());

        let mut minimum = AnalysisConfig::default();
        minimum.minimums.fit_points = 1;
        assert!(minimum.validate().is_err());
    }

    // Tests a partial JSON file overrides only the keys it names
    // Verified by replacing whole sections with defaults
    #[test]
    fn test_config_file_overrides() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(
            file,
            r#"{{ "grid_fallback": "exclude", "time_points": 50, "resample_lengths": {{ "hold": 30 }} }}"#
        )
        .expect("write config");

        let config = AnalysisConfig::from_file(file.path()).expect("valid config");
        assert_eq!(config.grid_fallback, GridFallback::Exclude);
        assert_eq!(config.time_points, 50);
        assert_eq!(config.resample_lengths.hold, 30);
        assert_eq!(config.resample_lengths.approach, APPROACH_RESAMPLE_LENGTH);
    }

    // Tests an invalid file is a configuration error
    // Verified by falling back to defaults on parse failure
    #[test]
    fn test_config_file_errors() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        write!(file, r#"{{ "time_points": 1 }}"#).expect("write config");
        assert!(AnalysisConfig::from_file(file.path()).is_err());

        let mut broken = tempfile::NamedTempFile::new().expect("temp file");
        write!(broken, "not json").expect("write config");
        let error = AnalysisConfig::from_file(broken.path()).expect_err("parse failure");
        assert!(matches!(error, AnalysisError::InvalidParameter { .. }));
    }
}
