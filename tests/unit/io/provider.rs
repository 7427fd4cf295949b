//! Tests for reading JSON force maps

#[cfg(test)]
mod tests {
    use forcemap::AnalysisError;
    use forcemap::io::provider::{CurveProvider, JsonCurveProvider, map_name};
    use std::path::Path;

    const MAP: &str = r#"{
        "metadata": { "grid shape x": 2, "grid shape y": 1, "spring constant": 0.1 },
        "curves": [
            {
                "metadata": { "grid index x": 1, "grid index y": 0 },
                "time": [0.0, 0.001, null],
                "force": [0.0, 1e-9, 2e-9],
                "height (measured)": [1e-6, 0.9e-6, 0.8e-6],
                "height (piezo)": [1e-6, 0.95e-6, 0.9e-6],
                "segment": [0, 1, 2]
            }
        ]
    }"#;

    // Tests maps parse with metadata, columns and nulls as NaN
    // Verified by reading null samples as zero
    #[test]
    fn test_parse_map() {
        let map = JsonCurveProvider::parse("map", Path::new("map.json"), MAP).expect("valid map");

        assert_eq!(map.name(), "map");
        assert_eq!(map.len(), 1);
        assert_eq!(map.metadata().spring_constant(), Some(0.1));
        let curve = map.curve(0).expect("one curve");
        assert_eq!(curve.metadata().grid_index(), Some((1, 0)));
        assert!(curve.time()[2].is_nan());
        assert_eq!(curve.segment(), &[0, 1, 2]);
    }

    // Tests ragged curves are reported with their index
    // Verified by truncating columns to the shortest
    #[test]
    fn test_ragged_curve_rejected() {
        let text = r#"{ "curves": [ { "time": [0.0], "force": [0.0, 1.0],
            "height (measured)": [0.0], "height (piezo)": [0.0], "segment": [0] } ] }"#;

        match JsonCurveProvider::parse("bad", Path::new("bad.json"), text) {
            Err(AnalysisError::InvalidSourceData { reason }) => assert!(reason.contains("curve 0")),
            other => panic!("expected invalid source data, got {other:?}"),
        }
    }

    // Tests malformed JSON is a map load error naming the file
    // Verified by returning an empty map
    #[test]
    fn test_malformed_map() {
        let error = JsonCurveProvider::parse("x", Path::new("x.json"), "{ \"curves\": 3 }")
            .expect_err("curves must be a list");
        assert!(matches!(error, AnalysisError::MapLoad { .. }));
        assert!(error.to_string().contains("x.json"));
    }

    // Tests loading from disk names the map after the file stem
    // Verified by using the full file name
    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("ctrl_dish1_map.json");
        std::fs::write(&path, MAP).expect("write map");

        let map = JsonCurveProvider.load(&path).expect("loaded");
        assert_eq!(map.name(), "ctrl_dish1_map");
        assert_eq!(map_name(&path), "ctrl_dish1_map");
        assert!(JsonCurveProvider.load(&dir.path().join("absent.json")).is_err());
    }
}
