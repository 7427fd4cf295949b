//! Tests for typed metadata lookups and grid shape extraction

#[cfg(test)]
mod tests {
    use forcemap::AnalysisError;
    use forcemap::model::metadata::{GRID_INDEX_X, GRID_INDEX_Y, GRID_SHAPE_X, GRID_SHAPE_Y};
    use forcemap::model::{GridShape, Metadata};
    use serde_json::json;

    // Tests numbers and numeric strings are both accepted
    // Verified by dropping the string branch of the lookup
    #[test]
    fn test_numeric_lookup_accepts_strings() {
        let metadata = Metadata::from_pairs([
            ("spring constant", json!(0.12)),
            ("sensitivity", json!(" 5e-8 ")),
            ("label", json!("ctrl")),
        ]);

        assert_eq!(metadata.spring_constant(), Some(0.12));
        assert_eq!(metadata.sensitivity(), Some(5e-8));
        assert_eq!(metadata.f64("label"), None);
        assert_eq!(metadata.text("label").as_deref(), Some("ctrl"));
    }

    // Tests integer lookup truncates fractional values
    // Verified by rejecting non-integer numbers
    #[test]
    fn test_integer_lookup_truncates() {
        let metadata = Metadata::from_pairs([("a", json!(3.0)), ("b", json!("4")), ("c", json!(2.7))]);

        assert_eq!(metadata.i64("a"), Some(3));
        assert_eq!(metadata.i64("b"), Some(4));
        assert_eq!(metadata.i64("c"), Some(2));
        assert_eq!(metadata.i64("missing"), None);
    }

    // Tests grid shape is read from both shape keys
    // Verified by swapping the x and y keys
    #[test]
    fn test_grid_shape() {
        let metadata = Metadata::from_pairs([(GRID_SHAPE_X, json!(4)), (GRID_SHAPE_Y, json!(3))]);
        let shape = metadata.grid_shape().expect("shape should be present");

        assert_eq!(shape, GridShape::new(4, 3));
        assert_eq!(shape.dim(), (3, 4));
        assert_eq!(shape.cell_count(), 12);
    }

    // Tests a missing shape key is reported by name
    // Verified by returning a default shape
    #[test]
    fn test_missing_grid_shape_names_key() {
        let metadata = Metadata::from_pairs([(GRID_SHAPE_X, json!(4))]);

        match metadata.grid_shape() {
            Err(AnalysisError::MissingMetadata { field }) => assert_eq!(field, GRID_SHAPE_Y),
            other => panic!("expected missing metadata, got {other:?}"),
        }
    }

    // Tests negative counts are treated as missing
    // Verified by casting negative values to usize
    #[test]
    fn test_negative_count_is_missing() {
        let metadata = Metadata::from_pairs([("n", json!(-2))]);
        assert!(metadata.require_usize("n").is_err());
    }

    // Tests grid index requires both coordinates
    // Verified by defaulting the missing coordinate to zero
    #[test]
    fn test_grid_index_requires_both() {
        let partial = Metadata::from_pairs([(GRID_INDEX_X, json!(2))]);
        assert_eq!(partial.grid_index(), None);

        let full = Metadata::from_pairs([(GRID_INDEX_X, json!(2)), (GRID_INDEX_Y, json!(-1))]);
        assert_eq!(full.grid_index(), Some((2, -1)));
    }
}
