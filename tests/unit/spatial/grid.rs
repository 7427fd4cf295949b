//! Tests for curve coordinate resolution and grid bounds checks

#[cfg(test)]
mod tests {
    use forcemap::io::configuration::GridFallback;
    use forcemap::model::metadata::{GRID_INDEX_X, GRID_INDEX_Y, GRID_SHAPE_X, GRID_SHAPE_Y};
    use forcemap::model::{Curve, ForceMap, GridShape, Metadata};
    use forcemap::spatial::GridPlacement;
    use forcemap::spatial::grid::{GridCell, resolve, validate};
    use serde_json::json;

    fn indexed(x: i64, y: i64) -> Metadata {
        Metadata::from_pairs([(GRID_INDEX_X, json!(x)), (GRID_INDEX_Y, json!(y))])
    }

    fn curve(metadata: Metadata) -> Curve {
        Curve::new(vec![0.0], vec![0.0], vec![0.0], vec![0.0], vec![0], metadata)
            .expect("single-sample curve")
    }

    // Tests the row-major fallback places index i at (i mod nx, i div nx)
    // Verified by dividing by ny instead of nx
    #[test]
    fn test_row_major_fallback() {
        let shape = GridShape::new(4, 3);
        let empty = Metadata::default();

        for index in 0..12 {
            let expected = ((index % 4) as i64, (index / 4) as i64);
            assert_eq!(
                resolve(index, &empty, shape, GridFallback::RowMajor),
                Some(expected)
            );
        }
        assert_eq!(resolve(5, &empty, shape, GridFallback::Exclude), None);
    }

    // Tests explicit indices take precedence over the fallback
    // Verified by always using the fallback
    #[test]
    fn test_explicit_indices_win() {
        let shape = GridShape::new(4, 3);
        assert_eq!(
            resolve(0, &indexed(3, 2), shape, GridFallback::RowMajor),
            Some((3, 2))
        );
    }

    // Tests out-of-range coordinates are excluded
    // Verified by clamping coordinates into the grid
    #[test]
    fn test_validate_bounds() {
        let shape = GridShape::new(2, 2);

        assert_eq!(validate((1, 1), shape), Some(GridCell::new(1, 1)));
        assert_eq!(validate((2, 0), shape), None);
        assert_eq!(validate((0, 2), shape), None);
        assert_eq!(validate((-1, 0), shape), None);
    }

    // Tests a placement marks unplaceable curves without dropping others
    // Verified by failing the whole map on one bad curve
    #[test]
    fn test_placement_of_map() {
        let shape = GridShape::new(2, 2);
        let map = ForceMap::new(
            "m".to_string(),
            Metadata::from_pairs([(GRID_SHAPE_X, json!(2)), (GRID_SHAPE_Y, json!(2))]),
            vec![curve(indexed(1, 0)), curve(indexed(5, 5)), curve(Metadata::default())],
        );
        let placement = GridPlacement::resolve_map(&map, shape, GridFallback::RowMajor);

        assert_eq!(placement.cell(0), Some(GridCell::new(1, 0)));
        assert_eq!(placement.cell(1), None);
        assert_eq!(placement.cell(2), Some(GridCell::new(0, 1)));
        assert_eq!(placement.unplaced_count(), 1);
        assert_eq!(placement.placed().count(), 2);
        assert_eq!(GridCell::new(1, 0).index(), [0, 1]);
    }
}
