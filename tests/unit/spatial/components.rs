//! Tests for 4-connected component labeling

#[cfg(test)]
mod tests {
    use forcemap::spatial::grid::GridCell;
    use forcemap::spatial::{Mask, label_components};

    // Tests a checkerboard yields one component per selected cell
    // Verified by switching to 8-connectivity
    #[test]
    fn test_checkerboard_components() {
        let mask = Mask::from_fn(4, 4, |row, col| (row + col) % 2 == 0);
        let components = label_components(&mask);

        assert_eq!(components.count(), 8);
        assert!(components.sizes().iter().all(|&size| size == 1));
    }

    // Tests a solid rectangle is a single component
    // Verified by resetting the label on each row
    #[test]
    fn test_solid_rectangle() {
        let mask = Mask::from_fn(5, 6, |row, col| (1..4).contains(&row) && (2..5).contains(&col));
        let components = label_components(&mask);

        assert_eq!(components.count(), 1);
        assert_eq!(components.sizes(), vec![9]);
        assert_eq!(components.component_of(GridCell::new(2, 1)), Some(1));
        assert_eq!(components.component_of(GridCell::new(0, 0)), None);
    }

    // Tests labels follow raster-scan order of each component's first cell
    // Verified by labeling in column-major order
    #[test]
    fn test_labels_in_scan_order() {
        // Row 0: component at the right; row 1: component at the left
        let mask = Mask::from_fn(3, 5, |row, col| (row == 0 && col == 4) || (row == 1 && col < 2));
        let components = label_components(&mask);

        assert_eq!(components.count(), 2);
        assert_eq!(components.component_of(GridCell::new(4, 0)), Some(1));
        assert_eq!(components.component_of(GridCell::new(0, 1)), Some(2));
        assert_eq!(components.ids().collect::<Vec<_>>(), vec![1, 2]);
    }

    // Tests an empty mask has no components
    // Verified by starting the label count at one
    #[test]
    fn test_empty_mask() {
        let components = label_components(&Mask::empty(3, 3));

        assert_eq!(components.count(), 0);
        assert_eq!(components.ids().count(), 0);
        assert!(components.labels().iter().all(|&label| label == 0));
    }
}
