//! Tests for map collection and mask lookup order

#[cfg(test)]
mod tests {
    use forcemap::AnalysisError;
    use forcemap::pipeline::{collect_maps, find_mask};
    use std::fs;

    // Tests directories yield their map files in sorted order
    // Verified by returning directory order
    #[test]
    fn test_collect_maps_sorted() {
        let dir = tempfile::tempdir().expect("temp dir");
        for name in ["b.json", "a.json", "notes.txt", "c.JSON"] {
            fs::write(dir.path().join(name), "{}").expect("write file");
        }

        let names: Vec<String> = collect_maps(dir.path())
            .expect("listed")
            .iter()
            .filter_map(|p| p.file_name()?.to_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["a.json", "b.json", "c.JSON"]);
    }

    // Tests a single file target must be a map file
    // Verified by accepting any file
    #[test]
    fn test_collect_single_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let map = dir.path().join("m.json");
        let other = dir.path().join("m.csv");
        fs::write(&map, "{}").expect("write map");
        fs::write(&other, "").expect("write other");

        assert_eq!(collect_maps(&map).expect("map file"), vec![map]);
        assert!(collect_maps(&other).is_err());
        assert!(collect_maps(&dir.path().join("absent")).is_err());
    }

    // Tests preferred names win over prefix matches
    // Verified by searching prefix matches first
    #[test]
    fn test_preferred_mask_names() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("map1_annotated.png"), "").expect("write");
        fs::write(dir.path().join("map1_mask.png"), "").expect("write");
        assert_eq!(
            find_mask(dir.path(), "map1").expect("found"),
            dir.path().join("map1_mask.png")
        );

        fs::write(dir.path().join("map1.png"), "").expect("write");
        assert_eq!(
            find_mask(dir.path(), "map1").expect("found"),
            dir.path().join("map1.png")
        );

        fs::write(dir.path().join("map1.tif"), "").expect("write");
        assert_eq!(
            find_mask(dir.path(), "map1").expect("found"),
            dir.path().join("map1.tif")
        );
    }

    // Tests the prefix fallback takes the first sorted raster file
    // Verified by accepting non-raster extensions
    #[test]
    fn test_prefix_fallback() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("map2_b.jpeg"), "").expect("write");
        fs::write(dir.path().join("map2_a.txt"), "").expect("write");
        fs::write(dir.path().join("map2_c.tiff"), "").expect("write");

        assert_eq!(
            find_mask(dir.path(), "map2").expect("found"),
            dir.path().join("map2_b.jpeg")
        );
    }

    // Tests a missing mask names the map and directory
    // Verified by returning the first file in the directory
    #[test]
    fn test_mask_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        fs::write(dir.path().join("other.png"), "").expect("write");

        match find_mask(dir.path(), "map3") {
            Err(AnalysisError::MaskNotFound { base, .. }) => assert_eq!(base, "map3"),
            other => panic!("expected mask not found, got {other:?}"),
        }
    }
}
