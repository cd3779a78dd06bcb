//! Tests for sea monster scanning and roughness over all orientations

#[cfg(test)]
mod tests {
    use jigtile::PuzzleError;
    use jigtile::analysis::compositor::CompositeImage;
    use jigtile::analysis::patterns::{Pattern, max_roughness, scan, survey};
    use jigtile::spatial::orientation::Orientation;
    use ndarray::Array2;

    const EXAMPLE_IMAGE: &str = include_str!("../../fixtures/example_image.txt");

    fn example() -> CompositeImage {
        EXAMPLE_IMAGE.parse().unwrap()
    }

    // Tests the built-in sea monster shape
    // Verified by trimming trailing spaces from the pattern rows
    #[test]
    fn test_sea_monster_pattern() {
        let monster = Pattern::sea_monster().unwrap();
        assert_eq!(monster.len(), 15);
        assert_eq!((monster.height(), monster.width()), (3, 20));
        assert!(monster.offsets().contains(&(0, 18)));
        assert!(!monster.is_empty());
    }

    // Tests patterns reject empty shapes and unknown characters
    // Verified by allowing patterns without lit pixels
    #[test]
    fn test_pattern_errors() {
        assert!(matches!(
            Pattern::new(&["  ", ".."]),
            Err(PuzzleError::MalformedImage { .. })
        ));
        assert!(Pattern::new(&["#x"]).is_err());
        assert!(Pattern::new(&["#.", " #"]).is_ok());
    }

    // Tests the documented image has two monsters and roughness 273 as assembled
    // Verified by counting lit pixels before marking
    #[test]
    fn test_scan_example_identity() {
        let monster = Pattern::sea_monster().unwrap();
        let result = scan(&example(), &monster, Orientation::IDENTITY);

        assert_eq!(result.anchors(), &[(2, 2), (16, 1)]);
        assert_eq!(result.matches(), 2);
        assert_eq!(result.on_pixels(), 303);
        assert_eq!(result.marked_count(), 30);
        assert_eq!(result.roughness(), Some(273));
        assert!(result.is_marked(2, 20));
        assert!(!result.is_marked(0, 0));
    }

    // Tests orientations without a match report no roughness but a legacy zero
    // Verified by returning the lit pixel count when nothing matched
    #[test]
    fn test_scan_without_match() {
        let monster = Pattern::sea_monster().unwrap();
        let result = scan(&example(), &monster, Orientation::new(true, 1));
        assert_eq!(result.matches(), 0);
        assert_eq!(result.roughness(), None);
        assert_eq!(result.legacy_roughness(), 0);
    }

    // Tests the survey finds the monsters whichever way the image is turned
    // Verified by scanning only the first orientation
    #[test]
    fn test_survey_any_orientation() {
        let monster = Pattern::sea_monster().unwrap();
        for orientation in Orientation::ALL {
            let turned = example().oriented(orientation);
            let found = survey(&turned, &monster);
            assert_eq!(found.scans().len(), 8);
            assert_eq!(found.max_roughness(), 273);
            assert_eq!(found.best().unwrap().matches(), 2);
        }
    }

    // Tests an image without the pattern yields zero and no best scan
    // Verified by reporting the lit pixel count for pattern-free images
    #[test]
    fn test_survey_pattern_absent() {
        let monster = Pattern::sea_monster().unwrap();
        let image = CompositeImage::new(Array2::from_elem((24, 24), true));
        let mut sparse = image.pixels().clone();
        sparse.iter_mut().step_by(2).for_each(|pixel| *pixel = false);
        let striped = CompositeImage::new(sparse);

        let found = survey(&striped, &monster);
        assert!(found.best().is_none());
        assert!(!found.pattern_found());
        assert_eq!(found.max_roughness(), 0);
        assert!(found.scans().iter().all(|scan| scan.roughness().is_none()));
    }

    // Tests images smaller than the pattern are scanned without matches
    // Verified by removing the fit check before scanning anchors
    #[test]
    fn test_image_smaller_than_pattern() {
        let monster = Pattern::sea_monster().unwrap();
        let tiny = CompositeImage::new(Array2::from_elem((3, 5), true));
        assert_eq!(max_roughness(&tiny, &monster), 0);
    }

    // Tests overlapping matches mark shared pixels once
    // Verified by counting marks per match instead of per pixel
    #[test]
    fn test_overlapping_matches() {
        let pair = Pattern::new(&["##"]).unwrap();
        let image = CompositeImage::from_rows(&["###."]).unwrap();
        let result = scan(&image, &pair, Orientation::IDENTITY);

        assert_eq!(result.matches(), 2);
        assert_eq!(result.marked_count(), 3);
        assert_eq!(result.roughness(), Some(0));
    }
}
