//! Tests for composite image construction, parsing and orientation

#[cfg(test)]
mod tests {
    use jigtile::PuzzleError;
    use jigtile::algorithm::assembler::GridAssembler;
    use jigtile::algorithm::index::OrientationIndex;
    use jigtile::analysis::compositor::{CompositeImage, compose};
    use jigtile::io::input::parse_tile_set;
    use jigtile::spatial::orientation::{Orientation, Rotation};
    use ndarray::array;

    const EXAMPLE: &str = include_str!("../../fixtures/example_tiles.txt");
    const EXAMPLE_IMAGE: &str = include_str!("../../fixtures/example_image.txt");

    // Tests the assembled example composes to the documented 24x24 image
    // Verified by copying whole tiles instead of interiors
    #[test]
    fn test_compose_example() {
        let tiles = parse_tile_set(EXAMPLE).unwrap();
        let index = OrientationIndex::build(tiles.tiles());
        let grid = GridAssembler::new(&index, 3).unwrap().assemble().unwrap();
        let composite = compose(&grid);

        assert_eq!(composite.height(), 24);
        assert_eq!(composite.width(), 24);
        assert_eq!(composite.to_string(), EXAMPLE_IMAGE);
        assert_eq!(composite.on_count(), 303);
    }

    // Tests rows parse into pixels and print back unchanged
    // Verified by swapping the on and off characters when printing
    #[test]
    fn test_from_rows_and_display() {
        let image = CompositeImage::from_rows(&["#..", ".##"]).unwrap();
        assert_eq!(image.pixels(), &array![[true, false, false], [false, true, true]]);
        assert_eq!(image.get(1, 2), Some(true));
        assert_eq!(image.get(2, 0), None);
        assert_eq!(image.to_string(), "#..\n.##\n");
    }

    // Tests text parsing tolerates CRLF endings and blank lines
    // Verified by splitting on newline without trimming
    #[test]
    fn test_from_str_crlf() {
        let image: CompositeImage = "#.\r\n.#\r\n\r\n".parse().unwrap();
        assert_eq!(image.pixels(), &array![[true, false], [false, true]]);
    }

    // Tests ragged rows and unknown characters are malformed images
    // Verified by padding short rows with off pixels
    #[test]
    fn test_malformed_image() {
        assert!(matches!(
            CompositeImage::from_rows(&["#..", ".#"]),
            Err(PuzzleError::MalformedImage { .. })
        ));
        assert!(matches!(
            "#.\n.o".parse::<CompositeImage>(),
            Err(PuzzleError::MalformedImage { .. })
        ));
    }

    // Tests orienting a non-square image swaps its dimensions on quarter turns
    // Verified by orienting the image in place
    #[test]
    fn test_oriented() {
        let image = CompositeImage::from_rows(&["##.", "..."]).unwrap();
        let turned = image.oriented(Orientation::from(Rotation::Deg90));
        assert_eq!((turned.height(), turned.width()), (3, 2));
        assert_eq!(turned.to_string(), ".#\n.#\n..\n");
        assert_eq!(image.oriented(Orientation::IDENTITY), image);
    }
}
