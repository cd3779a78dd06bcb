//! Tests for the border index and uniqueness-based corner detection

#[cfg(test)]
mod tests {
    use jigtile::PuzzleError;
    use jigtile::algorithm::index::{OrientationIndex, checked_product};
    use jigtile::io::input::parse_tile_set;
    use jigtile::spatial::tiles::{Side, Tile};
    use ndarray::{Array2, array};

    const EXAMPLE: &str = include_str!("../../fixtures/example_tiles.txt");

    fn example_index() -> OrientationIndex {
        OrientationIndex::build(parse_tile_set(EXAMPLE).unwrap().tiles())
    }

    fn blank(id: u64) -> Tile {
        Tile::new(id, Array2::from_elem((3, 3), false)).unwrap()
    }

    // Tests unique border counts separate corner, edge and interior tiles
    // Verified by counting borders shared with the tile's own orientations as shared
    #[test]
    fn test_unique_border_counts() {
        let index = example_index();
        let counts: Vec<usize> = (0..index.len())
            .map(|slot| index.unique_border_count(slot))
            .collect();
        assert_eq!(counts, vec![1, 2, 2, 0, 1, 1, 2, 1, 2]);
    }

    // Tests corner detection picks the four tiles with two unique borders
    // Verified by requiring three unique borders for corners
    #[test]
    fn test_corner_slots_and_product() {
        let index = example_index();
        assert_eq!(index.corner_slots(3), vec![1, 2, 6, 8]);
        assert_eq!(index.corner_id_product(3).unwrap(), 20_899_048_083_289);
    }

    // Tests every tile is indexed in all eight orientations
    // Verified by indexing only the parsed orientation
    #[test]
    fn test_orientations_and_entries() {
        let index = example_index();
        assert_eq!(index.len(), 9);
        assert!(!index.is_empty());
        assert_eq!(index.orientations(0).len(), 8);
        assert!(index.orientations(42).is_empty());
        assert!(index.variant(0, 8).is_none());

        let tile = index.variant(0, 0).unwrap();
        let entries = index.entries(tile.border(Side::Top));
        assert!(entries.iter().any(|entry| entry.tile_id == 2311));
        assert!(entries.iter().any(|entry| entry.tile_id != 2311));
    }

    // Tests a border shared by every tile is never unique
    // Verified by treating the first entry's owner as unique
    #[test]
    fn test_shared_border_not_unique() {
        let tiles: Vec<Tile> = (1..=4).map(blank).collect();
        let index = OrientationIndex::build(&tiles);
        let border = tiles[0].border(Side::Left);

        assert_eq!(index.entries(border).len(), 4 * 8 * 4);
        assert!(!index.is_unique(1, border));
        assert_eq!(index.unique_border_count(0), 0);
    }

    // Tests corner analysis reports how many corners it found when it fails
    // Verified by falling back to the first four tiles
    #[test]
    fn test_corner_analysis_failure() {
        let tiles: Vec<Tile> = (1..=4).map(blank).collect();
        let index = OrientationIndex::build(&tiles);
        assert!(matches!(
            index.corner_id_product(2),
            Err(PuzzleError::CornerAnalysis {
                expected: 4,
                found: 0
            })
        ));
    }

    // Tests a single tile is its own four corners
    // Verified by returning the id once for a one-tile grid
    #[test]
    fn test_single_tile_corner_product() {
        let tile = Tile::new(7, array![[true, false, false], [false, false, false], [false, false, false]])
            .unwrap();
        let index = OrientationIndex::build(&[tile]);
        assert_eq!(index.unique_border_count(0), 4);
        assert_eq!(index.corner_slots(1), vec![0]);
        assert_eq!(index.corner_id_product(1).unwrap(), 7 * 7 * 7 * 7);
    }

    // Tests overflow is reported rather than wrapped
    // Verified by using wrapping multiplication
    #[test]
    fn test_checked_product() {
        assert_eq!(checked_product(&[]).unwrap(), 1);
        assert_eq!(checked_product(&[3, 5, 7]).unwrap(), 105);
        assert!(matches!(
            checked_product(&[u64::MAX, 2]),
            Err(PuzzleError::Computation { .. })
        ));
    }
}
