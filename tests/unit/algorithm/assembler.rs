//! Tests for search ordering and backtracking grid assembly

#[cfg(test)]
mod tests {
    use jigtile::PuzzleError;
    use jigtile::algorithm::assembler::{
        AssembledGrid, AssemblyObserver, AssemblyStats, GridAssembler, PositionKind, search_order,
    };
    use jigtile::algorithm::index::OrientationIndex;
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

    #[derive(Default)]
    struct Recorder {
        placed: usize,
        retracted: usize,
        deepest: usize,
    }

    impl AssemblyObserver for Recorder {
        fn placed(&mut self, filled: usize, _total: usize) {
            self.placed += 1;
            self.deepest = self.deepest.max(filled);
        }

        fn retracted(&mut self, _filled: usize, _total: usize) {
            self.retracted += 1;
        }
    }

    // Tests corners come first, then edges clockwise, then the interior
    // Verified by visiting the bottom-left corner before the bottom-right
    #[test]
    fn test_search_order_three() {
        let cells: Vec<(usize, usize)> = search_order(3)
            .iter()
            .map(|position| (position.row, position.col))
            .collect();
        assert_eq!(
            cells,
            vec![
                (0, 0),
                (0, 2),
                (2, 2),
                (2, 0),
                (0, 1),
                (1, 2),
                (2, 1),
                (1, 0),
                (1, 1)
            ]
        );
    }

    // Tests tiny grids list each cell once with every outward side
    // Verified by removing the duplicate filter
    #[test]
    fn test_search_order_small_grids() {
        let single = search_order(1);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0].outward, Side::ALL.to_vec());
        assert_eq!(single[0].kind(), PositionKind::Corner);

        let two = search_order(2);
        assert_eq!(two.len(), 4);
        assert!(two.iter().all(|position| position.kind() == PositionKind::Corner));

        assert!(search_order(0).is_empty());
    }

    // Tests a larger grid has the expected mix of position kinds
    // Verified by marking the last column as interior
    #[test]
    fn test_search_order_kinds() {
        let order = search_order(5);
        let count = |kind| order.iter().filter(|position| position.kind() == kind).count();
        assert_eq!(order.len(), 25);
        assert_eq!(count(PositionKind::Corner), 4);
        assert_eq!(count(PositionKind::Edge), 12);
        assert_eq!(count(PositionKind::Interior), 9);
    }

    // Tests the documented example assembles with the expected layout
    // Verified by skipping the neighbour border check
    #[test]
    fn test_assemble_example() {
        let index = example_index();
        let grid = GridAssembler::new(&index, 3).unwrap().assemble().unwrap();

        assert_eq!(
            grid.ids(),
            array![[1951, 2729, 2971], [2311, 1427, 1489], [3079, 2473, 1171]]
        );
        assert_eq!(grid.corner_ids(), [1951, 2971, 3079, 1171]);
        assert_eq!(grid.corner_id_product().unwrap(), 20_899_048_083_289);
        assert_eq!(grid.side(), 3);
        assert_eq!(grid.tile_side(), 10);
    }

    // Tests every internal seam of the assembled grid matches
    // Verified by comparing right borders with right borders
    #[test]
    fn test_assembled_seams_match() {
        let index = example_index();
        let grid = GridAssembler::new(&index, 3).unwrap().assemble().unwrap();
        assert!(grid.seams_match());

        let top_left = grid.tile(0, 0).unwrap();
        let right = grid.tile(0, 1).unwrap();
        assert_eq!(top_left.border(Side::Right), right.border(Side::Left));
        assert!(grid.tile(3, 0).is_none());
    }

    // Tests the observer sees every placement and retraction the stats count
    // Verified by not notifying the observer on retraction
    #[test]
    fn test_observer_matches_stats() {
        let index = example_index();
        let mut recorder = Recorder::default();
        let grid = GridAssembler::new(&index, 3)
            .unwrap()
            .assemble_with(&mut recorder)
            .unwrap();
        let AssemblyStats {
            placements,
            backtracks,
        } = grid.stats();

        assert_eq!(recorder.placed, placements);
        assert_eq!(recorder.retracted, backtracks);
        assert_eq!(placements - backtracks, 9);
        assert_eq!(recorder.deepest, 9);
    }

    // Tests tiles with no unique borders cannot fill corners
    // Verified by letting corner positions accept any tile
    #[test]
    fn test_assembly_failure() {
        let tiles: Vec<Tile> = (1..=4).map(blank).collect();
        let index = OrientationIndex::build(&tiles);
        let err = GridAssembler::new(&index, 2).unwrap().assemble().unwrap_err();

        assert!(err.is_assembly_failure());
        assert!(!err.is_parse_error());
        assert!(err.to_string().contains("cannot be assembled into a 2x2 grid"));
    }

    // Tests a single tile fills a one-cell grid
    // Verified by requiring two unique borders for every corner
    #[test]
    fn test_single_tile_grid() {
        let index = OrientationIndex::build(&[blank(42)]);
        let grid = GridAssembler::new(&index, 1).unwrap().assemble().unwrap();
        assert_eq!(grid.corner_ids(), [42; 4]);
        assert_eq!(grid.tile(0, 0).unwrap().orientation().index(), 0);
    }

    // Tests the grid side must account for every indexed tile
    // Verified by accepting any positive grid side
    #[test]
    fn test_grid_side_mismatch() {
        let index = example_index();
        assert!(matches!(
            GridAssembler::new(&index, 2),
            Err(PuzzleError::NonSquareTileCount { count: 9 })
        ));
        assert!(GridAssembler::new(&index, 0).is_err());
        assert_eq!(GridAssembler::new(&index, 3).unwrap().order().len(), 9);
    }

    // Tests assembled grids must be square and non-empty
    // Verified by dropping the shape check
    #[test]
    fn test_assembled_grid_shape() {
        let cells = Array2::from_shape_vec((1, 2), vec![blank(1), blank(2)]).unwrap();
        assert!(AssembledGrid::new(cells, AssemblyStats::default()).is_err());
    }
}
