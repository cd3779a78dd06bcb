//! Backtracking assembly of oriented tiles into a square grid
//!
//! Positions are visited in order of constraint strength: the four corners,
//! then the remaining edge cells, then the interior. Corner and edge cells
//! only accept tiles whose outward borders are unique, which prunes the
//! search to a handful of candidates before any neighbour is known. A single
//! grid buffer is mutated in place and cells are unset on backtrack.

use ndarray::Array2;
use tracing::{debug, instrument, trace};

use crate::algorithm::bitset::TileBitset;
use crate::algorithm::index::{OrientationIndex, checked_product};
use crate::io::error::{PuzzleError, Result, computation_error};
use crate::spatial::tiles::{Side, Tile, TileId};

/// How strongly a search position is constrained by the image edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionKind {
    /// Two or more outward sides
    Corner,
    /// Exactly one outward side
    Edge,
    /// No outward side
    Interior,
}

/// A grid cell together with the sides of it that face outside the image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPosition {
    /// Grid row
    pub row: usize,
    /// Grid column
    pub col: usize,
    /// Sides lying on the image edge
    pub outward: Vec<Side>,
}

impl SearchPosition {
    fn new(row: usize, col: usize, grid_side: usize) -> Self {
        let last = grid_side.saturating_sub(1);
        let outward = Side::ALL
            .into_iter()
            .filter(|side| match side {
                Side::Top => row == 0,
                Side::Right => col == last,
                Side::Bottom => row == last,
                Side::Left => col == 0,
            })
            .collect();
        Self { row, col, outward }
    }

    /// Classify the position by its number of outward sides
    pub fn kind(&self) -> PositionKind {
        match self.outward.len() {
            0 => PositionKind::Interior,
            1 => PositionKind::Edge,
            _ => PositionKind::Corner,
        }
    }
}

/// Visiting order for a `grid_side` × `grid_side` grid
///
/// Corners clockwise from the top left, then the top row, right column,
/// bottom row and left column, then the interior row by row. Cells shared by
/// several groups on tiny grids appear once.
pub fn search_order(grid_side: usize) -> Vec<SearchPosition> {
    if grid_side == 0 {
        return Vec::new();
    }
    let last = grid_side - 1;
    let inner = 1..last;

    let corners = [(0, 0), (0, last), (last, last), (last, 0)];
    let top = inner.clone().map(|col| (0, col));
    let right = inner.clone().map(|row| (row, last));
    let bottom = inner.clone().map(|col| (last, col));
    let left = inner.clone().map(|row| (row, 0));
    let interior = inner
        .clone()
        .flat_map(|row| inner.clone().map(move |col| (row, col)));

    let mut seen = Array2::from_elem((grid_side, grid_side), false);
    corners
        .into_iter()
        .chain(top)
        .chain(right)
        .chain(bottom)
        .chain(left)
        .chain(interior)
        .filter(|&(row, col)| {
            seen.get_mut((row, col))
                .is_some_and(|visited| !std::mem::replace(visited, true))
        })
        .map(|(row, col)| SearchPosition::new(row, col, grid_side))
        .collect()
}

/// Receives progress notifications from the search
pub trait AssemblyObserver {
    /// A tile was placed; `filled` cells of `total` are occupied
    fn placed(&mut self, filled: usize, total: usize) {
        let _ = (filled, total);
    }

    /// A placement was undone; `filled` cells of `total` remain occupied
    fn retracted(&mut self, filled: usize, total: usize) {
        let _ = (filled, total);
    }
}

impl AssemblyObserver for () {}

/// Counters describing how much search an assembly needed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Tentative placements made
    pub placements: usize,
    /// Placements undone after their subtree failed
    pub backtracks: usize,
}

/// A fully assembled grid of oriented tiles
#[derive(Debug, Clone)]
pub struct AssembledGrid {
    cells: Array2<Tile>,
    stats: AssemblyStats,
}

impl AssembledGrid {
    /// Wrap a filled grid of tiles
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is not square or is empty
    pub fn new(cells: Array2<Tile>, stats: AssemblyStats) -> Result<Self> {
        let (rows, cols) = cells.dim();
        if rows != cols || rows == 0 {
            return Err(computation_error(
                "grid assembly",
                &format!("assembled grid must be square and non-empty, got {rows}x{cols}"),
            ));
        }
        Ok(Self { cells, stats })
    }

    /// Number of tiles along each side
    pub fn side(&self) -> usize {
        self.cells.nrows()
    }

    /// Pixel side of each tile
    pub fn tile_side(&self) -> usize {
        self.cells.first().map_or(0, Tile::side)
    }

    /// Tile at a grid position
    pub fn tile(&self, row: usize, col: usize) -> Option<&Tile> {
        self.cells.get((row, col))
    }

    /// All placed tiles indexed by (row, col)
    pub const fn cells(&self) -> &Array2<Tile> {
        &self.cells
    }

    /// Search effort spent producing this grid
    pub const fn stats(&self) -> AssemblyStats {
        self.stats
    }

    /// Identifiers laid out as in the grid
    pub fn ids(&self) -> Array2<TileId> {
        self.cells.map(Tile::id)
    }

    /// Ids at top-left, top-right, bottom-left and bottom-right
    pub fn corner_ids(&self) -> [TileId; 4] {
        let last = self.side() - 1;
        let id = |row, col| self.tile(row, col).map_or(0, Tile::id);
        [id(0, 0), id(0, last), id(last, 0), id(last, last)]
    }

    /// Product of the four corner tile ids
    ///
    /// # Errors
    ///
    /// Returns a computation error if the product overflows
    pub fn corner_id_product(&self) -> Result<u64> {
        checked_product(&self.corner_ids())
    }

    /// Whether every pair of neighbouring tiles shares its facing border
    pub fn seams_match(&self) -> bool {
        self.cells.indexed_iter().all(|((row, col), tile)| {
            let right = self
                .tile(row, col + 1)
                .is_none_or(|next| tile.border(Side::Right) == next.border(Side::Left));
            let below = self
                .tile(row + 1, col)
                .is_none_or(|next| tile.border(Side::Bottom) == next.border(Side::Top));
            right && below
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Placement {
    slot: usize,
    variant: usize,
}

struct SearchState {
    cells: Array2<Option<Placement>>,
    unused: TileBitset,
    filled: usize,
    stats: AssemblyStats,
}

/// Depth-first solver placing every tile of an index into a square grid
pub struct GridAssembler<'a> {
    index: &'a OrientationIndex,
    grid_side: usize,
    order: Vec<SearchPosition>,
}

impl<'a> GridAssembler<'a> {
    /// Prepare a search over `index` for a `grid_side` × `grid_side` grid
    ///
    /// # Errors
    ///
    /// Returns an error if the number of indexed tiles does not fill the grid
    pub fn new(index: &'a OrientationIndex, grid_side: usize) -> Result<Self> {
        let count = index.len();
        if grid_side == 0 || grid_side * grid_side != count {
            return Err(PuzzleError::NonSquareTileCount { count });
        }
        Ok(Self {
            index,
            grid_side,
            order: search_order(grid_side),
        })
    }

    /// Positions in the order they are filled
    pub fn order(&self) -> &[SearchPosition] {
        &self.order
    }

    /// Run the search without progress reporting
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::AssemblyFailed`] if no arrangement exists
    pub fn assemble(&self) -> Result<AssembledGrid> {
        self.assemble_with(&mut ())
    }

    /// Run the search, notifying `observer` of every placement and retraction
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::AssemblyFailed`] if no arrangement exists
    #[instrument(skip_all, fields(grid_side = self.grid_side))]
    pub fn assemble_with(&self, observer: &mut dyn AssemblyObserver) -> Result<AssembledGrid> {
        let total = self.grid_side * self.grid_side;
        let mut state = SearchState {
            cells: Array2::from_elem((self.grid_side, self.grid_side), None),
            unused: TileBitset::all(total),
            filled: 0,
            stats: AssemblyStats::default(),
        };

        if !self.search(&mut state, 0, observer) {
            debug!(
                placements = state.stats.placements,
                backtracks = state.stats.backtracks,
                "search exhausted"
            );
            return Err(PuzzleError::AssemblyFailed {
                grid_side: self.grid_side,
                placements: state.stats.placements,
            });
        }

        debug!(
            placements = state.stats.placements,
            backtracks = state.stats.backtracks,
            "grid assembled"
        );
        self.materialize(&state)
    }

    fn search(
        &self,
        state: &mut SearchState,
        depth: usize,
        observer: &mut dyn AssemblyObserver,
    ) -> bool {
        let Some(position) = self.order.get(depth) else {
            return state.unused.is_empty();
        };
        let total = self.order.len();

        for slot in self.candidates(position, &state.unused) {
            for (variant, tile) in self.index.orientations(slot).iter().enumerate() {
                if !self.exposes_unique_borders(tile, position)
                    || !self.fits(&state.cells, tile, position)
                {
                    continue;
                }

                if let Some(cell) = state.cells.get_mut((position.row, position.col)) {
                    *cell = Some(Placement { slot, variant });
                }
                state.unused.remove(slot);
                state.filled += 1;
                state.stats.placements += 1;
                trace!(
                    row = position.row,
                    col = position.col,
                    tile = tile.id(),
                    orientation = %tile.orientation(),
                    "placed"
                );
                observer.placed(state.filled, total);

                if self.search(state, depth + 1, observer) {
                    return true;
                }

                if let Some(cell) = state.cells.get_mut((position.row, position.col)) {
                    *cell = None;
                }
                state.unused.insert(slot);
                state.filled -= 1;
                state.stats.backtracks += 1;
                observer.retracted(state.filled, total);
            }
        }

        false
    }

    // Unused slots in input order; corners and edges also filter on unique border count
    fn candidates(&self, position: &SearchPosition, unused: &TileBitset) -> Vec<usize> {
        let required = position.outward.len();
        unused
            .iter()
            .filter(|&slot| required == 0 || self.index.unique_border_count(slot) == required)
            .collect()
    }

    fn exposes_unique_borders(&self, tile: &Tile, position: &SearchPosition) -> bool {
        position
            .outward
            .iter()
            .all(|&side| self.index.is_unique(tile.id(), tile.border(side)))
    }

    fn fits(&self, cells: &Array2<Option<Placement>>, tile: &Tile, position: &SearchPosition) -> bool {
        Side::ALL.into_iter().all(|side| {
            let (dr, dc) = side.delta();
            let neighbour = position
                .row
                .checked_add_signed(dr)
                .zip(position.col.checked_add_signed(dc))
                .and_then(|coords| cells.get(coords).copied().flatten())
                .and_then(|placement| self.index.variant(placement.slot, placement.variant));
            neighbour.is_none_or(|other| tile.border(side) == other.border(side.opposite()))
        })
    }

    fn materialize(&self, state: &SearchState) -> Result<AssembledGrid> {
        let tiles = state
            .cells
            .iter()
            .map(|cell| {
                cell.and_then(|placement| self.index.variant(placement.slot, placement.variant))
                    .cloned()
                    .ok_or(PuzzleError::AssemblyFailed {
                        grid_side: self.grid_side,
                        placements: state.stats.placements,
                    })
            })
            .collect::<Result<Vec<Tile>>>()?;
        let cells = Array2::from_shape_vec((self.grid_side, self.grid_side), tiles)
            .map_err(|e| computation_error("grid assembly", &e))?;
        AssembledGrid::new(cells, state.stats)
    }
}
