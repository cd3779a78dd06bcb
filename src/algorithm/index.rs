//! Border lookup over every orientation of every tile
//!
//! Built once per tile set and shared read-only with the assembler. A border
//! string produced by only one tile id can never face another tile, so that
//! tile must sit on the image edge at that side.

use std::collections::HashMap;

use crate::io::error::{PuzzleError, Result, computation_error};
use crate::spatial::orientation::Orientation;
use crate::spatial::tiles::{Border, Side, Tile, TileId};

/// One oriented tile exposing a given border
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexEntry {
    /// Position of the tile in the input order
    pub slot: usize,
    /// Identifier of the tile
    pub tile_id: TileId,
    /// Orientation in which the border appears
    pub orientation: Orientation,
    /// Side of the oriented tile carrying the border
    pub side: Side,
}

/// Mapping from border to every oriented tile that exposes it
#[derive(Debug, Clone)]
pub struct OrientationIndex {
    orientations: Vec<Vec<Tile>>,
    by_border: HashMap<Border, Vec<IndexEntry>>,
    unique_counts: Vec<usize>,
}

impl OrientationIndex {
    /// Expand each tile into its eight orientations and index their borders
    pub fn build(tiles: &[Tile]) -> Self {
        let orientations: Vec<Vec<Tile>> = tiles.iter().map(Tile::all_orientations).collect();

        let mut by_border: HashMap<Border, Vec<IndexEntry>> = HashMap::new();
        for (slot, variants) in orientations.iter().enumerate() {
            for variant in variants {
                for side in Side::ALL {
                    by_border
                        .entry(variant.border(side).clone())
                        .or_default()
                        .push(IndexEntry {
                            slot,
                            tile_id: variant.id(),
                            orientation: variant.orientation(),
                            side,
                        });
                }
            }
        }

        let mut index = Self {
            orientations,
            by_border,
            unique_counts: Vec::new(),
        };
        // Uniqueness is orientation independent, so the parsed orientation suffices
        index.unique_counts = tiles
            .iter()
            .map(|tile| {
                Side::ALL
                    .iter()
                    .filter(|&&side| index.is_unique(tile.id(), tile.border(side)))
                    .count()
            })
            .collect();
        index
    }

    /// Number of indexed tiles
    pub fn len(&self) -> usize {
        self.orientations.len()
    }

    /// Whether the index holds no tiles
    pub fn is_empty(&self) -> bool {
        self.orientations.is_empty()
    }

    /// Entries whose border equals `border` exactly
    pub fn entries(&self, border: &Border) -> &[IndexEntry] {
        self.by_border.get(border).map(Vec::as_slice).unwrap_or_default()
    }

    /// True iff every entry for `border` belongs to `tile_id`
    pub fn is_unique(&self, tile_id: TileId, border: &Border) -> bool {
        self.entries(border)
            .iter()
            .all(|entry| entry.tile_id == tile_id)
    }

    /// The eight oriented variants of the tile at `slot`
    pub fn orientations(&self, slot: usize) -> &[Tile] {
        self.orientations.get(slot).map(Vec::as_slice).unwrap_or_default()
    }

    /// One oriented variant of the tile at `slot`
    pub fn variant(&self, slot: usize, variant: usize) -> Option<&Tile> {
        self.orientations(slot).get(variant)
    }

    /// How many of the tile's four borders no other tile can match
    pub fn unique_border_count(&self, slot: usize) -> usize {
        self.unique_counts.get(slot).copied().unwrap_or(0)
    }

    /// Slots whose unique border count marks them as corners of a `grid_side` grid
    pub fn corner_slots(&self, grid_side: usize) -> Vec<usize> {
        let required = if grid_side == 1 { 4 } else { 2 };
        (0..self.len())
            .filter(|&slot| self.unique_border_count(slot) == required)
            .collect()
    }

    /// Product of the corner tile ids found by uniqueness analysis alone
    ///
    /// Cheaper than full assembly. A single-tile grid has the same tile in all
    /// four corners.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Uniqueness analysis does not find exactly the expected corner tiles
    /// - The product overflows
    pub fn corner_id_product(&self, grid_side: usize) -> Result<u64> {
        let corners = self.corner_slots(grid_side);
        let expected = if grid_side == 1 { 1 } else { 4 };
        if corners.len() != expected {
            return Err(PuzzleError::CornerAnalysis {
                expected,
                found: corners.len(),
            });
        }

        let ids: Vec<TileId> = corners
            .iter()
            .filter_map(|&slot| self.variant(slot, 0).map(Tile::id))
            .collect();
        let factors: Vec<TileId> = if grid_side == 1 {
            ids.iter().flat_map(|&id| [id; 4]).collect()
        } else {
            ids
        };
        checked_product(&factors)
    }
}

/// Multiply tile ids, failing on overflow
///
/// # Errors
///
/// Returns a computation error if the product does not fit in 64 bits
pub fn checked_product(ids: &[TileId]) -> Result<u64> {
    ids.iter().try_fold(1_u64, |acc, &id| {
        acc.checked_mul(id)
            .ok_or_else(|| computation_error("corner id product", &"product overflows u64"))
    })
}
