//! End-to-end solving pipeline: index, assemble, compose, survey

use tracing::{info, instrument};

use crate::algorithm::assembler::{AssembledGrid, AssemblyObserver, GridAssembler};
use crate::algorithm::index::OrientationIndex;
use crate::analysis::compositor::{CompositeImage, compose};
use crate::analysis::patterns::{Pattern, RoughnessSurvey, survey};
use crate::io::error::Result;
use crate::spatial::tiles::TileSet;

/// Everything produced by solving one puzzle
#[derive(Debug, Clone)]
pub struct Solution {
    corner_id_product: u64,
    grid: AssembledGrid,
    composite: CompositeImage,
    survey: RoughnessSurvey,
}

impl Solution {
    /// Product of the four corner tile ids of the assembled grid
    pub const fn corner_id_product(&self) -> u64 {
        self.corner_id_product
    }

    /// The assembled grid
    pub const fn grid(&self) -> &AssembledGrid {
        &self.grid
    }

    /// Composite image in the orientation it was assembled
    pub const fn composite(&self) -> &CompositeImage {
        &self.composite
    }

    /// Sea monster scans of every composite orientation
    pub const fn survey(&self) -> &RoughnessSurvey {
        &self.survey
    }

    /// Highest roughness, zero when no sea monster was found
    pub fn max_roughness(&self) -> usize {
        self.survey.max_roughness()
    }
}

/// Assemble a tile set and measure the roughness of its image
///
/// # Errors
///
/// Returns an error if:
/// - The tiles cannot be assembled into a square grid
/// - The corner id product overflows
#[instrument(skip_all, fields(tiles = tiles.len(), grid_side = tiles.grid_side()))]
pub fn solve(tiles: &TileSet, observer: &mut dyn AssemblyObserver) -> Result<Solution> {
    let index = OrientationIndex::build(tiles.tiles());
    let grid = GridAssembler::new(&index, tiles.grid_side())?.assemble_with(observer)?;
    let corner_id_product = grid.corner_id_product()?;
    info!(
        corner_id_product,
        placements = grid.stats().placements,
        backtracks = grid.stats().backtracks,
        "tiles assembled"
    );

    let composite = compose(&grid);
    let scans = survey(&composite, &Pattern::sea_monster()?);
    info!(
        max_roughness = scans.max_roughness(),
        pattern_found = scans.pattern_found(),
        "image surveyed"
    );

    Ok(Solution {
        corner_id_product,
        grid,
        composite,
        survey: scans,
    })
}

/// Corner id product from border uniqueness alone, without assembly
///
/// # Errors
///
/// Returns an error if uniqueness analysis does not identify the corners
/// or the product overflows
#[instrument(skip_all, fields(tiles = tiles.len()))]
pub fn corner_product_only(tiles: &TileSet) -> Result<u64> {
    OrientationIndex::build(tiles.tiles()).corner_id_product(tiles.grid_side())
}
