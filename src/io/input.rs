//! Reading puzzle text into validated tile sets

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::io::error::{PuzzleError, Result, WithContext};
use crate::spatial::tiles::{Tile, TileSet};

/// Parse every tile block of a puzzle
///
/// Blocks are separated by one or more blank lines; Windows line endings are
/// accepted.
///
/// # Errors
///
/// Returns [`PuzzleError::MalformedTile`] tagged with the one-based block
/// number of the first block that fails to parse
pub fn parse_tiles(input: &str) -> Result<Vec<Tile>> {
    let mut blocks: Vec<Vec<&str>> = Vec::new();
    let mut current = Vec::new();
    for line in input.lines().map(str::trim_end) {
        if line.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
        .iter()
        .enumerate()
        .map(|(index, lines)| lines.join("\n").parse::<Tile>().with_block(index + 1))
        .collect()
}

/// Parse and validate a complete puzzle
///
/// # Errors
///
/// Returns an error if any block is malformed, the input holds no tiles,
/// tile sizes or ids conflict, or the tile count is not a perfect square
pub fn parse_tile_set(input: &str) -> Result<TileSet> {
    let tiles = parse_tiles(input)?;
    if tiles.is_empty() {
        return Err(PuzzleError::EmptyInput);
    }
    let set = TileSet::new(tiles)?;
    debug!(
        tiles = set.len(),
        grid_side = set.grid_side(),
        tile_side = set.tile_side(),
        "puzzle parsed"
    );
    Ok(set)
}

/// Read and validate a puzzle file
///
/// # Errors
///
/// Returns [`PuzzleError::FileSystem`] if the file cannot be read, otherwise
/// the errors of [`parse_tile_set`]
pub fn load_tile_set(path: &Path) -> Result<TileSet> {
    let input = fs::read_to_string(path).with_path(path, "read puzzle")?;
    parse_tile_set(&input)
}
