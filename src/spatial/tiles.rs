//! Square pixel tiles, their borders, and tile set validation
//!
//! A tile is an identifier plus an S×S grid of on/off pixels. Its four
//! borders are read from the outermost rows and columns. Orienting a tile
//! produces a new value with the same identifier and recomputed borders;
//! nothing is mutated in place.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;
use ndarray::{Array2, ArrayView2, s};

use crate::io::configuration::{MIN_TILE_SIDE, OFF_PIXEL, ON_PIXEL};
use crate::io::error::{PuzzleError, Result, malformed_tile};
use crate::spatial::orientation::{Flip, Orientation, Rotation};

/// Identifier printed in a tile header
pub type TileId = u64;

/// One of the four edges of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// First row
    Top,
    /// Last column
    Right,
    /// Last row
    Bottom,
    /// First column
    Left,
}

impl Side {
    /// All sides in clockwise order starting at the top
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The side facing this one across a seam
    pub const fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Right => Self::Left,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
        }
    }

    /// Row and column step towards the neighbour on this side
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Top => (-1, 0),
            Self::Right => (0, 1),
            Self::Bottom => (1, 0),
            Self::Left => (0, -1),
        }
    }
}

/// Pixels along one edge, read left to right or top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Border(BitVec);

impl Border {
    /// Number of pixels in the border
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the border has no pixels
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The same pixels read in the opposite direction
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut bits = self.0.clone();
        bits.reverse();
        Self(bits)
    }

    /// Underlying pixel bits
    pub fn bits(&self) -> &BitSlice {
        &self.0
    }
}

impl FromIterator<bool> for Border {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.0.iter().by_vals() {
            write!(f, "{}", if bit { ON_PIXEL } else { OFF_PIXEL })?;
        }
        Ok(())
    }
}

/// The four borders of a tile in one orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Borders {
    /// First row, left to right
    pub top: Border,
    /// Last column, top to bottom
    pub right: Border,
    /// Last row, left to right
    pub bottom: Border,
    /// First column, top to bottom
    pub left: Border,
}

impl Borders {
    /// Read the borders of a pixel grid
    pub fn of(pixels: &Array2<bool>) -> Self {
        let (rows, cols) = pixels.dim();
        let column = |col: usize| -> Border { pixels.column(col).iter().copied().collect() };
        let row = |r: usize| -> Border { pixels.row(r).iter().copied().collect() };
        Self {
            top: row(0),
            right: column(cols.saturating_sub(1)),
            bottom: row(rows.saturating_sub(1)),
            left: column(0),
        }
    }

    /// Border on the given side
    pub const fn get(&self, side: Side) -> &Border {
        match side {
            Side::Top => &self.top,
            Side::Right => &self.right,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
        }
    }
}

/// A tile in one concrete orientation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    orientation: Orientation,
    pixels: Array2<bool>,
    borders: Borders,
}

impl Tile {
    /// Create a tile from its identifier and pixel grid
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::MalformedTile`] if the grid is not square or is
    /// smaller than the minimum tile side
    pub fn new(id: TileId, pixels: Array2<bool>) -> Result<Self> {
        let (rows, cols) = pixels.dim();
        if rows != cols {
            return Err(malformed_tile(&format!(
                "tile {id} has {rows} rows of {cols} pixels, expected a square"
            )));
        }
        if rows < MIN_TILE_SIDE {
            return Err(malformed_tile(&format!(
                "tile {id} is {rows}x{rows}, smaller than the minimum side {MIN_TILE_SIDE}"
            )));
        }
        Ok(Self::from_parts(id, Orientation::IDENTITY, pixels))
    }

    fn from_parts(id: TileId, orientation: Orientation, pixels: Array2<bool>) -> Self {
        let borders = Borders::of(&pixels);
        Self {
            id,
            orientation,
            pixels,
            borders,
        }
    }

    /// Tile identifier, shared by all orientations
    pub const fn id(&self) -> TileId {
        self.id
    }

    /// Orientation relative to the tile as it was parsed
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Pixel side length
    pub fn side(&self) -> usize {
        self.pixels.nrows()
    }

    /// Pixel grid in this orientation
    pub const fn pixels(&self) -> &Array2<bool> {
        &self.pixels
    }

    /// All four borders
    pub const fn borders(&self) -> &Borders {
        &self.borders
    }

    /// Border on one side
    pub const fn border(&self, side: Side) -> &Border {
        self.borders.get(side)
    }

    /// Pixels with the outermost ring removed
    pub fn interior(&self) -> ArrayView2<'_, bool> {
        let side = self.side();
        self.pixels.slice(s![1..side - 1, 1..side - 1])
    }

    /// A new tile with `orientation` applied on top of the current one
    #[must_use]
    pub fn oriented(&self, orientation: Orientation) -> Self {
        Self::from_parts(
            self.id,
            self.orientation.then(orientation),
            orientation.apply(&self.pixels),
        )
    }

    /// A new tile mirrored about `axis`
    #[must_use]
    pub fn flipped(&self, axis: Flip) -> Self {
        self.oriented(Orientation::from_flip(axis))
    }

    /// A new tile rotated clockwise
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        self.oriented(Orientation::from_rotation(rotation))
    }

    /// All eight orientations in [`Orientation::ALL`] order
    pub fn all_orientations(&self) -> Vec<Self> {
        Orientation::ALL
            .iter()
            .map(|&orientation| self.oriented(orientation))
            .collect()
    }
}

impl FromStr for Tile {
    type Err = PuzzleError;

    /// Parse a `Tile <id>:` header followed by rows of `.`/`#`
    fn from_str(s: &str) -> Result<Self> {
        let mut lines = s.lines().map(str::trim_end).filter(|line| !line.is_empty());
        let header = lines
            .next()
            .ok_or_else(|| malformed_tile(&"block is empty"))?;
        let id = parse_header(header)?;

        let rows: Vec<&str> = lines.collect();
        let side = rows.first().map_or(0, |row| row.chars().count());
        if rows.len() != side {
            return Err(malformed_tile(&format!(
                "tile {id} has {} rows but its first row has {side} pixels",
                rows.len()
            )));
        }

        let mut pixels = Vec::with_capacity(side * side);
        for (row_index, row) in rows.iter().enumerate() {
            let width = row.chars().count();
            if width != side {
                return Err(malformed_tile(&format!(
                    "tile {id} row {} has {width} pixels, expected {side}",
                    row_index + 1
                )));
            }
            for ch in row.chars() {
                pixels.push(parse_pixel(ch).ok_or_else(|| {
                    malformed_tile(&format!(
                        "tile {id} row {} contains invalid pixel '{ch}'",
                        row_index + 1
                    ))
                })?);
            }
        }

        let grid = Array2::from_shape_vec((side, side), pixels)
            .map_err(|e| malformed_tile(&format!("tile {id}: {e}")))?;
        Self::new(id, grid)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tile {}:", self.id)?;
        for row in self.pixels.rows() {
            for &pixel in row {
                write!(f, "{}", if pixel { ON_PIXEL } else { OFF_PIXEL })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn parse_header(header: &str) -> Result<TileId> {
    let digits = header
        .strip_prefix("Tile ")
        .and_then(|rest| rest.strip_suffix(':'))
        .filter(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .ok_or_else(|| malformed_tile(&format!("invalid tile header '{header}'")))?;
    digits
        .parse::<TileId>()
        .map_err(|e| malformed_tile(&format!("invalid tile id '{digits}': {e}")))
}

/// Map a pixel character to its on/off state
pub const fn parse_pixel(ch: char) -> Option<bool> {
    match ch {
        ON_PIXEL => Some(true),
        OFF_PIXEL => Some(false),
        _ => None,
    }
}

/// Validated tiles ready for assembly into an N×N grid
#[derive(Debug, Clone)]
pub struct TileSet {
    tiles: Vec<Tile>,
    grid_side: usize,
    tile_side: usize,
}

impl TileSet {
    /// Validate parsed tiles
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no tiles
    /// - Tiles differ in side length
    /// - Two tiles share an identifier
    /// - The tile count is not a perfect square
    pub fn new(tiles: Vec<Tile>) -> Result<Self> {
        let tile_side = tiles.first().ok_or(PuzzleError::EmptyInput)?.side();

        let mut seen = HashSet::with_capacity(tiles.len());
        for tile in &tiles {
            if tile.side() != tile_side {
                return Err(PuzzleError::InconsistentTileSize {
                    id: tile.id(),
                    expected: tile_side,
                    found: tile.side(),
                });
            }
            if !seen.insert(tile.id()) {
                return Err(PuzzleError::DuplicateTileId { id: tile.id() });
            }
        }

        let count = tiles.len();
        let grid_side = count.isqrt();
        if grid_side * grid_side != count {
            return Err(PuzzleError::NonSquareTileCount { count });
        }

        Ok(Self {
            tiles,
            grid_side,
            tile_side,
        })
    }

    /// Tiles in input order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles along each side of the assembled grid
    pub const fn grid_side(&self) -> usize {
        self.grid_side
    }

    /// Pixel side of every tile
    pub const fn tile_side(&self) -> usize {
        self.tile_side
    }

    /// Number of tiles
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a validated set
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
