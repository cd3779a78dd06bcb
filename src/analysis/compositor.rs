//! Composite image built from the interiors of an assembled grid

use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, s};

use crate::algorithm::assembler::AssembledGrid;
use crate::io::configuration::{OFF_PIXEL, ON_PIXEL};
use crate::io::error::{PuzzleError, Result};
use crate::spatial::orientation::Orientation;
use crate::spatial::tiles::parse_pixel;

/// A rectangular on/off pixel image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeImage {
    pixels: Array2<bool>,
}

impl CompositeImage {
    /// Wrap a pixel grid
    pub const fn new(pixels: Array2<bool>) -> Self {
        Self { pixels }
    }

    /// Build an image from rows of `.`/`#`
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::MalformedImage`] if rows differ in width or
    /// contain other characters
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        let mut pixels = Vec::with_capacity(rows.len() * width);

        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(PuzzleError::MalformedImage {
                    reason: format!(
                        "row {} has {} pixels, expected {width}",
                        index + 1,
                        row.chars().count()
                    ),
                });
            }
            for ch in row.chars() {
                pixels.push(parse_pixel(ch).ok_or_else(|| PuzzleError::MalformedImage {
                    reason: format!("row {} contains invalid pixel '{ch}'", index + 1),
                })?);
            }
        }

        let grid = Array2::from_shape_vec((rows.len(), width), pixels).map_err(|e| {
            PuzzleError::MalformedImage {
                reason: e.to_string(),
            }
        })?;
        Ok(Self::new(grid))
    }

    /// Pixel grid indexed by (row, column)
    pub const fn pixels(&self) -> &Array2<bool> {
        &self.pixels
    }

    /// Number of pixel rows
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Number of pixel columns
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Number of lit pixels
    pub fn on_count(&self) -> usize {
        self.pixels.iter().filter(|&&pixel| pixel).count()
    }

    /// Pixel at a position, `None` outside the image
    pub fn get(&self, row: usize, col: usize) -> Option<bool> {
        self.pixels.get((row, col)).copied()
    }

    /// A new image with `orientation` applied
    #[must_use]
    pub fn oriented(&self, orientation: Orientation) -> Self {
        Self::new(orientation.apply(&self.pixels))
    }
}

impl FromStr for CompositeImage {
    type Err = PuzzleError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        Self::from_rows(&rows)
    }
}

impl fmt::Display for CompositeImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.rows() {
            for &pixel in row {
                write!(f, "{}", if pixel { ON_PIXEL } else { OFF_PIXEL })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Concatenate the interiors of every tile in grid order
///
/// Each S×S tile contributes its (S−2)×(S−2) interior, so an N×N grid yields
/// an N(S−2) square image.
pub fn compose(grid: &AssembledGrid) -> CompositeImage {
    let inner = grid.tile_side().saturating_sub(2);
    let side = grid.side() * inner;
    let mut pixels = Array2::from_elem((side, side), false);

    for ((row, col), tile) in grid.cells().indexed_iter() {
        let (top, left) = (row * inner, col * inner);
        pixels
            .slice_mut(s![top..top + inner, left..left + inner])
            .assign(&tile.interior());
    }

    CompositeImage::new(pixels)
}
