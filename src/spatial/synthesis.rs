//! Seeded generation of solvable puzzles with a known answer
//!
//! A random composite image is stamped with sea monsters and cut into tiles.
//! Every seam between tiles is a freshly drawn border string that differs
//! from every other seam read in either direction, so border uniqueness
//! identifies the edge and corner tiles exactly. Tiles are then given ids,
//! randomly oriented and shuffled.

use std::collections::HashSet;

use ndarray::{Array2, s};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, instrument};

use crate::analysis::compositor::CompositeImage;
use crate::analysis::patterns::Pattern;
use crate::io::configuration::{
    DEFAULT_DENSITY, DEFAULT_GRID_SIDE, DEFAULT_MONSTERS, DEFAULT_TILE_SIDE,
    MAX_MONSTER_ATTEMPTS, MAX_SEAM_ATTEMPTS, MIN_TILE_SIDE, TILE_ID_MIN, TILE_ID_SPAN,
};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::orientation::Orientation;
use crate::spatial::tiles::{Tile, TileSet};

/// Shape and content parameters of a generated puzzle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuzzleSpec {
    /// Tiles along each side of the grid
    pub grid_side: usize,
    /// Pixels along each side of a tile, borders included
    pub tile_side: usize,
    /// Sea monsters stamped into the image
    pub monsters: usize,
    /// Probability that a background pixel is lit
    pub density: f64,
}

impl Default for PuzzleSpec {
    fn default() -> Self {
        Self {
            grid_side: DEFAULT_GRID_SIDE,
            tile_side: DEFAULT_TILE_SIDE,
            monsters: DEFAULT_MONSTERS,
            density: DEFAULT_DENSITY,
        }
    }
}

impl PuzzleSpec {
    /// Side of the composite image in pixels
    pub const fn image_side(&self) -> usize {
        self.grid_side * self.tile_side.saturating_sub(2)
    }

    /// Check every parameter against the generator's limits
    ///
    /// # Errors
    ///
    /// Returns [`crate::PuzzleError::InvalidParameter`] if:
    /// - The tile side leaves no interior
    /// - The grid is empty or needs more ids than are available
    /// - The density is not a probability
    /// - Monsters are requested but the image is smaller than one
    pub fn validate(&self) -> Result<()> {
        if self.tile_side < MIN_TILE_SIDE {
            return Err(invalid_parameter(
                "tile_side",
                &self.tile_side,
                &format!("must be at least {MIN_TILE_SIDE}"),
            ));
        }
        let tile_count = self.grid_side.checked_mul(self.grid_side);
        if self.grid_side == 0 || tile_count.is_none_or(|count| count > TILE_ID_SPAN) {
            return Err(invalid_parameter(
                "grid_side",
                &self.grid_side,
                &format!("must be positive with at most {TILE_ID_SPAN} tiles"),
            ));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(invalid_parameter(
                "density",
                &self.density,
                &"must lie between 0 and 1",
            ));
        }
        let monster = Pattern::sea_monster()?;
        let side = self.image_side();
        if self.monsters > 0 && (side < monster.height() || side < monster.width()) {
            return Err(invalid_parameter(
                "monsters",
                &self.monsters,
                &format!("a {side}x{side} image cannot hold a sea monster"),
            ));
        }
        Ok(())
    }
}

/// A generated puzzle together with its ground truth
#[derive(Debug, Clone)]
pub struct Puzzle {
    tiles: Vec<Tile>,
    truth: CompositeImage,
    monsters: Vec<(usize, usize)>,
}

impl Puzzle {
    /// Shuffled, randomly oriented tiles
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// The composite image the tiles were cut from
    pub const fn truth(&self) -> &CompositeImage {
        &self.truth
    }

    /// Top-left anchors of the stamped sea monsters in the truth image
    pub fn monsters(&self) -> &[(usize, usize)] {
        &self.monsters
    }

    /// Validated tile set ready for solving
    ///
    /// # Errors
    ///
    /// Propagates tile set validation errors
    pub fn tile_set(&self) -> Result<TileSet> {
        TileSet::new(self.tiles.clone())
    }

    /// Render the tiles in the puzzle input format
    pub fn to_text(&self) -> String {
        self.tiles
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Generate a puzzle deterministically from `seed`
///
/// # Errors
///
/// Returns an error if:
/// - Any parameter fails [`PuzzleSpec::validate`]
/// - Distinct seams or monster positions cannot be found within the attempt limits
#[instrument(skip(spec), fields(grid_side = spec.grid_side, tile_side = spec.tile_side))]
pub fn generate(spec: &PuzzleSpec, seed: u64) -> Result<Puzzle> {
    spec.validate()?;
    let mut rng = StdRng::seed_from_u64(seed);
    let (n, side) = (spec.grid_side, spec.tile_side);
    let inner = side - 2;
    let image_side = spec.image_side();

    let mut truth = Array2::from_shape_simple_fn((image_side, image_side), || {
        rng.random_bool(spec.density)
    });
    let monsters = stamp_monsters(&mut truth, spec.monsters, &mut rng)?;

    let vertices = Array2::from_shape_simple_fn((n + 1, n + 1), || rng.random_bool(0.5));
    let mut used = HashSet::new();
    let mut draw = |start: (usize, usize), end: (usize, usize)| -> Result<Vec<bool>> {
        let start = vertices.get(start).copied().unwrap_or_default();
        let end = vertices.get(end).copied().unwrap_or_default();
        draw_seam(&mut rng, start, end, side, &mut used)
    };

    // Horizontal seam (r, c) runs along the top of tile (r, c)
    let mut horizontal = Vec::with_capacity((n + 1) * n);
    for r in 0..=n {
        for c in 0..n {
            horizontal.push(draw((r, c), (r, c + 1))?);
        }
    }
    // Vertical seam (r, c) runs down the left of tile (r, c)
    let mut vertical = Vec::with_capacity(n * (n + 1));
    for r in 0..n {
        for c in 0..=n {
            vertical.push(draw((r, c), (r + 1, c))?);
        }
    }
    let seam = |seams: &Vec<Vec<bool>>, stride: usize, r: usize, c: usize| -> Vec<bool> {
        seams.get(r * stride + c).cloned().unwrap_or_default()
    };

    let ids = rand::seq::index::sample(&mut rng, TILE_ID_SPAN, n * n);
    let mut tiles = Vec::with_capacity(n * n);
    for (cell, offset) in ids.into_iter().enumerate() {
        let (r, c) = (cell / n, cell % n);
        let mut pixels = Array2::from_elem((side, side), false);
        pixels
            .slice_mut(s![1..side - 1, 1..side - 1])
            .assign(&truth.slice(s![r * inner..(r + 1) * inner, c * inner..(c + 1) * inner]));
        let edges = [
            (seam(&horizontal, n, r, c), s![0, ..]),
            (seam(&horizontal, n, r + 1, c), s![side - 1, ..]),
            (seam(&vertical, n + 1, r, c), s![.., 0]),
            (seam(&vertical, n + 1, r, c + 1), s![.., side - 1]),
        ];
        for (bits, edge) in edges {
            for (pixel, bit) in pixels.slice_mut(edge).iter_mut().zip(bits) {
                *pixel = bit;
            }
        }

        let orientation = Orientation::from_index(rng.random_range(0..8)).unwrap_or_default();
        tiles.push(Tile::new(
            TILE_ID_MIN + offset as u64,
            orientation.apply(&pixels),
        )?);
    }
    tiles.shuffle(&mut rng);

    debug!(tiles = tiles.len(), monsters = monsters.len(), "puzzle generated");
    Ok(Puzzle {
        tiles,
        truth: CompositeImage::new(truth),
        monsters,
    })
}

// Redraws the middle bits until the seam and its reversal are both unseen
fn draw_seam(
    rng: &mut StdRng,
    start: bool,
    end: bool,
    len: usize,
    used: &mut HashSet<Vec<bool>>,
) -> Result<Vec<bool>> {
    for _ in 0..MAX_SEAM_ATTEMPTS {
        let mut bits = Vec::with_capacity(len);
        bits.push(start);
        bits.extend((2..len).map(|_| rng.random_bool(0.5)));
        bits.push(end);
        let reversed: Vec<bool> = bits.iter().rev().copied().collect();
        if !used.contains(&bits) && !used.contains(&reversed) {
            used.insert(reversed);
            used.insert(bits.clone());
            return Ok(bits);
        }
    }
    Err(computation_error(
        "seam generation",
        &format!("no unused {len}-pixel seam after {MAX_SEAM_ATTEMPTS} attempts"),
    ))
}

// Places monsters at random anchors whose bounding boxes do not overlap
fn stamp_monsters(
    image: &mut Array2<bool>,
    count: usize,
    rng: &mut StdRng,
) -> Result<Vec<(usize, usize)>> {
    let mut anchors: Vec<(usize, usize)> = Vec::with_capacity(count);
    if count == 0 {
        return Ok(anchors);
    }
    let monster = Pattern::sea_monster()?;
    let (h, w) = (monster.height(), monster.width());
    let (rows, cols) = image.dim();

    let mut attempts = 0;
    while anchors.len() < count {
        if attempts == MAX_MONSTER_ATTEMPTS {
            return Err(computation_error(
                "monster placement",
                &format!("placed {} of {count} sea monsters", anchors.len()),
            ));
        }
        attempts += 1;

        let anchor = (rng.random_range(0..=rows - h), rng.random_range(0..=cols - w));
        let overlaps = anchors.iter().any(|&(r, c)| {
            anchor.0 < r + h && r < anchor.0 + h && anchor.1 < c + w && c < anchor.1 + w
        });
        if overlaps {
            continue;
        }
        for &(dr, dc) in monster.offsets() {
            if let Some(pixel) = image.get_mut((anchor.0 + dr, anchor.1 + dc)) {
                *pixel = true;
            }
        }
        anchors.push(anchor);
    }
    Ok(anchors)
}
