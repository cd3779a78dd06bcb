//! Puzzle constants and runtime configuration defaults

// Input format
/// Character for a lit pixel in tile and image text
pub const ON_PIXEL: char = '#';
/// Character for a dark pixel in tile and image text
pub const OFF_PIXEL: char = '.';
/// Smallest tile side that still leaves a non-empty interior
pub const MIN_TILE_SIDE: usize = 3;
/// Extension of puzzle files picked up when solving a directory
pub const INPUT_EXTENSION: &str = "txt";

// Synthetic puzzle defaults
/// Fixed seed for reproducible puzzle generation
pub const DEFAULT_SEED: u64 = 42;
/// Default number of tiles along each side of a generated grid
pub const DEFAULT_GRID_SIDE: usize = 12;
/// Default pixel side of each generated tile
pub const DEFAULT_TILE_SIDE: usize = 10;
/// Default number of sea monsters stamped into a generated image
pub const DEFAULT_MONSTERS: usize = 2;
/// Default fraction of lit background pixels in a generated image
pub const DEFAULT_DENSITY: f64 = 0.3;

// Seam redraws are cheap; running out means the border space is too small
/// Maximum redraws of a single seam before giving up
pub const MAX_SEAM_ATTEMPTS: usize = 4096;
/// Maximum random anchors tried while stamping sea monsters
pub const MAX_MONSTER_ATTEMPTS: usize = 10_000;

/// Smallest generated tile id
pub const TILE_ID_MIN: u64 = 1000;
/// Number of distinct generated tile ids (four-digit ids)
pub const TILE_ID_SPAN: usize = 9000;

// Output settings
/// Suffix added to exported image filenames
pub const OUTPUT_SUFFIX: &str = "_image";
/// Edge length in output pixels of one image pixel
pub const PNG_PIXEL_SCALE: u32 = 4;
/// Colour of dark pixels in exported images
pub const WATER_COLOR: [u8; 4] = [16, 42, 86, 255];
/// Colour of lit pixels not covered by a pattern match
pub const ROUGH_COLOR: [u8; 4] = [120, 180, 220, 255];
/// Colour of lit pixels covered by a pattern match
pub const MONSTER_COLOR: [u8; 4] = [236, 112, 40, 255];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
