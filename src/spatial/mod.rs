//! Spatial data structures for tiles and their transforms
//!
//! This module contains spatial-related functionality including:
//! - Dihedral orientations shared by tiles and whole images
//! - Tile parsing, borders and tile set validation
//! - Synthetic puzzle generation

/// Flip and rotation transforms
pub mod orientation;
/// Seeded generation of solvable puzzles
pub mod synthesis;
/// Tile data structures and parsing
pub mod tiles;

pub use orientation::{Flip, Orientation, Rotation};
pub use tiles::{Border, Side, Tile, TileId, TileSet};
