//! Jigsaw tile assembly and sea monster roughness
//!
//! Square tiles with on/off pixels are rotated and flipped until their
//! borders line up into a square image. The tile borders are then stripped,
//! and the resulting composite image is scanned in all eight orientations for
//! a sea monster pattern; lit pixels outside any monster give the roughness.

#![deny(unsafe_code)]

/// Border indexing, backtracking assembly and the solve pipeline
pub mod algorithm;
/// Composite images and pattern scanning
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Tiles, orientations and puzzle generation
pub mod spatial;

pub use io::error::{PuzzleError, Result};
