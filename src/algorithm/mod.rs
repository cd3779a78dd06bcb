//! Tile placement: border indexing, backtracking assembly and the solve pipeline

/// Bitset of tile slots still available for placement
pub mod bitset;
/// Backtracking grid assembly
pub mod assembler;
/// Solving pipeline from tile set to roughness
pub mod executor;
/// Border lookup over all tile orientations
pub mod index;
