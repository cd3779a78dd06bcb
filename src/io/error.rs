//! Error types and context management for parsing, assembly and export

use std::fmt;
use std::path::{Path, PathBuf};

use crate::spatial::tiles::TileId;

/// Main error type for all puzzle operations
#[derive(Debug)]
pub enum PuzzleError {
    /// A tile block does not follow the `Tile <id>:` + pixel rows format
    MalformedTile {
        /// One-based block number within the input, when known
        block: Option<usize>,
        /// Description of what is wrong with the block
        reason: String,
    },

    /// A tile's side length differs from the first tile in the input
    InconsistentTileSize {
        /// Identifier of the offending tile
        id: TileId,
        /// Side length established by the first tile
        expected: usize,
        /// Side length of the offending tile
        found: usize,
    },

    /// Two blocks share the same tile identifier
    DuplicateTileId {
        /// The repeated identifier
        id: TileId,
    },

    /// The input contains no tile blocks at all
    EmptyInput,

    /// Tile count is not a perfect square so no square grid exists
    NonSquareTileCount {
        /// Number of tiles parsed
        count: usize,
    },

    /// A composite image or pattern text is not a rectangular `.`/`#` grid
    MalformedImage {
        /// Description of what is wrong with the image
        reason: String,
    },

    /// Backtracking search exhausted every placement without filling the grid
    AssemblyFailed {
        /// Side length of the grid that could not be filled
        grid_side: usize,
        /// Placements attempted before giving up
        placements: usize,
    },

    /// Uniqueness analysis did not find the expected number of corner tiles
    CornerAnalysis {
        /// Number of corner candidates required
        expected: usize,
        /// Number of corner candidates found
        found: usize,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Numerical computation produced invalid result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl PuzzleError {
    /// Whether this error was raised while reading puzzle or image text
    pub const fn is_parse_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedTile { .. }
                | Self::InconsistentTileSize { .. }
                | Self::DuplicateTileId { .. }
                | Self::EmptyInput
                | Self::NonSquareTileCount { .. }
                | Self::MalformedImage { .. }
        )
    }

    /// Whether this error means the tiles do not form a complete image
    pub const fn is_assembly_failure(&self) -> bool {
        matches!(self, Self::AssemblyFailed { .. })
    }
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedTile {
                block: Some(block),
                reason,
            } => write!(f, "Malformed tile in block {block}: {reason}"),
            Self::MalformedTile {
                block: None,
                reason,
            } => write!(f, "Malformed tile: {reason}"),
            Self::InconsistentTileSize {
                id,
                expected,
                found,
            } => write!(
                f,
                "Tile {id} is {found}x{found} but earlier tiles are {expected}x{expected}"
            ),
            Self::DuplicateTileId { id } => write!(f, "Tile id {id} appears more than once"),
            Self::EmptyInput => write!(f, "Input contains no tiles"),
            Self::NonSquareTileCount { count } => {
                write!(f, "Incorrect number of tiles: {count} is not a perfect square")
            }
            Self::MalformedImage { reason } => write!(f, "Malformed image: {reason}"),
            Self::AssemblyFailed {
                grid_side,
                placements,
            } => write!(
                f,
                "Tiles cannot be assembled into a {grid_side}x{grid_side} grid \
                 ({placements} placements tried)"
            ),
            Self::CornerAnalysis { expected, found } => write!(
                f,
                "Expected {expected} corner tiles from border uniqueness, found {found}"
            ),
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// One-based tile block being parsed
    pub block: Option<usize>,
    /// File the failing operation touched
    pub path: Option<PathBuf>,
    /// Operation being performed
    pub operation: Option<&'static str>,
}

/// Enriches error messages with the location the error was raised at
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Attach the block number a parse error belongs to
    ///
    /// # Errors
    ///
    /// Propagates the original error with the block number applied
    fn with_block(self, block: usize) -> Result<T>;

    /// Attach the path and operation a file system error belongs to
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path, operation: &'static str) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<PuzzleError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only location-free variants are enriched; explicit locations win
            match &mut error {
                PuzzleError::MalformedTile { block, .. } => {
                    if block.is_none() {
                        *block = context.block;
                    }
                }
                PuzzleError::FileSystem {
                    path, operation, ..
                } => {
                    if let Some(context_path) = context.path {
                        *path = context_path;
                    }
                    if let Some(context_operation) = context.operation {
                        *operation = context_operation;
                    }
                }
                PuzzleError::ImageExport { path, .. } => {
                    if let Some(context_path) = context.path {
                        *path = context_path;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_block(self, block: usize) -> Result<T> {
        self.with_context(ErrorContext {
            block: Some(block),
            ..Default::default()
        })
    }

    fn with_path(self, path: &Path, operation: &'static str) -> Result<T> {
        self.with_context(ErrorContext {
            path: Some(path.to_path_buf()),
            operation: Some(operation),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for PuzzleError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create a malformed tile error without a block number
pub fn malformed_tile(reason: &impl ToString) -> PuzzleError {
    PuzzleError::MalformedTile {
        block: None,
        reason: reason.to_string(),
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a computation error
pub fn computation_error(operation: &'static str, reason: &impl ToString) -> PuzzleError {
    PuzzleError::Computation {
        operation,
        reason: reason.to_string(),
    }
}
