//! Input/output operations, configuration and error handling

/// Command-line interface
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types and context
pub mod error;
/// PNG export
pub mod image;
/// Puzzle text parsing
pub mod input;
/// Tracing subscriber setup
pub mod logging;
/// Progress bars for batch solving
pub mod progress;
