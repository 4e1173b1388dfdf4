//! Centralized error types for the maze map crate.
//!
//! This module defines all error types used throughout the library,
//! providing a consistent error handling approach.

use std::io;

/// Main error type for maze map operations.
///
/// This is the primary error type that should be used in public APIs.
/// It can represent any error that can occur while decoding, generating,
/// or validating a map.
#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Generation error: {0}")]
    Generate(#[from] GenerateError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised while decoding a map stream.
///
/// Decoding is all-or-nothing: the first violated invariant aborts the
/// decode and no partial map is ever returned.
#[derive(thiserror::Error, Debug)]
pub enum DecodeError {
    #[error("Unrecognized byte order marker: {0:#04x}")]
    InvalidByteOrder(u8),

    #[error("Bad magic or version number")]
    InvalidHeader,

    #[error("Map area {area} is too small")]
    MapTooSmall { area: usize },

    #[error("Stream ended before the declared field could be read")]
    TruncatedStream,

    #[error("Bitmap supplies {available_bits} bits for {needed_bits} tiles")]
    InsufficientBitmapData { needed_bits: usize, available_bits: i64 },

    #[error("Start position ({x}, {y}) is not an open path tile")]
    InvalidStartPosition { x: u8, y: u8 },

    #[error("Item position ({x}, {y}) is not an open path tile")]
    InvalidItemPosition { x: u8, y: u8 },

    #[error("Unknown item kind tag: {0}")]
    UnknownItemKind(u8),

    #[error("At least one required goal must be present")]
    MissingRequiredGoal,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors raised by the maze generator.
///
/// Internal carving dead-ends are retried locally and never surface;
/// these are the only failures a caller sees.
#[derive(thiserror::Error, Debug)]
pub enum GenerateError {
    #[error("Map area {area} cannot hold the requested layout (needs {required} tiles)")]
    MapTooSmallForRequest { area: usize, required: usize },

    #[error("Gave up after {attempts} carving attempts")]
    GenerationExhausted { attempts: u32 },
}

/// Structural flaws reported by [`crate::map::Map::validate`].
#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Map area {area} is too small")]
    MapTooSmall { area: usize },

    #[error("Expected {expected} tiles, found {actual}")]
    TileCountMismatch { expected: usize, actual: usize },

    #[error("Expected exactly one start tile, found {0}")]
    StartCount(usize),

    #[error("Start position ({x}, {y}) does not address a start tile")]
    StartMismatch { x: u32, y: u32 },

    #[error("At least one required goal must be present")]
    MissingRequiredGoal,

    #[error("Map carries {count} items; the item list counts with a single byte")]
    TooManyItems { count: usize },

    #[error("Warp tile at index {index} has no destination entry")]
    WarpWithoutTarget { index: usize },

    #[error("Destination entry for index {index} does not address a warp tile")]
    TargetWithoutWarp { index: usize },

    #[error("Warp at index {source_index} targets out-of-bounds index {target}")]
    WarpTargetOutOfBounds { source_index: usize, target: usize },
}

/// Result type for maze map operations.
pub type MazeResult<T> = Result<T, MazeError>;
